mod app;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{ArgGroup, Parser};
use reach_graph::{
    AdjacencyFile, CommandSource, CrawlConfig, LayoutConfig, NeighborSource, RenderOptions,
    SceneStyle, render_input,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about,
    group = ArgGroup::new("source").required(true).args(["adjacency", "fetch_cmd"])
)]
struct Args {
    #[arg(long, help = "Identity to start the crawl from")]
    seed: Option<String>,

    #[arg(long, help = "Crawl depth, 1 or 2")]
    depth: Option<String>,

    #[arg(
        long,
        value_name = "FILE",
        help = "JSON file with a neighbors map and an optional unavailable list"
    )]
    adjacency: Option<PathBuf>,

    #[arg(
        long,
        value_name = "PROGRAM",
        help = "External fetcher, invoked as <PROGRAM> <identity> <depth>"
    )]
    fetch_cmd: Option<String>,

    #[arg(long, default_value_t = 4, help = "Parallel neighbor fetches per depth level")]
    concurrency: usize,

    #[arg(
        long,
        default_value_t = 5_000,
        help = "Stop discovering new identities past this many nodes"
    )]
    max_nodes: usize,

    #[arg(long, default_value_t = 7, help = "Seed for the layout's initial placement")]
    layout_seed: u64,

    #[arg(long, default_value_t = 120, help = "Maximum spring layout iterations")]
    iterations: usize,

    #[arg(
        long,
        value_name = "FILE",
        help = "Write the scene as JSON to FILE instead of opening the viewer"
    )]
    export: Option<PathBuf>,
}

impl Args {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            crawl: CrawlConfig {
                concurrency: self.concurrency.max(1),
                max_nodes: self.max_nodes.max(1),
            },
            layout: LayoutConfig {
                iterations: self.iterations,
                seed: self.layout_seed,
                ..LayoutConfig::default()
            },
            style: SceneStyle::default(),
        }
    }

    fn neighbor_source(&self) -> Result<Arc<dyn NeighborSource + Send>> {
        if let Some(path) = &self.adjacency {
            let source = AdjacencyFile::load(path)?;
            info!(
                path = %path.display(),
                identities = source.identity_count(),
                "loaded adjacency file"
            );
            return Ok(Arc::new(source));
        }

        if let Some(command_line) = &self.fetch_cmd {
            return Ok(Arc::new(CommandSource::new(command_line)?));
        }

        Err(anyhow!("either --adjacency or --fetch-cmd is required"))
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reach_graph=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn export_scene(args: &Args, source: &dyn NeighborSource, path: &Path) -> Result<()> {
    let options = args.render_options();
    let seed = args.seed.as_deref().unwrap_or_default();
    let outcome = render_input(seed, args.depth.as_deref(), source, &options);
    for failure in &outcome.report.failures {
        warn!(identity = %failure.identity, "skipped: {}", failure.message);
    }
    let scene = outcome.scene;

    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &scene)
        .with_context(|| format!("failed to write scene to {}", path.display()))?;
    info!(
        path = %path.display(),
        markers = scene.markers.len(),
        edges = scene.edges.len(),
        "scene exported"
    );
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let source = args.neighbor_source()?;

    if let Some(path) = &args.export {
        return export_scene(&args, source.as_ref(), path);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };
    let render_options = args.render_options();

    eframe::run_native(
        "reach-graph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::GraphViewerApp::new(
                cc,
                source,
                render_options,
                args.seed.clone().unwrap_or_default(),
                args.depth.clone().unwrap_or_default(),
            )))
        }),
    )
    .map_err(|error| anyhow!("viewer failed: {error}"))
}
