use tracing::{info, warn};

use crate::graph::{BoundedCrawler, CrawlConfig, CrawlReport};
use crate::layout::{LayoutConfig, spring_layout};
use crate::request::CrawlRequest;
use crate::scene::{Scene, SceneBuilder, SceneStyle};
use crate::source::NeighborSource;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderOptions {
    pub crawl: CrawlConfig,
    pub layout: LayoutConfig,
    pub style: SceneStyle,
}

#[derive(Clone, Debug)]
pub struct RenderOutcome {
    pub scene: Scene,
    pub report: CrawlReport,
}

pub fn render_request<S>(
    request: &CrawlRequest,
    source: &S,
    options: &RenderOptions,
) -> RenderOutcome
where
    S: NeighborSource + ?Sized,
{
    let outcome = BoundedCrawler::new(source, options.crawl).crawl(request);
    let positions = spring_layout(&outcome.store, &options.layout);
    let scene = SceneBuilder::new(options.style).build(&outcome.store, &positions);

    RenderOutcome {
        scene,
        report: outcome.report,
    }
}

pub fn render_input<S>(
    seed: &str,
    depth: Option<&str>,
    source: &S,
    options: &RenderOptions,
) -> RenderOutcome
where
    S: NeighborSource + ?Sized,
{
    match CrawlRequest::parse(seed, depth) {
        Ok(request) => {
            info!(seed = request.seed(), depth = %request.depth(), "rendering graph");
            render_request(&request, source, options)
        }
        Err(error) => {
            warn!("rejecting request: {error}");
            RenderOutcome {
                scene: Scene::empty(),
                report: CrawlReport::default(),
            }
        }
    }
}

/// Raw `(seed, depth)` input in, scene out.
///
/// Invalid requests yield [`Scene::empty`] without touching `source`.
pub fn render_graph<S>(
    seed: &str,
    depth: Option<&str>,
    source: &S,
    options: &RenderOptions,
) -> Scene
where
    S: NeighborSource + ?Sized,
{
    render_input(seed, depth, source, options).scene
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::Result;

    use super::*;

    struct CountingSource {
        calls: AtomicUsize,
    }

    impl NeighborSource for CountingSource {
        fn fetch_neighbors(&self, identity: &str, _depth: usize) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(if identity == "alice" {
                vec!["bob".to_owned(), "carol".to_owned()]
            } else {
                Vec::new()
            })
        }
    }

    fn source() -> CountingSource {
        CountingSource {
            calls: AtomicUsize::new(0),
        }
    }

    #[test]
    fn invalid_requests_make_no_supplier_calls() {
        let source = source();
        let options = RenderOptions::default();
        for (seed, depth) in [
            ("alice", Some("3")),
            ("alice", Some("0")),
            ("alice", Some("-1")),
            ("alice", Some("deep")),
            ("alice", None),
            ("", Some("1")),
        ] {
            let scene = render_graph(seed, depth, &source, &options);
            assert_eq!(scene, Scene::empty(), "{seed:?} {depth:?}");
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn valid_request_renders_scene() {
        let source = source();
        let scene = render_graph("alice", Some("1"), &source, &RenderOptions::default());

        assert_eq!(scene.markers.len(), 3);
        assert_eq!(scene.edges.len(), 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn render_request_reports_crawl() {
        let source = source();
        let request = CrawlRequest::new("alice", 2).expect("valid request");
        let outcome = render_request(&request, &source, &RenderOptions::default());

        assert_eq!(outcome.report.fetch_calls, 3);
        assert_eq!(outcome.report.levels, 2);
        assert_eq!(outcome.scene.max_degree(), 2);
    }

    #[test]
    fn rejected_input_has_an_empty_report() {
        let source = source();
        let outcome = render_input("alice", Some("5"), &source, &RenderOptions::default());

        assert_eq!(outcome.scene, Scene::empty());
        assert_eq!(outcome.report, CrawlReport::default());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn raw_input_reaches_the_crawl_report() {
        let source = source();
        let outcome = render_input(" alice ", Some(" 2 "), &source, &RenderOptions::default());

        assert_eq!(outcome.report.fetch_calls, 3);
        assert_eq!(outcome.scene.markers.len(), 3);
    }
}
