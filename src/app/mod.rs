use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};
use reach_graph::{
    CrawlReport, CrawlRequest, NeighborSource, RenderOptions, RenderOutcome, Scene, render_request,
};
use tracing::warn;

mod controls;
mod render_utils;
mod view;

pub struct GraphViewerApp {
    source: Arc<dyn NeighborSource + Send>,
    options: RenderOptions,
    seed_input: String,
    depth_input: String,
    state: AppState,
}

enum AppState {
    Idle,
    Loading {
        request: CrawlRequest,
        rx: Receiver<RenderOutcome>,
    },
    Ready(Box<ViewModel>),
    Rejected(String),
    Failed(String),
}

struct ViewModel {
    request: CrawlRequest,
    scene: Scene,
    report: CrawlReport,
    search: String,
    search_cache: Option<SearchCache>,
    pan: Vec2,
    zoom: f32,
}

struct SearchCache {
    query: String,
    matches: Arc<HashSet<usize>>,
}

impl GraphViewerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: Arc<dyn NeighborSource + Send>,
        options: RenderOptions,
        seed_input: String,
        depth_input: String,
    ) -> Self {
        let mut app = Self {
            source,
            options,
            seed_input,
            depth_input,
            state: AppState::Idle,
        };

        if !app.seed_input.trim().is_empty() && !app.depth_input.trim().is_empty() {
            app.submit();
        }
        app
    }

    fn submit(&mut self) {
        let depth = Some(self.depth_input.as_str());
        self.state = match CrawlRequest::parse(&self.seed_input, depth) {
            Ok(request) => AppState::Loading {
                rx: self.spawn_render(request.clone()),
                request,
            },
            Err(error) => {
                warn!("rejecting request: {error}");
                AppState::Rejected(error.to_string())
            }
        };
    }

    fn spawn_render(&self, request: CrawlRequest) -> Receiver<RenderOutcome> {
        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        let options = self.options;

        thread::spawn(move || {
            let outcome = render_request(&request, source.as_ref(), &options);
            let _ = tx.send(outcome);
        });

        rx
    }

    fn is_loading(&self) -> bool {
        matches!(self.state, AppState::Loading { .. })
    }
}

impl ViewModel {
    fn new(request: CrawlRequest, outcome: RenderOutcome) -> Self {
        Self {
            request,
            scene: outcome.scene,
            report: outcome.report,
            search: String::new(),
            search_cache: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    fn reset_view(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

impl eframe::App for GraphViewerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        if let AppState::Loading { request, rx } = &self.state {
            match rx.try_recv() {
                Ok(outcome) => {
                    transition = Some(AppState::Ready(Box::new(ViewModel::new(
                        request.clone(),
                        outcome,
                    ))));
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    transition = Some(AppState::Failed(
                        "Background crawl worker disconnected".to_owned(),
                    ));
                }
            }
        }
        if let Some(next_state) = transition {
            self.state = next_state;
        }

        if self.show_controls(ctx) {
            self.submit();
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(render_utils::PLOT_BACKGROUND))
            .show(ctx, |ui| match &mut self.state {
                AppState::Idle => {
                    view::draw_placeholder(
                        ui,
                        "Enter an identity and a depth of 1 or 2, then press Show.",
                    );
                }
                AppState::Loading { request, .. } => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading(format!(
                            "Crawling {} ({} hops)...",
                            request.seed(),
                            request.depth()
                        ));
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                }
                AppState::Ready(model) => model.draw_scene(ui),
                AppState::Rejected(reason) => {
                    view::draw_placeholder(ui, &format!("Nothing to show: {reason}."));
                }
                AppState::Failed(error) => {
                    view::draw_placeholder(ui, error);
                }
            });
    }
}
