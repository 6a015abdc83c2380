use eframe::egui::{self, Context, Key, RichText};

use super::{AppState, GraphViewerApp};

impl GraphViewerApp {
    pub(super) fn show_controls(&mut self, ctx: &Context) -> bool {
        let loading = self.is_loading();
        let mut submit = false;

        egui::TopBottomPanel::top("request-controls").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Relationship graph");
                ui.separator();

                let seed = ui.add(
                    egui::TextEdit::singleline(&mut self.seed_input)
                        .hint_text("identity")
                        .desired_width(200.0),
                );
                let depth = ui.add(
                    egui::TextEdit::singleline(&mut self.depth_input)
                        .hint_text("depth (1 or 2)")
                        .desired_width(110.0),
                );
                let enter_pressed = (seed.lost_focus() || depth.lost_focus())
                    && ui.input(|input| input.key_pressed(Key::Enter));

                let show = ui.add_enabled(!loading, egui::Button::new("Show"));
                submit = !loading && (show.clicked() || enter_pressed);

                if loading {
                    ui.spinner();
                }

                if let AppState::Ready(model) = &mut self.state {
                    ui.separator();
                    ui.add(
                        egui::TextEdit::singleline(&mut model.search)
                            .hint_text("search nodes")
                            .desired_width(160.0),
                    );
                    if ui.button("Reset view").clicked() {
                        model.reset_view();
                    }
                }
            });

            if let AppState::Ready(model) = &self.state {
                ui.horizontal(|ui| {
                    ui.label(format!(
                        "{}: {} nodes, {} edges, depth {}",
                        model.request.seed(),
                        model.scene.markers.len(),
                        model.scene.edges.len(),
                        model.request.depth()
                    ));
                    if !model.report.failures.is_empty() {
                        ui.separator();
                        let skipped = model
                            .report
                            .failures
                            .iter()
                            .map(|failure| failure.identity.as_str())
                            .collect::<Vec<_>>()
                            .join(", ");
                        ui.label(
                            RichText::new(format!(
                                "{} fetch(es) failed: {skipped}",
                                model.report.failures.len()
                            ))
                            .color(egui::Color32::from_rgb(190, 90, 40)),
                        );
                    }
                    if model.report.truncated {
                        ui.separator();
                        ui.label("node limit reached");
                    }
                });
            }
            ui.add_space(4.0);
        });

        submit
    }
}
