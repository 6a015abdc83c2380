use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::render_utils::{COLOR_BAR_GUTTER, Viewport, draw_color_bar, to_color32};
use super::{SearchCache, ViewModel};

const HOVER_DISTANCE: f32 = 20.0;

pub(super) fn draw_placeholder(ui: &mut Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(120.0);
        ui.label(egui::RichText::new(message).color(Color32::from_gray(70)));
    });
}

fn fuzzy_matches(matcher: &SkimMatcherV2, text: &str, query: &str) -> bool {
    matcher.fuzzy_match(text, query).is_some()
        || matcher
            .fuzzy_match(&text.to_lowercase(), &query.to_lowercase())
            .is_some()
}

impl ViewModel {
    fn search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cache) = &self.search_cache
            && cache.query == query
        {
            return Some(Arc::clone(&cache.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .scene
            .markers
            .iter()
            .enumerate()
            .filter(|(_, marker)| fuzzy_matches(&matcher, &marker.hover_label, query))
            .map(|(index, _)| index)
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_cache = Some(SearchCache {
            query: query.to_owned(),
            matches: Arc::clone(&matches),
        });
        Some(matches)
    }

    fn handle_zoom(&mut self, ui: &Ui, viewport: Viewport, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let anchor = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| viewport.rect.center());
        let factor = (1.0 + scroll * 0.0018).clamp(0.85, 1.15);
        (self.pan, self.zoom) = viewport.zoomed_about(anchor, factor);
    }

    fn closest_marker(&self, screen_positions: &[Pos2], pointer: Option<Pos2>) -> Option<usize> {
        let pointer = pointer?;
        screen_positions
            .iter()
            .enumerate()
            .map(|(index, position)| (index, position.distance(pointer)))
            .filter(|(index, distance)| {
                *distance <= HOVER_DISTANCE + self.scene.markers[*index].size * 0.5
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub(super) fn draw_scene(&mut self, ui: &mut Ui) {
        if self.scene.is_empty() {
            draw_placeholder(ui, "Nothing to show.");
            return;
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        let canvas = if self.scene.color_bar.is_some() {
            Rect::from_min_max(rect.min, rect.max - vec2(COLOR_BAR_GUTTER, 0.0))
        } else {
            rect
        };
        let viewport = Viewport {
            rect: canvas,
            pan: self.pan,
            zoom: self.zoom,
        };

        self.handle_zoom(ui, viewport, &response);
        if response.dragged() {
            self.pan += response.drag_delta();
        }
        if response.double_clicked() {
            self.reset_view();
        }
        if response.dragged() || response.hovered() {
            ui.ctx().request_repaint();
        }

        let viewport = Viewport {
            rect: canvas,
            pan: self.pan,
            zoom: self.zoom,
        };
        let matches = self.search_matches();

        for segment in &self.scene.edges {
            painter.line_segment(
                [viewport.to_screen(segment.start), viewport.to_screen(segment.end)],
                Stroke::new(segment.style.width, to_color32(segment.style.color)),
            );
        }

        let screen_positions = self
            .scene
            .markers
            .iter()
            .map(|marker| viewport.to_screen(marker.position))
            .collect::<Vec<_>>();
        let hovered = self.closest_marker(&screen_positions, response.hover_pos());

        let highlight = Color32::from_rgb(235, 90, 60);
        let markers = self.scene.markers.iter().zip(&screen_positions);
        for (index, (marker, position)) in markers.enumerate() {
            let radius = marker.size * 0.5;
            painter.circle_filled(*position, radius, to_color32(marker.color));

            let matched = matches.as_ref().is_some_and(|matches| matches.contains(&index));
            let stroke = if hovered == Some(index) || matched {
                Stroke::new(2.0, highlight)
            } else {
                Stroke::new(0.5, Color32::from_gray(60))
            };
            painter.circle_stroke(*position, radius, stroke);

            if matched {
                painter.text(
                    *position + vec2(radius + 4.0, 0.0),
                    Align2::LEFT_CENTER,
                    &marker.hover_label,
                    FontId::proportional(12.0),
                    Color32::from_gray(20),
                );
            }
        }

        if let Some(index) = hovered {
            let marker = &self.scene.markers[index];
            let text = format!("{}  |  {} connections", marker.hover_label, marker.degree);
            painter.text(
                screen_positions[index] + vec2(0.0, -(marker.size * 0.5 + 6.0)),
                Align2::CENTER_BOTTOM,
                text,
                FontId::proportional(13.0),
                Color32::from_gray(15),
            );
        }

        if let Some(bar) = &self.scene.color_bar {
            draw_color_bar(&painter, rect, bar);
        }
    }
}
