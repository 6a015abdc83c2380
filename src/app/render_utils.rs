use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Vec2, pos2, vec2};
use reach_graph::visual::ramp_color;
use reach_graph::{ColorBar, Point, Rgb};

pub(super) const PLOT_BACKGROUND: Color32 = Color32::from_rgb(229, 236, 246);
pub(super) const COLOR_BAR_GUTTER: f32 = 90.0;

pub(super) fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

#[derive(Clone, Copy)]
pub(super) struct Viewport {
    pub(super) rect: Rect,
    pub(super) pan: Vec2,
    pub(super) zoom: f32,
}

impl Viewport {
    fn scale(self) -> f32 {
        (self.rect.width().min(self.rect.height()) * 0.45).max(1.0) * self.zoom
    }

    pub(super) fn to_screen(self, point: Point) -> Pos2 {
        self.rect.center() + self.pan + vec2(point.x, -point.y) * self.scale()
    }

    pub(super) fn to_world(self, screen: Pos2) -> Vec2 {
        let offset = (screen - self.rect.center() - self.pan) / self.scale();
        vec2(offset.x, -offset.y)
    }

    pub(super) fn zoomed_about(self, anchor: Pos2, factor: f32) -> (Vec2, f32) {
        let world = self.to_world(anchor);
        let zoom = (self.zoom * factor).clamp(0.1, 25.0);
        let scaled = Self { zoom, ..self }.scale();
        let pan = anchor - self.rect.center() - vec2(world.x, -world.y) * scaled;
        (pan, zoom)
    }
}

pub(super) fn draw_color_bar(painter: &Painter, canvas: Rect, bar: &ColorBar) {
    const STEPS: usize = 48;

    let height = canvas.height() * 0.6;
    let left = canvas.right() - COLOR_BAR_GUTTER + 14.0;
    let top = canvas.center().y - height * 0.5;
    let slice = height / STEPS as f32;

    for step in 0..STEPS {
        // Highest value on top.
        let t = 1.0 - (step as f32 + 0.5) / STEPS as f32;
        let y = top + step as f32 * slice;
        painter.rect_filled(
            Rect::from_min_max(pos2(left, y), pos2(left + bar.thickness, y + slice + 0.5)),
            0.0,
            to_color32(ramp_color(t)),
        );
    }

    let text_color = Color32::from_gray(40);
    let label_x = left + bar.thickness + 6.0;
    painter.text(
        pos2(label_x, top),
        Align2::LEFT_CENTER,
        bar.max.to_string(),
        FontId::proportional(12.0),
        text_color,
    );
    painter.text(
        pos2(label_x, top + height),
        Align2::LEFT_CENTER,
        bar.min.to_string(),
        FontId::proportional(12.0),
        text_color,
    );
    painter.text(
        pos2(left, top - 10.0),
        Align2::LEFT_BOTTOM,
        &bar.title,
        FontId::proportional(12.0),
        text_color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            rect: Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 200.0)),
            pan: vec2(10.0, -5.0),
            zoom: 1.5,
        }
    }

    #[test]
    fn screen_and_world_are_inverse() {
        let viewport = viewport();
        let point = Point { x: 0.4, y: -0.7 };
        let world = viewport.to_world(viewport.to_screen(point));
        assert!((world.x - point.x).abs() < 1e-4);
        assert!((world.y - point.y).abs() < 1e-4);
    }

    #[test]
    fn positive_y_is_drawn_upwards() {
        let viewport = viewport();
        let up = viewport.to_screen(Point { x: 0.0, y: 1.0 });
        let down = viewport.to_screen(Point { x: 0.0, y: -1.0 });
        assert!(up.y < down.y);
    }

    #[test]
    fn zoom_keeps_anchor_in_place() {
        let viewport = viewport();
        let anchor = pos2(300.0, 50.0);
        let before = viewport.to_world(anchor);
        let (pan, zoom) = viewport.zoomed_about(anchor, 1.2);
        let after = Viewport { pan, zoom, ..viewport }.to_world(anchor);
        assert!((before - after).length() < 1e-4);
    }
}
