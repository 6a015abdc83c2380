use serde::Serialize;
use tracing::debug;

use crate::graph::GraphStore;
use crate::layout::{Point, PositionMap};
use crate::visual::{ColorBar, EdgeSegment, LineStyle, NodeMarker, edge_segments, node_markers};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverMode {
    Closest,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SceneLayout {
    pub show_legend: bool,
    pub hover_mode: HoverMode,
    pub show_axes: bool,
    pub show_grid: bool,
    pub margins: Margins,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            show_legend: false,
            hover_mode: HoverMode::Closest,
            show_axes: false,
            show_grid: false,
            margins: Margins::ZERO,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scene {
    pub edges: Vec<EdgeSegment>,
    pub markers: Vec<NodeMarker>,
    pub color_bar: Option<ColorBar>,
    pub layout: SceneLayout,
}

impl Scene {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.edges.is_empty()
    }

    pub fn max_degree(&self) -> usize {
        self.markers.iter().map(|marker| marker.degree).max().unwrap_or(0)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.markers.first()?.position;
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for marker in &self.markers[1..] {
            bounds.min.x = bounds.min.x.min(marker.position.x);
            bounds.min.y = bounds.min.y.min(marker.position.y);
            bounds.max.x = bounds.max.x.max(marker.position.x);
            bounds.max.y = bounds.max.y.max(marker.position.y);
        }
        Some(bounds)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneStyle {
    pub marker_size: f32,
    pub edge: LineStyle,
    pub show_color_bar: bool,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            marker_size: 10.0,
            edge: LineStyle::default(),
            show_color_bar: true,
        }
    }
}

pub struct SceneBuilder {
    style: SceneStyle,
}

impl SceneBuilder {
    pub fn new(style: SceneStyle) -> Self {
        Self { style }
    }

    pub fn build(&self, store: &GraphStore, positions: &PositionMap) -> Scene {
        if store.is_empty() {
            return Scene::empty();
        }

        let edges = edge_segments(store, positions, self.style.edge);
        let markers = node_markers(store, positions, self.style.marker_size);
        let max_degree = markers.iter().map(|marker| marker.degree).max().unwrap_or(0);
        debug!(edges = edges.len(), markers = markers.len(), max_degree, "scene built");

        Scene {
            edges,
            markers,
            color_bar: self
                .style
                .show_color_bar
                .then(|| ColorBar::for_max_degree(max_degree)),
            layout: SceneLayout::default(),
        }
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new(SceneStyle::default())
    }
}
