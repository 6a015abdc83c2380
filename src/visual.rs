use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

use crate::graph::{Edge, GraphStore};
use crate::layout::{Point, PositionMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

pub const DEGREE_RAMP: [Rgb; 9] = [
    Rgb::new(255, 255, 217),
    Rgb::new(237, 248, 217),
    Rgb::new(199, 233, 180),
    Rgb::new(127, 205, 187),
    Rgb::new(65, 182, 196),
    Rgb::new(29, 145, 192),
    Rgb::new(34, 94, 168),
    Rgb::new(37, 52, 148),
    Rgb::new(8, 29, 88),
];

pub fn ramp_color(t: f32) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (DEGREE_RAMP.len() - 1) as f32;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(DEGREE_RAMP.len() - 1);
    DEGREE_RAMP[lower].lerp(DEGREE_RAMP[upper], scaled - lower as f32)
}

pub fn degree_color(degree: usize, max_degree: usize) -> Rgb {
    if max_degree == 0 {
        return ramp_color(0.0);
    }
    ramp_color(degree as f32 / max_degree as f32)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeMarker {
    pub id: String,
    pub position: Point,
    pub degree: usize,
    pub color: Rgb,
    pub size: f32,
    pub hover_label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LineStyle {
    pub width: f32,
    pub color: Rgb,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            color: Rgb::BLACK,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeSegment {
    pub edge: Edge,
    pub start: Point,
    pub end: Point,
    pub style: LineStyle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: String,
    pub thickness: f32,
    pub min: usize,
    pub max: usize,
    pub stops: Vec<(f32, Rgb)>,
}

impl ColorBar {
    pub fn for_max_degree(max_degree: usize) -> Self {
        let last = (DEGREE_RAMP.len() - 1) as f32;
        Self {
            title: "Node Connections".to_owned(),
            thickness: 15.0,
            min: 0,
            max: max_degree,
            stops: DEGREE_RAMP
                .iter()
                .enumerate()
                .map(|(index, color)| (index as f32 / last, *color))
                .collect(),
        }
    }
}

pub fn node_markers(
    store: &GraphStore,
    positions: &PositionMap,
    marker_size: f32,
) -> Vec<NodeMarker> {
    let degrees = store.degree_map();
    let max_degree = degrees.values().copied().max().unwrap_or(0);

    store
        .nodes()
        .iter()
        .filter_map(|id| {
            let Some(position) = positions.get(id) else {
                warn!(id = %id, "node has no layout position");
                return None;
            };
            let degree = degrees.get(id).copied().unwrap_or(0);
            Some(NodeMarker {
                id: id.clone(),
                position,
                degree,
                color: degree_color(degree, max_degree),
                size: marker_size,
                hover_label: id.clone(),
            })
        })
        .collect()
}

pub fn edge_segments(
    store: &GraphStore,
    positions: &PositionMap,
    style: LineStyle,
) -> Vec<EdgeSegment> {
    store
        .edges()
        .into_par_iter()
        .filter_map(|edge| {
            let start = positions.get(&edge.a)?;
            let end = positions.get(&edge.b)?;
            Some(EdgeSegment {
                edge,
                start,
                end,
                style,
            })
        })
        .collect()
}
