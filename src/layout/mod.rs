mod quadtree;

use std::collections::HashMap;
use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};
use serde::Serialize;
use tracing::debug;

use crate::graph::GraphStore;
use crate::util::stable_pair;
use quadtree::QuadTree;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for Point {
    fn from(value: Vec2) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

impl From<Point> for Vec2 {
    fn from(value: Point) -> Self {
        vec2(value.x, value.y)
    }
}

impl Point {
    pub fn distance(self, other: Self) -> f32 {
        Vec2::from(self - other).length()
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionMap {
    positions: HashMap<String, Point>,
}

impl PositionMap {
    pub fn get(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.positions.iter().map(|(id, point)| (id.as_str(), *point))
    }
}

impl FromIterator<(String, Point)> for PositionMap {
    fn from_iter<T: IntoIterator<Item = (String, Point)>>(iter: T) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    pub iterations: usize,
    pub seed: u64,
    pub barnes_hut_threshold: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 120,
            seed: 7,
            barnes_hut_threshold: 400,
        }
    }
}

pub fn spring_layout(store: &GraphStore, config: &LayoutConfig) -> PositionMap {
    let positions = rescale(force_layout(store.nodes(), store.edge_indices(), config));

    store
        .nodes()
        .iter()
        .cloned()
        .zip(positions.into_iter().map(Point::from))
        .collect()
}

fn repulsion(point: Vec2, other: Vec2, strength: f32) -> Vec2 {
    let delta = point - other;
    let distance = delta.length();
    let direction = if distance > 0.0001 {
        delta / distance
    } else {
        vec2(1.0, 0.0)
    };
    direction * (strength / distance.max(0.5))
}

fn force_layout(node_ids: &[String], edges: &[(usize, usize)], config: &LayoutConfig) -> Vec<Vec2> {
    let n = node_ids.len();
    if n == 0 {
        return Vec::new();
    }

    let base_radius = (n as f32).sqrt() * 360.0;
    let mut positions = node_ids
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let angle = (index as f32 / n as f32) * TAU;
            let (jx, jy) = stable_pair(config.seed, id);
            vec2(angle.cos(), angle.sin()) * base_radius + vec2(jx, jy) * 160.0
        })
        .collect::<Vec<_>>();

    if n == 1 {
        return positions;
    }

    let area = (base_radius * 2.4).powi(2);
    let k = (area / n as f32).sqrt().max(24.0);
    let k_sq = k * k;
    let mut temperature = (k * 5.5).max(140.0);
    let use_barnes_hut = n > config.barnes_hut_threshold;
    debug!(nodes = n, edges = edges.len(), k, use_barnes_hut, "running spring layout");

    let mut disp = vec![Vec2::ZERO; n];
    for _ in 0..config.iterations {
        disp.fill(Vec2::ZERO);

        if use_barnes_hut {
            if let Some(tree) = QuadTree::build(&positions) {
                for (index, force) in disp.iter_mut().enumerate() {
                    tree.accumulate_repulsion(index, &positions, k_sq, force);
                }
            }
        } else {
            for i in 0..n {
                for j in (i + 1)..n {
                    let push = repulsion(positions[i], positions[j], k_sq);
                    disp[i] += push;
                    disp[j] -= push;
                }
            }
        }

        for &(from, to) in edges {
            if from >= n || to >= n || from == to {
                continue;
            }

            let delta = positions[from] - positions[to];
            let distance = delta.length().max(0.5);
            let pull = delta / distance * ((distance - k) * 0.18);
            disp[from] -= pull;
            disp[to] += pull;
        }

        for (force, position) in disp.iter_mut().zip(&positions) {
            *force -= *position * 0.0012;
        }

        for (position, force) in positions.iter_mut().zip(&disp) {
            let length = force.length();
            if length > 0.0 {
                *position += *force / length * length.min(temperature) * 0.92;
            }
        }

        temperature *= 0.965;
        if temperature < 0.55 {
            break;
        }
    }

    positions
}

fn rescale(mut positions: Vec<Vec2>) -> Vec<Vec2> {
    if positions.is_empty() {
        return positions;
    }

    let center =
        positions.iter().fold(Vec2::ZERO, |sum, point| sum + *point) / positions.len() as f32;
    let mut limit = 0.0_f32;
    for position in &mut positions {
        *position -= center;
        limit = limit.max(position.x.abs()).max(position.y.abs());
    }

    if limit > 0.0 {
        for position in &mut positions {
            *position = *position / limit;
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(count: usize) -> GraphStore {
        let mut store = GraphStore::new();
        for index in 0..count {
            store.add_edge(&format!("n{index}"), &format!("n{}", (index + 1) % count));
        }
        store
    }

    fn average_distances(store: &GraphStore, positions: &PositionMap) -> (f32, f32) {
        let (mut connected, mut connected_count) = (0.0, 0);
        let (mut unconnected, mut unconnected_count) = (0.0, 0);
        let nodes = store.nodes();
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                let distance = positions
                    .get(a)
                    .zip(positions.get(b))
                    .map(|(pa, pb)| pa.distance(pb))
                    .expect("both nodes are positioned");
                if store.has_edge(a, b) {
                    connected += distance;
                    connected_count += 1;
                } else {
                    unconnected += distance;
                    unconnected_count += 1;
                }
            }
        }
        (
            connected / connected_count as f32,
            unconnected / unconnected_count as f32,
        )
    }

    #[test]
    fn empty_graph_has_no_positions() {
        let positions = spring_layout(&GraphStore::new(), &LayoutConfig::default());
        assert!(positions.is_empty());
    }

    #[test]
    fn single_node_sits_at_the_origin() {
        let mut store = GraphStore::new();
        store.add_node("alice");

        let positions = spring_layout(&store, &LayoutConfig::default());
        assert_eq!(positions.len(), 1);
        assert_eq!(positions.get("alice"), Some(Point { x: 0.0, y: 0.0 }));
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let store = ring(9);
        let config = LayoutConfig::default();
        assert_eq!(spring_layout(&store, &config), spring_layout(&store, &config));
    }

    #[test]
    fn connected_nodes_end_up_closer() {
        let store = ring(10);
        let positions = spring_layout(&store, &LayoutConfig::default());
        let (connected, unconnected) = average_distances(&store, &positions);
        assert!(connected < unconnected, "{connected} vs {unconnected}");
    }

    #[test]
    fn clusters_stay_together() {
        let mut store = GraphStore::new();
        for group in ["a", "b"] {
            for i in 0..4 {
                for j in (i + 1)..4 {
                    store.add_edge(&format!("{group}{i}"), &format!("{group}{j}"));
                }
            }
        }
        store.add_edge("a0", "b0");

        let positions = spring_layout(&store, &LayoutConfig::default());
        let (connected, unconnected) = average_distances(&store, &positions);
        assert!(connected < unconnected, "{connected} vs {unconnected}");
    }

    #[test]
    fn output_is_normalized() {
        let store = ring(12);
        let positions = spring_layout(&store, &LayoutConfig::default());
        let limit = positions
            .iter()
            .map(|(_, point)| point.x.abs().max(point.y.abs()))
            .fold(0.0_f32, f32::max);
        assert!((limit - 1.0).abs() < 1e-4);
    }

    #[test]
    fn barnes_hut_path_stays_finite_and_in_range() {
        let mut store = GraphStore::new();
        for index in 1..60 {
            store.add_edge("hub", &format!("leaf{index}"));
            if index % 3 == 0 {
                store.add_edge(&format!("leaf{index}"), &format!("leaf{}", index - 1));
            }
        }

        let config = LayoutConfig {
            barnes_hut_threshold: 0,
            ..LayoutConfig::default()
        };
        let positions = spring_layout(&store, &config);

        assert_eq!(positions.len(), store.node_count());
        for (id, point) in positions.iter() {
            assert!(point.x.is_finite() && point.y.is_finite(), "{id}");
            assert!(point.x.abs() <= 1.0 + 1e-4 && point.y.abs() <= 1.0 + 1e-4, "{id}");
        }
    }

    #[test]
    fn zero_iterations_still_positions_every_node() {
        let store = ring(5);
        let config = LayoutConfig {
            iterations: 0,
            ..LayoutConfig::default()
        };
        assert_eq!(spring_layout(&store, &config).len(), 5);
    }
}
