use std::collections::{HashMap, HashSet};

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge {
    pub a: String,
    pub b: String,
}

impl Edge {
    pub fn new(first: &str, second: &str) -> Option<Self> {
        match first.cmp(second) {
            std::cmp::Ordering::Less => Some(Self {
                a: first.to_owned(),
                b: second.to_owned(),
            }),
            std::cmp::Ordering::Greater => Some(Self {
                a: second.to_owned(),
                b: first.to_owned(),
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn touches(&self, id: &str) -> bool {
        self.a == id || self.b == id
    }
}

/// Deduplicating node/edge container filled by one crawl.
///
/// Node identities keep their insertion order so that layouts and scenes are
/// reproducible for the same crawl.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    nodes: Vec<String>,
    index_by_id: HashMap<String, usize>,
    edges: Vec<(usize, usize)>,
    edge_set: HashSet<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: &str) -> usize {
        if let Some(&index) = self.index_by_id.get(id) {
            return index;
        }

        let index = self.nodes.len();
        self.nodes.push(id.to_owned());
        self.index_by_id.insert(id.to_owned(), index);
        self.adjacency.push(Vec::new());
        index
    }

    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }

        let from = self.add_node(a);
        let to = self.add_node(b);
        let key = (from.min(to), from.max(to));
        if !self.edge_set.insert(key) {
            return false;
        }

        self.edges.push(key);
        self.adjacency[from].push(to);
        self.adjacency[to].push(from);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.edges
            .iter()
            .filter_map(|&(from, to)| Edge::new(&self.nodes[from], &self.nodes[to]))
            .collect()
    }

    pub fn edge_indices(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(from), Some(to)) => self.edge_set.contains(&(from.min(to), from.max(to))),
            _ => false,
        }
    }

    pub fn degree(&self, id: &str) -> usize {
        self.index_of(id)
            .map(|index| self.adjacency[index].len())
            .unwrap_or(0)
    }

    pub fn degree_at(&self, index: usize) -> usize {
        self.adjacency.get(index).map(Vec::len).unwrap_or(0)
    }

    pub fn neighbors(&self, id: &str) -> impl Iterator<Item = &str> + '_ {
        self.index_of(id)
            .map(|index| self.adjacency[index].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&other| self.nodes[other].as_str())
    }

    pub fn degree_map(&self) -> HashMap<String, usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, id)| (id.clone(), self.degree_at(index)))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
