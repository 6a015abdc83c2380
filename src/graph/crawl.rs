use std::collections::HashSet;

use anyhow::Result;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::store::GraphStore;
use crate::request::CrawlRequest;
use crate::source::NeighborSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrawlConfig {
    pub concurrency: usize,
    pub max_nodes: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            max_nodes: 5_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub identity: String,
    pub depth: usize,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub fetch_calls: usize,
    pub levels: usize,
    pub failures: Vec<FetchFailure>,
    pub truncated: bool,
}

#[derive(Clone, Debug)]
pub struct CrawlOutcome {
    pub store: GraphStore,
    pub report: CrawlReport,
}

pub struct BoundedCrawler<'a, S: NeighborSource + ?Sized> {
    source: &'a S,
    config: CrawlConfig,
}

impl<'a, S: NeighborSource + ?Sized> BoundedCrawler<'a, S> {
    pub fn new(source: &'a S, config: CrawlConfig) -> Self {
        Self { source, config }
    }

    pub fn crawl(&self, request: &CrawlRequest) -> CrawlOutcome {
        let seed = request.seed();
        let max_depth = request.depth().get();
        let mut store = GraphStore::new();
        let mut report = CrawlReport::default();
        store.add_node(seed);

        let mut queued = HashSet::from([seed.to_owned()]);
        let mut frontier = vec![seed.to_owned()];
        let pool = self.thread_pool();

        info!(seed, max_depth, "starting crawl");

        for depth in 0..max_depth {
            if frontier.is_empty() {
                break;
            }

            debug!(depth, frontier = frontier.len(), "expanding level");
            let results = self.fetch_level(&frontier, depth, pool.as_ref());
            report.fetch_calls += frontier.len();
            report.levels += 1;

            let mut next = Vec::new();
            for (identity, result) in frontier.iter().zip(results) {
                let neighbors = match result {
                    Ok(neighbors) => neighbors,
                    Err(error) => {
                        warn!(identity = %identity, depth, "neighbor fetch failed: {error:#}");
                        report.failures.push(FetchFailure {
                            identity: identity.clone(),
                            depth,
                            message: format!("{error:#}"),
                        });
                        continue;
                    }
                };

                for neighbor in &neighbors {
                    let neighbor = neighbor.trim();
                    if neighbor.is_empty() || neighbor == identity.as_str() {
                        continue;
                    }

                    if !store.contains(neighbor) && store.node_count() >= self.config.max_nodes {
                        report.truncated = true;
                        continue;
                    }

                    store.add_edge(identity, neighbor);
                    if depth + 1 < max_depth && queued.insert(neighbor.to_owned()) {
                        next.push(neighbor.to_owned());
                    }
                }
            }

            frontier = next;
        }

        if report.truncated {
            warn!(max_nodes = self.config.max_nodes, "crawl truncated at node limit");
        }
        info!(
            nodes = store.node_count(),
            edges = store.edge_count(),
            fetch_calls = report.fetch_calls,
            failures = report.failures.len(),
            "crawl finished"
        );

        CrawlOutcome { store, report }
    }

    fn thread_pool(&self) -> Option<ThreadPool> {
        if self.config.concurrency <= 1 {
            return None;
        }

        ThreadPoolBuilder::new()
            .num_threads(self.config.concurrency)
            .thread_name(|index| format!("reach-fetch-{index}"))
            .build()
            .inspect_err(|error| warn!("falling back to sequential fetches: {error}"))
            .ok()
    }

    fn fetch_level(
        &self,
        frontier: &[String],
        depth: usize,
        pool: Option<&ThreadPool>,
    ) -> Vec<Result<Vec<String>>> {
        let fetch = |identity: &String| self.source.fetch_neighbors(identity, depth);

        match pool {
            Some(pool) if frontier.len() > 1 => {
                pool.install(|| frontier.par_iter().map(fetch).collect())
            }
            _ => frontier.iter().map(fetch).collect(),
        }
    }
}
