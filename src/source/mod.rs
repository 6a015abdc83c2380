mod command;
mod file;

use anyhow::Result;

pub use command::CommandSource;
pub use file::AdjacencyFile;

/// Supplier of directly connected identities.
///
/// Implementations may fail per call; the crawler keeps the node as a leaf and
/// carries on. They are shared across fetch threads, hence `Sync`.
pub trait NeighborSource: Sync {
    fn fetch_neighbors(&self, identity: &str, depth: usize) -> Result<Vec<String>>;
}

impl<F> NeighborSource for F
where
    F: Fn(&str, usize) -> Result<Vec<String>> + Sync,
{
    fn fetch_neighbors(&self, identity: &str, depth: usize) -> Result<Vec<String>> {
        self(identity, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_neighbor_sources() {
        let source = |identity: &str, depth: usize| -> Result<Vec<String>> {
            Ok(vec![format!("{identity}-friend-{depth}")])
        };
        assert_eq!(
            source.fetch_neighbors("alice", 1).expect("closure source"),
            ["alice-friend-1"]
        );
    }
}
