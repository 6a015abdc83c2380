use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Result, anyhow};
use serde::Deserialize;

use super::NeighborSource;
use crate::error::SourceError;

#[derive(Clone, Debug, Default)]
pub struct AdjacencyFile {
    neighbors: HashMap<String, Vec<String>>,
    unavailable: HashSet<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFile {
    neighbors: HashMap<String, RawEntry>,
    #[serde(default)]
    unavailable: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    List(Vec<String>),
    Object {
        #[serde(default)]
        neighbors: Vec<String>,
    },
}

impl AdjacencyFile {
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let raw = fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let file: RawFile = serde_json::from_str(raw)?;

        let neighbors = file
            .neighbors
            .into_iter()
            .map(|(identity, entry)| {
                let list = match entry {
                    RawEntry::List(list) => list,
                    RawEntry::Object { neighbors } => neighbors,
                };
                (identity, list)
            })
            .collect();

        Ok(Self {
            neighbors,
            unavailable: file.unavailable.into_iter().collect(),
        })
    }

    pub fn identity_count(&self) -> usize {
        self.neighbors.len()
    }
}

impl NeighborSource for AdjacencyFile {
    fn fetch_neighbors(&self, identity: &str, _depth: usize) -> Result<Vec<String>> {
        if self.unavailable.contains(identity) {
            return Err(anyhow!("{identity} is not available"));
        }

        Ok(self.neighbors.get(identity).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_lists_objects_and_unavailable_entries() {
        let source = AdjacencyFile::from_json(
            r#"{
                "neighbors": {
                    "alice": ["bob", "carol"],
                    "bob": { "neighbors": ["alice"] }
                },
                "unavailable": ["carol"]
            }"#,
        )
        .expect("valid adjacency JSON");

        assert_eq!(source.identity_count(), 2);
        assert_eq!(
            source.fetch_neighbors("alice", 0).expect("alice is known"),
            ["bob", "carol"]
        );
        assert_eq!(source.fetch_neighbors("bob", 1).expect("bob is known"), ["alice"]);
        assert!(source.fetch_neighbors("carol", 1).is_err());
        assert!(
            source
                .fetch_neighbors("dave", 1)
                .expect("unknown identities have no neighbors")
                .is_empty()
        );
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"neighbors": {{"alice": ["bob"]}}}}"#).expect("write adjacency");

        let source = AdjacencyFile::load(file.path()).expect("load adjacency");
        assert_eq!(source.fetch_neighbors("alice", 0).expect("alice"), ["bob"]);
    }

    #[test]
    fn reports_invalid_json_with_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "[1, 2, 3]").expect("write adjacency");

        let error = AdjacencyFile::load(file.path()).expect_err("array is not an adjacency map");
        assert!(matches!(error, SourceError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let error = AdjacencyFile::load(Path::new("/definitely/not/here.json"))
            .expect_err("file does not exist");
        assert!(matches!(error, SourceError::Read { .. }));
    }

    #[test]
    fn unavailable_is_an_ordinary_identity_inside_neighbors() {
        let source = AdjacencyFile::from_json(
            r#"{
                "neighbors": {
                    "unavailable": { "neighbors": ["alice"] },
                    "alice": ["unavailable"]
                }
            }"#,
        )
        .expect("identity named unavailable");

        assert_eq!(source.identity_count(), 2);
        assert_eq!(
            source.fetch_neighbors("unavailable", 1).expect("regular identity"),
            ["alice"]
        );
    }

    #[test]
    fn flat_identity_maps_are_rejected() {
        assert!(AdjacencyFile::from_json(r#"{"alice": ["bob"]}"#).is_err());
    }
}
