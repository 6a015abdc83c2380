use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("seed identity is empty")]
    EmptySeed,

    #[error("depth is missing")]
    MissingDepth,

    #[error("depth {0:?} is not a number")]
    NonNumericDepth(String),

    #[error("depth {value} is out of range (accepted: {min}..={max})")]
    DepthOutOfRange { value: i64, min: u8, max: u8 },
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read adjacency file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("adjacency file {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("fetch command must not be empty")]
    EmptyCommand,
}
