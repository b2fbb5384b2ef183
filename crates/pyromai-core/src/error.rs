use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Fatal errors raised while setting up or running an index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("root path must be a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to resolve root path '{}': {source}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk '{}': {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid exclude pattern '{pattern}': {source}")]
    ExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Why a discovered file was left out of the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("could not read file: {0}")]
    Unreadable(String),

    #[error("file is not valid UTF-8: {0}")]
    NotUtf8(String),

    #[error("syntax error: {0}")]
    Syntax(String),
}
