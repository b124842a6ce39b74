//! Error type shared by the library and the CLI.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid search response: {0}")]
    Response(#[from] serde_json::Error),

    #[error("failed to serialize blocks: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The search backend answered with an `error` field.
    #[error("search failed: {0}")]
    Backend(String),

    #[error("请输入区域名称")]
    EmptySuburb,

    #[error("unknown rule `{0}` in [rules] order (expected callout, heading, table or list)")]
    UnknownRule(String),

    #[error("rule `{0}` appears more than once in [rules] order")]
    DuplicateRule(String),
}
