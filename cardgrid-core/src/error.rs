//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain or parse the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch dataset from {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] csv::Error),
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("page size must be at least 1")]
    ZeroPageSize,

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),
}

/// A control command that could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
}

/// Top-level error for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("the catalog has already been loaded")]
    AlreadyLoaded,
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
