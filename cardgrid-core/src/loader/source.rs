//! Where the dataset text comes from.

use std::fmt;
use std::path::PathBuf;

use crate::error::LoadError;

/// A dataset location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A file on disk.
    File(PathBuf),
    /// An `http://` or `https://` URL.
    Http(String),
    /// Text already in memory.
    Inline(String),
}

impl DataSource {
    /// Interpret a location string: URLs become `Http`, anything else a path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Http(location.to_owned())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }

    /// Retrieve the raw dataset text.
    ///
    /// A response with a non-success HTTP status is an error.
    pub async fn fetch(&self) -> Result<String, LoadError> {
        match self {
            DataSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.clone(),
                        source,
                    })
            }
            DataSource::Http(url) => {
                let http_error = |source| LoadError::Http {
                    url: url.clone(),
                    source,
                };
                let response = reqwest::get(url.as_str()).await.map_err(http_error)?;
                let response = response.error_for_status().map_err(http_error)?;
                response.text().await.map_err(http_error)
            }
            DataSource::Inline(text) => Ok(text.clone()),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Http(url) => f.write_str(url),
            DataSource::Inline(text) => write!(f, "<inline, {} bytes>", text.len()),
        }
    }
}
