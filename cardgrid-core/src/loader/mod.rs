//! Dataset Loading
//!
//! Fetch raw text from a [`DataSource`] and turn it into records. This is the
//! only asynchronous step in the crate.

mod parse;
mod source;

pub use parse::{parse_records, ParseOptions, DEFAULT_DELIMITER};
pub use source::DataSource;

use tracing::info;

use crate::catalog::record::Record;
use crate::error::LoadError;

/// Fetch and parse a dataset.
pub async fn load(source: &DataSource, options: &ParseOptions) -> Result<Vec<Record>, LoadError> {
    info!(%source, "loading dataset");
    let text = source.fetch().await?;
    let records = parse_records(&text, options)?;
    info!(%source, records = records.len(), "dataset loaded");
    Ok(records)
}
