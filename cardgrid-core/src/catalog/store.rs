//! The loaded record collection.

use std::ops::Deref;
use std::sync::Arc;

use crate::error::LoadError;
use crate::loader::{self, DataSource, ParseOptions};

use super::record::Record;

/// All records in dataset order. Immutable once built; clones share storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    records: Arc<[Record]>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Fetch and parse `source`.
    pub async fn load(source: &DataSource, options: &ParseOptions) -> Result<Self, LoadError> {
        loader::load(source, options).await.map(Self::new)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl Deref for RecordStore {
    type Target = [Record];

    fn deref(&self) -> &[Record] {
        &self.records
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}
