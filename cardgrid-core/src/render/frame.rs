//! What one render pass shows.

use serde::Serialize;

use crate::catalog::paginate::{displayed_range, paginate, DisplayRange, PaginationControls};
use crate::catalog::record::Record;

use super::DisplaySink;

/// One grid cell: an image and its alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub image_url: String,
    pub alt: String,
}

impl From<&Record> for Tile {
    fn from(record: &Record) -> Self {
        Self {
            image_url: record.image_url.clone(),
            alt: record.name.clone(),
        }
    }
}

/// The complete visible state after a recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub range: DisplayRange,
    pub tiles: Vec<Tile>,
    pub controls: PaginationControls,
}

impl Frame {
    /// Build the frame for `page` of the records selected by `matches`.
    pub fn compose(records: &[Record], matches: &[usize], page: usize, page_size: usize) -> Self {
        let slice = paginate(matches, page, page_size);
        let tiles = slice
            .items
            .iter()
            .filter_map(|&index| records.get(index))
            .map(Tile::from)
            .collect();

        Self {
            range: displayed_range(slice.page, page_size, matches.len()),
            tiles,
            controls: PaginationControls::new(slice.page, slice.total_pages),
        }
    }

    /// What an unpopulated catalog shows.
    pub fn empty(page_size: usize) -> Self {
        Self::compose(&[], &[], 1, page_size)
    }

    /// `Showing {start} - {end} of {total} Cards`.
    pub fn summary(&self) -> String {
        self.range.summary()
    }

    /// Push the frame to `sink`: count summary, then grid, then controls.
    pub fn present(&self, sink: &mut dyn DisplaySink) -> std::io::Result<()> {
        sink.render_status(&self.range)?;
        sink.render_grid(&self.tiles)?;
        sink.render_controls(&self.controls)?;
        sink.flush()
    }
}
