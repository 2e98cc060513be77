//! Catalog Model
//!
//! Records, facets, filtering, pagination and the view state, plus the
//! [`Catalog`] that keeps a display in sync with them.
//!
//! Everything here except [`Catalog`] is a plain function over plain data.

pub mod facets;
pub mod filter;
pub mod paginate;
pub mod record;
pub mod state;
pub mod store;
mod view;

pub use facets::{extract_facets, FacetValues};
pub use filter::{apply_filters, matches, matching_indices, FilterState};
pub use paginate::{
    displayed_range, paginate, total_pages, DisplayRange, PageSlice, PaginationControls,
    DEFAULT_PAGE_SIZE,
};
pub use record::{fields, Facet, Record};
pub use state::{Action, Phase, ViewState};
pub use store::RecordStore;
pub use view::Catalog;
