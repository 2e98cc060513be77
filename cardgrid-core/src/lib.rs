//! Cardgrid Core
//!
//! A card catalog browser: load a `;`-delimited dataset of cards, narrow it
//! with a name search and three facet pickers, and page through the result
//! 50 cards at a time.
//!
//! # Architecture
//!
//! - `reactive`: signals, memos and effects with automatic dependency tracking
//! - `catalog`: records, facets, the filter engine, the paginator, the view
//!   state reducer and the [`Catalog`] controller that keeps a display in sync
//! - `loader`: fetching (file, HTTP or inline) and parsing datasets
//! - `render`: frames and the display sinks they are pushed to
//! - `config`, `cli`, `logging`: what the `cardgrid` binary is built from
//!
//! # Example
//!
//! ```rust,ignore
//! use cardgrid_core::catalog::{Action, Catalog};
//! use cardgrid_core::loader::{DataSource, ParseOptions};
//! use cardgrid_core::render::FrameBuffer;
//!
//! let screen = FrameBuffer::new();
//! let catalog = Catalog::with_sink(screen.clone());
//! catalog
//!     .load(&DataSource::parse("cards.csv"), &ParseOptions::default())
//!     .await?;
//!
//! catalog.dispatch(Action::set_query("fire"));
//! println!("{}", screen.summary().unwrap_or_default());
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod reactive;
pub mod render;

pub use catalog::{Action, Catalog, Facet, FilterState, Record, RecordStore, ViewState};
pub use error::{CatalogError, Result};
