//! Render Boundary
//!
//! The catalog never draws anything itself. Each render pass produces a
//! [`Frame`] and hands it to a [`DisplaySink`] in three steps: the count
//! summary, the grid of tiles, then the pagination controls. Every step
//! replaces what the sink showed for that step before.

mod frame;
mod sinks;

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::catalog::paginate::{DisplayRange, PaginationControls};

pub use frame::{Frame, Tile};
pub use sinks::{
    write_json_line, write_msgpack_frame, FrameBuffer, JsonLinesSink, MsgpackSink, RenderStep,
    TextSink,
};

/// A surface that shows the catalog view.
pub trait DisplaySink: Send {
    /// Replace the count summary.
    fn render_status(&mut self, range: &DisplayRange) -> io::Result<()>;

    /// Replace the grid with `tiles`, in order.
    fn render_grid(&mut self, tiles: &[Tile]) -> io::Result<()>;

    /// Replace the previous/next buttons and the page indicator.
    fn render_controls(&mut self, controls: &PaginationControls) -> io::Result<()>;

    /// Called once at the end of every render pass.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn render_status(&mut self, range: &DisplayRange) -> io::Result<()> {
        (**self).render_status(range)
    }

    fn render_grid(&mut self, tiles: &[Tile]) -> io::Result<()> {
        (**self).render_grid(tiles)
    }

    fn render_controls(&mut self, controls: &PaginationControls) -> io::Result<()> {
        (**self).render_controls(controls)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Which sink the binary writes to stdout with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Msgpack,
}

impl OutputFormat {
    /// Build the matching sink around `out`.
    pub fn sink<W>(self, out: W) -> Box<dyn DisplaySink>
    where
        W: Write + Send + 'static,
    {
        match self {
            OutputFormat::Text => Box::new(TextSink::new(out)),
            OutputFormat::Json => Box::new(JsonLinesSink::new(out)),
            OutputFormat::Msgpack => Box::new(MsgpackSink::new(out)),
        }
    }
}
