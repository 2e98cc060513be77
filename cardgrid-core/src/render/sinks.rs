//! Display sink implementations.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::catalog::paginate::{DisplayRange, PaginationControls};

use super::frame::Tile;
use super::DisplaySink;

/// Human-readable rendering for a terminal.
///
/// Disabled navigation buttons are shown in parentheses.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> DisplaySink for TextSink<W> {
    fn render_status(&mut self, range: &DisplayRange) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", range.summary())
    }

    fn render_grid(&mut self, tiles: &[Tile]) -> io::Result<()> {
        for tile in tiles {
            writeln!(self.out, "  {}  <{}>", tile.alt, tile.image_url)?;
        }
        Ok(())
    }

    fn render_controls(&mut self, controls: &PaginationControls) -> io::Result<()> {
        let button = |label: &str, enabled: bool| {
            if enabled {
                format!("[{label}]")
            } else {
                format!("({label})")
            }
        };
        writeln!(
            self.out,
            "{} {} {}",
            button("Previous", controls.previous_enabled),
            controls.indicator(),
            button("Next", controls.next_enabled)
        )
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Write `value` as one line of JSON.
pub fn write_json_line<W, T>(out: &mut W, value: &T) -> io::Result<()>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")
}

/// Write `value` as named MessagePack, prefixed with its length as a
/// big-endian u32.
pub fn write_msgpack_frame<W, T>(out: &mut W, value: &T) -> io::Result<()>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    let bytes = rmp_serde::to_vec_named(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let len = u32::try_from(bytes.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "frame too large"))?;
    out.write_all(&len.to_be_bytes())?;
    out.write_all(&bytes)
}

/// One message per render step, as written by the structured sinks.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Message<'a> {
    Status {
        summary: String,
        range: &'a DisplayRange,
    },
    Grid {
        tiles: &'a [Tile],
    },
    Controls {
        indicator: String,
        #[serde(flatten)]
        controls: &'a PaginationControls,
    },
}

impl<'a> Message<'a> {
    fn status(range: &'a DisplayRange) -> Self {
        Message::Status {
            summary: range.summary(),
            range,
        }
    }

    fn controls(controls: &'a PaginationControls) -> Self {
        Message::Controls {
            indicator: controls.indicator(),
            controls,
        }
    }
}

/// Newline-delimited JSON, one object per render step.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, message: &Message<'_>) -> io::Result<()> {
        write_json_line(&mut self.out, message)
    }
}

impl<W: Write + Send> DisplaySink for JsonLinesSink<W> {
    fn render_status(&mut self, range: &DisplayRange) -> io::Result<()> {
        self.emit(&Message::status(range))
    }

    fn render_grid(&mut self, tiles: &[Tile]) -> io::Result<()> {
        self.emit(&Message::Grid { tiles })
    }

    fn render_controls(&mut self, controls: &PaginationControls) -> io::Result<()> {
        self.emit(&Message::controls(controls))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// MessagePack frames, each prefixed with its length as a big-endian u32.
pub struct MsgpackSink<W: Write> {
    out: W,
}

impl<W: Write> MsgpackSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, message: &Message<'_>) -> io::Result<()> {
        write_msgpack_frame(&mut self.out, message)
    }
}

impl<W: Write + Send> DisplaySink for MsgpackSink<W> {
    fn render_status(&mut self, range: &DisplayRange) -> io::Result<()> {
        self.emit(&Message::status(range))
    }

    fn render_grid(&mut self, tiles: &[Tile]) -> io::Result<()> {
        self.emit(&Message::Grid { tiles })
    }

    fn render_controls(&mut self, controls: &PaginationControls) -> io::Result<()> {
        self.emit(&Message::controls(controls))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Which render step a sink saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStep {
    Status,
    Grid,
    Controls,
}

#[derive(Debug, Default)]
struct BufferState {
    summary: Option<String>,
    tiles: Vec<Tile>,
    controls: Option<PaginationControls>,
    steps: Vec<RenderStep>,
    renders: usize,
}

/// Keeps the latest rendered content in memory.
///
/// Clones share the buffer, so a handle kept outside the catalog sees what
/// the catalog rendered.
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    state: Arc<Mutex<BufferState>>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last count summary, if anything was rendered.
    pub fn summary(&self) -> Option<String> {
        self.state.lock().summary.clone()
    }

    pub fn tiles(&self) -> Vec<Tile> {
        self.state.lock().tiles.clone()
    }

    pub fn controls(&self) -> Option<PaginationControls> {
        self.state.lock().controls
    }

    /// Every step seen so far, in order.
    pub fn steps(&self) -> Vec<RenderStep> {
        self.state.lock().steps.clone()
    }

    /// Number of completed render passes.
    pub fn render_count(&self) -> usize {
        self.state.lock().renders
    }
}

impl DisplaySink for FrameBuffer {
    fn render_status(&mut self, range: &DisplayRange) -> io::Result<()> {
        let mut state = self.state.lock();
        state.summary = Some(range.summary());
        state.steps.push(RenderStep::Status);
        Ok(())
    }

    fn render_grid(&mut self, tiles: &[Tile]) -> io::Result<()> {
        let mut state = self.state.lock();
        state.tiles = tiles.to_vec();
        state.steps.push(RenderStep::Grid);
        Ok(())
    }

    fn render_controls(&mut self, controls: &PaginationControls) -> io::Result<()> {
        let mut state = self.state.lock();
        state.controls = Some(*controls);
        state.steps.push(RenderStep::Controls);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.state.lock().renders += 1;
        Ok(())
    }
}
