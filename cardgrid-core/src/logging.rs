//! Diagnostic logging setup for the binary.
//!
//! The library only emits `tracing` events. Installing a subscriber is left
//! to the application; [`init_tracing`] is the one `cardgrid` uses.

use tracing_subscriber::EnvFilter;

/// Target prefix of every event this crate emits.
pub const TARGET: &str = "cardgrid_core";

/// The filter directive for a base level raised by `verbose` steps.
///
/// `-v` raises to `debug`, `-vv` and above to `trace`.
pub fn directive(level: &str, verbose: u8) -> String {
    let level = match verbose {
        0 => level,
        1 => "debug",
        _ => "trace",
    };
    format!("{TARGET}={level},warn")
}

/// Install a stderr subscriber. `RUST_LOG` wins over `level` and `verbose`.
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing(level: &str, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(level, verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_level() {
        assert_eq!(directive("info", 0), "cardgrid_core=info,warn");
        assert_eq!(directive("info", 1), "cardgrid_core=debug,warn");
        assert_eq!(directive("error", 3), "cardgrid_core=trace,warn");
    }
}
