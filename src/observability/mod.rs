//! Logging setup for the `bucketmap` binary.
//!
//! The library only emits `tracing` events and spans; installing a
//! subscriber is left to the application. The binary calls
//! [`init_tracing`] once at startup:
//!
//! ```ignore
//! use bucketmap::observability::init_tracing;
//!
//! fn main() {
//!     init_tracing(0);
//!     // ... rest of application
//! }
//! ```
//!
//! `RUST_LOG` takes precedence over the verbosity flag.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity level (`-v` count)
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` or `verbosity`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
