//! # argcodec-observability
//!
//! Logging setup shared by the argcodec binaries.
//!
//! The codec crates only emit `trace!` events (argument counts, head sizes,
//! dispatch shape); this crate decides where they go. Output is either
//! human-readable text or JSON lines on stderr, so command output on stdout
//! stays machine-readable. Levels are configurable per component.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig};
