//! buddyweek-core
//!
//! Core library for drawing random partner assignments inside groups.
//!
//! Records loaded from a table are partitioned by group, each group is shuffled
//! and linked into a single cycle (every member gives to the next one and the
//! last wraps around to the first), and the resulting pairs are written out as
//! per-group text files.
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! the CLI frontend.

pub mod assign;
pub mod config;
pub mod grouping;
pub mod loader;
pub mod model;
pub mod output;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
