//! CLI output formatting
//!
//! Provides human-readable, coloured terminal output for job execution.

pub mod display;

pub use display::render_run_summary;
pub use display::JobDisplay;
