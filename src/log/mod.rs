//! Logging and observability
//!
//! This module provides the JSONL run log that records every processed
//! file across invocations.

pub mod jsonl;

pub use jsonl::{JsonlLogger, RunEntry};
