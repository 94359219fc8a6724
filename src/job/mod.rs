//! Job management
//!
//! This module handles job configuration, target resolution, file I/O,
//! and execution.

pub mod config;
pub mod files;
pub mod runner;
pub mod targets;
