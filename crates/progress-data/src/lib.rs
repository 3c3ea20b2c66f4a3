//! Data layer for reading-progress.
//!
//! Scans clippings exports into records, builds the book catalog and
//! extracts per-book progress series.

pub mod catalog;
pub mod progress;
pub mod reader;

pub use progress_core as core;
