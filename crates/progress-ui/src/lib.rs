//! Terminal output layer for reading progress.
//!
//! Provides themes, the header and progress-bar components, the chart and
//! table views, plain-text reports and the application event loop built on
//! top of [`ratatui`].

pub mod app;
pub mod charts;
pub mod components;
pub mod report;
pub mod table_view;
pub mod themes;

pub use progress_core as core;
