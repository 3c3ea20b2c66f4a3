//! Shared types for reading-progress: the clippings data model, the error
//! taxonomy, timestamp parsing, density statistics and CLI settings.

pub mod calculations;
pub mod density;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod timestamp;
