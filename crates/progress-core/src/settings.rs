use clap::Parser;
use std::path::PathBuf;

use crate::error::{ProgressError, Result};
use crate::timestamp::MonthTable;

/// Default clippings export file name.
pub const DEFAULT_CLIPPINGS_FILE: &str = "clippings.txt";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Reading progress statistics from e-reader clippings
#[derive(Parser, Debug, Clone)]
#[command(
    name = "reading-progress",
    about = "Reading progress statistics from e-reader clippings",
    version
)]
pub struct Settings {
    /// Clippings export to read
    #[arg(long, default_value = DEFAULT_CLIPPINGS_FILE)]
    pub file: PathBuf,

    /// View mode
    #[arg(long, default_value = "books", value_parser = ["books", "progress", "chart"])]
    pub view: String,

    /// Book title (required for the progress and chart views)
    #[arg(long)]
    pub book: Option<String>,

    /// Book length in locations (defaults to the furthest annotated location)
    #[arg(long)]
    pub book_length: Option<u64>,

    /// Output format for the books and progress views
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Read "July" as month 5, matching older processed exports
    #[arg(long)]
    pub legacy_months: bool,

    /// Display theme for the chart view
    #[arg(long, default_value = "dark", value_parser = ["light", "dark", "classic"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived values.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os().collect())
    }

    /// Same as [`Settings::load`] but with an explicit argument list, enabling
    /// unit-testing without spawning subprocesses.
    pub fn load_from_args(args: Vec<std::ffi::OsString>) -> Self {
        Self::resolve(Settings::parse_from(args))
    }

    /// Apply the `--debug` flag.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Check cross-field constraints clap cannot express on its own.
    pub fn validate(&self) -> Result<()> {
        let needs_book = matches!(self.view.as_str(), "progress" | "chart");
        if needs_book && self.book.as_deref().map(str::trim).unwrap_or("").is_empty() {
            return Err(ProgressError::Config(format!(
                "--book is required for the {} view",
                self.view
            )));
        }
        Ok(())
    }

    /// Month table selected by `--legacy-months`.
    pub fn month_table(&self) -> MonthTable {
        if self.legacy_months {
            MonthTable::Legacy
        } else {
            MonthTable::Standard
        }
    }

    /// Whether `--format json` was requested.
    pub fn wants_json(&self) -> bool {
        self.format == "json"
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
