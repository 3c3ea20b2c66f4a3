mod bootstrap;

use anyhow::{anyhow, Result};
use progress_core::calculations::ProgressCalculator;
use progress_core::density::DensityConfig;
use progress_core::models::ProgressSeries;
use progress_core::settings::Settings;
use progress_data::catalog::list_books_with;
use progress_data::progress::get_progress_with;
use progress_ui::app::App;
use progress_ui::charts::BookCharts;
use progress_ui::report;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("reading-progress v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "File: {}, View: {}, Format: {}",
        settings.file.display(),
        settings.view,
        settings.format
    );

    settings.validate()?;

    match settings.view.as_str() {
        "books" => print!("{}", books_output(&settings)?),
        "progress" => print!("{}", progress_output(&settings)?),
        "chart" => run_chart(&settings)?,
        unknown => return Err(anyhow!("Unknown view mode: {}", unknown)),
    }

    Ok(())
}

/// Titles in the clippings file, as text lines or a JSON array.
fn books_output(settings: &Settings) -> Result<String> {
    let titles = list_books_with(&settings.file, settings.month_table())?;
    tracing::info!("Found {} books", titles.len());

    if settings.wants_json() {
        Ok(format!("{}\n", serde_json::to_string_pretty(&titles)?))
    } else {
        Ok(report::books_report(&titles))
    }
}

/// The requested book's progress, as a report or the JSON plot columns.
fn progress_output(settings: &Settings) -> Result<String> {
    let series = load_series(settings)?;

    if settings.wants_json() {
        Ok(format!("{}\n", series.plot_data().to_json()?))
    } else {
        let summary = ProgressCalculator::summarize(&series);
        Ok(report::progress_report(&series, &summary))
    }
}

fn run_chart(settings: &Settings) -> Result<()> {
    let series = load_series(settings)?;
    let summary = ProgressCalculator::summarize(&series);
    let charts = BookCharts::build(&series, &DensityConfig::default());
    if charts.available() == 0 {
        tracing::warn!("No chart could be built for {}", series.book_title);
    }

    App::new(&settings.theme).run(&series, &charts, &summary)?;
    Ok(())
}

fn load_series(settings: &Settings) -> Result<ProgressSeries> {
    let title = settings
        .book
        .as_deref()
        .map(str::trim)
        .ok_or_else(|| anyhow!("--book is required for the {} view", settings.view))?;

    let series = get_progress_with(
        &settings.file,
        title,
        settings.book_length,
        settings.month_table(),
    )?;
    tracing::info!(
        "Loaded {} progress points for {} (length {})",
        series.len(),
        series.book_title,
        series.book_length
    );
    Ok(series)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
