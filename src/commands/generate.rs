use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tempfile::NamedTempFile;
use timetable_core::build_events;
use timetable_core::config::Overrides;
use timetable_core::constants::OUTPUT_FILE_NAME;
use timetable_core::ics::generate_calendar;

use crate::render::Render;

/// Build the calendar and write `schedule.ics` into `output_dir`.
///
/// Returns the path written.
pub fn run(settings_path: &Path, overrides: &Overrides, output_dir: &Path) -> Result<PathBuf> {
    let (options, schedule) = super::load(settings_path, overrides)?;

    let outcome = build_events(&schedule, &options);
    let ics = generate_calendar(&outcome.events)?;

    let output_path = output_dir.join(OUTPUT_FILE_NAME);
    write_atomically(&output_path, &ics)
        .with_context(|| format!("Error writing to '{}'", output_path.display()))?;

    tracing::info!("Successfully wrote calendar to '{}'", output_path.display());

    println!(
        "{}",
        format!(
            "  Wrote {} event(s) to {}",
            outcome.events.len(),
            output_path.display()
        )
        .green()
    );
    if outcome.report.skipped_entries() > 0 || outcome.report.disabled_plans > 0 {
        println!("  {}", outcome.report.render());
    }

    Ok(output_path)
}

/// Write through a temp file in the same directory, then rename over `path`.
///
/// A failure part-way leaves any previous file untouched and no partial output.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
