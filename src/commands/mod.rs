pub mod generate;
pub mod list;

use std::path::Path;

use anyhow::{Context, Result};
use timetable_core::Schedule;
use timetable_core::config::{GenerateOptions, Overrides, Settings};

/// Settings, resolved options and the schedule profile they point at.
pub fn load(settings_path: &Path, overrides: &Overrides) -> Result<(GenerateOptions, Schedule)> {
    let settings = Settings::load(settings_path)
        .with_context(|| format!("Error reading {}", settings_path.display()))?;

    let options = GenerateOptions::resolve(&settings, overrides)
        .with_context(|| format!("Invalid configuration in {}", settings_path.display()))?;

    let schedule = Schedule::load(&options.profile)
        .with_context(|| format!("Error reading {}", options.profile.display()))?;

    Ok((options, schedule))
}
