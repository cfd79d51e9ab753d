use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use timetable_core::build_events;
use timetable_core::config::Overrides;

use crate::render::Render;

pub fn run(settings_path: &Path, overrides: &Overrides) -> Result<()> {
    let (options, schedule) = super::load(settings_path, overrides)?;
    let outcome = build_events(&schedule, &options);

    println!(
        "{}",
        format!(
            "📅 {} → {} ({})",
            options.start_date,
            options.end_date,
            options.timezone.name()
        )
        .bold()
    );

    let mut current_plan: Option<&str> = None;
    for event in &outcome.events {
        if current_plan != Some(event.plan_name.as_str()) {
            println!("\n  {}", event.plan_name.cyan());
            current_plan = Some(event.plan_name.as_str());
        }
        println!("   {}", event.render());
    }

    if outcome.events.is_empty() {
        println!("   {}", "No events".dimmed());
    }

    println!("\n  {}", outcome.report.render());

    Ok(())
}
