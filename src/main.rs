mod commands;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use timetable_core::config::Overrides;
use timetable_core::constants::DEFAULT_SETTINGS_FILE;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "timetable-ics")]
#[command(about = "Convert a class schedule profile into a weekly-recurring .ics calendar")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Running without a subcommand is the same as `generate`
    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Write schedule.ics (default)
    Generate(GenerateArgs),
    /// Print the events that would be written, without writing anything
    List(ScheduleArgs),
}

#[derive(Args, Clone)]
struct GenerateArgs {
    #[command(flatten)]
    schedule: ScheduleArgs,

    /// Directory to write schedule.ics into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Args, Clone)]
struct ScheduleArgs {
    /// Schedule profile (overrides SelectedProfile from settings)
    #[arg(value_name = "PROFILE", conflicts_with = "profile")]
    profile_path: Option<PathBuf>,

    /// Schedule profile (same as the positional argument)
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Settings document
    #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// First date of the calendar (YYYY-MM-DD). Defaults to the date of SingleWeekStartTime
    #[arg(long)]
    start_date: Option<String>,

    /// Last date of the calendar (YYYY-MM-DD). Defaults to June 30 of the following year
    #[arg(long)]
    end_date: Option<String>,

    /// Start of the ignore window (HH:MM, default 19:00)
    #[arg(long)]
    ignore_start: Option<String>,

    /// End of the ignore window (HH:MM, default 22:30)
    #[arg(long)]
    ignore_end: Option<String>,

    /// Comma-separated subject names to leave out
    #[arg(long)]
    ignore_classes: Option<String>,

    /// Overrides SingleWeekStartTime (e.g. "2024-09-01T00:00:00")
    #[arg(long)]
    single_week_start: Option<String>,

    /// IANA time zone for event times (default Asia/Shanghai)
    #[arg(long)]
    timezone: Option<String>,
}

impl ScheduleArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            ignore_start: self.ignore_start.clone(),
            ignore_end: self.ignore_end.clone(),
            ignore_classes: self.ignore_classes.clone(),
            profile: self.profile_path.clone().or_else(|| self.profile.clone()),
            single_week_start: self.single_week_start.clone(),
            timezone: self.timezone.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Generate(cli.generate)) {
        Commands::Generate(args) => commands::generate::run(
            &args.schedule.settings,
            &args.schedule.overrides(),
            &args.output_dir,
        )
        .map(|_| ()),
        Commands::List(args) => commands::list::run(&args.settings, &args.overrides()),
    }
}

/// Log level comes from RUST_LOG when set, otherwise info (debug with -v).
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_generates_with_defaults() {
        let cli = Cli::try_parse_from(["timetable-ics"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.generate.output_dir, PathBuf::from("."));
        assert_eq!(cli.generate.schedule.settings, PathBuf::from("settings.json"));
        assert!(cli.generate.schedule.overrides().profile.is_none());
    }

    #[test]
    fn top_level_flags_apply_to_default_generate() {
        let cli = Cli::try_parse_from([
            "timetable-ics",
            "senior.json",
            "--start-date",
            "2024-09-02",
            "--ignore-classes",
            "晚训,Assembly",
        ])
        .unwrap();

        let overrides = cli.generate.schedule.overrides();
        assert_eq!(overrides.profile, Some(PathBuf::from("senior.json")));
        assert_eq!(overrides.start_date.as_deref(), Some("2024-09-02"));
        assert_eq!(overrides.ignore_classes.as_deref(), Some("晚训,Assembly"));
    }

    #[test]
    fn list_subcommand_takes_profile_flag() {
        let cli =
            Cli::try_parse_from(["timetable-ics", "list", "--profile", "p.json", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.overrides().profile, Some(PathBuf::from("p.json")));
            }
            _ => panic!("expected list subcommand"),
        }
    }

    #[test]
    fn positional_and_flag_profile_conflict() {
        assert!(
            Cli::try_parse_from(["timetable-ics", "generate", "a.json", "--profile", "b.json"])
                .is_err()
        );
    }
}
