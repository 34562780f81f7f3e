//! Roster check harness.
//!
//! Loads a roster data directory, replays both branches, and prints a
//! per-branch summary with canonical state hashes. Optionally lists the
//! branch's units, or prints one unit view, one profile, a member search
//! or the branch timeline.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use roster_engine::domain::Branch;
use roster_engine::profile::Profile;
use roster_engine::ranks::units;
use roster_engine::views::UnitView;
use roster_runtime::config::RosterConfig;
use roster_runtime::loader::load_roster;
use roster_runtime::source::DirectorySource;

#[derive(Parser)]
#[command(
    name = "roster_check",
    about = "Replay a roster data directory and report the projected state"
)]
struct Cli {
    /// Data root holding base/, logs/ and usernames.json
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Layout file (TOML). Defaults to <data>/roster.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Branch queried by --unit, --profile, --search and --timeline
    #[arg(long, default_value = "CCA")]
    branch: Branch,

    /// List the units selectable with --unit
    #[arg(long)]
    units: bool,

    /// Print the rank grouping of a unit (COMMAND for the command view)
    #[arg(long)]
    unit: Option<String>,

    /// Print the profile of an identity
    #[arg(long)]
    profile: Option<String>,

    /// Print members whose username contains this text
    #[arg(long)]
    search: Option<String>,

    /// Print the branch timeline, newest first
    #[arg(long)]
    timeline: bool,

    /// Exit non-zero when any source had to be skipped
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.data.join("roster.toml"));
    let config = match RosterConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[FAIL] {}", e);
            return ExitCode::FAILURE;
        }
    };

    let source = DirectorySource::new(&cli.data, config.clone());
    let report = load_roster(&source, &config);
    let roster = &report.roster;

    for branch in Branch::ALL {
        println!(
            "[{}] members={}, events={}, hash={}",
            branch,
            roster.state(branch).len(),
            roster.events(branch).len(),
            roster.state_hash(branch)
        );
    }
    for warning in &report.warnings {
        println!("[WARN] {}", warning);
    }

    if cli.units {
        println!("Units ({}): {}", cli.branch, units(cli.branch).join(", "));
    }

    if let Some(unit) = &cli.unit {
        print_unit_view(unit, &roster.unit_view(cli.branch, unit));
    }

    if let Some(identity) = &cli.profile {
        print_profile(&roster.profile(cli.branch, identity));
    }

    if let Some(term) = &cli.search {
        let hits = roster.search(cli.branch, term);
        if hits.is_empty() {
            println!("No users found matching {:?}.", term.trim());
        }
        for hit in hits {
            println!("{}  [{}]", hit.label, hit.identity);
        }
    }

    if cli.timeline {
        let lines = roster.timeline(cli.branch, None);
        if lines.is_empty() {
            println!("No events found for this branch.");
        }
        for line in lines {
            println!("{}", line);
        }
    }

    if cli.strict && !report.warnings.is_empty() {
        println!("[FAIL] {} source(s) skipped.", report.warnings.len());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn print_unit_view(unit: &str, view: &UnitView) {
    match view {
        UnitView::NoMembers { unit } => println!("No members found in {}.", unit),
        UnitView::NoCommandUnits => println!("No command units found."),
        UnitView::Ranks { groups } => {
            println!("== {}", unit);
            for group in groups {
                println!("{}", group.rank);
                for entry in &group.entries {
                    println!("  {}  [{}]", entry.label, entry.identity);
                }
            }
        }
    }
}

fn print_profile(profile: &Profile) {
    match &profile.member {
        Some(card) => {
            println!("{}", card.display_name);
            println!("User ID: {}", profile.identity);
            println!("Division: {}", card.division_label);
            println!("Rank: {}", card.rank_name);
        }
        None => {
            println!("Unknown user");
            println!("User ID: {}", profile.identity);
            println!("Division: not found in current state");
            println!("Rank: n/a");
        }
    }
    println!(
        "Past usernames: {}",
        profile.past_usernames.as_deref().unwrap_or("n/a")
    );
    if profile.events.is_empty() {
        println!("No events recorded for this user in this branch.");
    }
    for line in &profile.events {
        println!("  {}", line);
    }
}
