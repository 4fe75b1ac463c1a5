use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use conflict_engine::{
    find_all_conflicts, find_conflict, overlap_minutes, read_snapshot, time_specs_overlap,
    Conflict, ScheduleEntry, TimeSpec,
};

/// Exit code when `check` finds a conflict.
const EXIT_CONFLICT: u8 = 1;
/// Exit code for unreadable input.
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(
    name = "schedguard",
    version,
    about = "Check teacher schedule conflicts in free-form class period strings"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report whether two time-specs overlap
    Overlap {
        /// First time-spec (e.g. "MWF 07:30-08:30")
        a: String,
        /// Second time-spec
        b: String,
        /// Print parsed forms and overlap minutes as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how a time-spec is read
    Parse {
        /// Time-spec to parse
        spec: String,
    },
    /// Check a proposed assignment against a JSON snapshot of existing entries
    Check {
        /// Snapshot file (use - for stdin)
        #[arg(long)]
        snapshot: PathBuf,
        /// Teacher being assigned
        #[arg(long)]
        teacher: String,
        /// Proposed time-spec
        #[arg(long)]
        spec: String,
        /// Subject label for the proposed entry
        #[arg(long, default_value = "")]
        subject: String,
        /// Class the proposed entry belongs to
        #[arg(long, default_value = "")]
        owner: String,
        /// Owner context to skip (defaults to --owner when that is set)
        #[arg(long)]
        exclude: Option<String>,
        /// Report every conflict instead of the first
        #[arg(long)]
        all: bool,
    },
}

#[derive(Serialize)]
struct OverlapReport<'a> {
    a: &'a str,
    b: &'a str,
    overlap: bool,
    parsed_a: Option<TimeSpec>,
    parsed_b: Option<TimeSpec>,
    overlap_minutes: Option<u32>,
}

#[derive(Serialize)]
struct ConflictReport<'a> {
    #[serde(flatten)]
    conflict: &'a Conflict,
    message: String,
}

impl<'a> From<&'a Conflict> for ConflictReport<'a> {
    fn from(conflict: &'a Conflict) -> Self {
        Self {
            conflict,
            message: conflict.message(),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Overlap { a, b, json } => {
            let overlap = time_specs_overlap(&a, &b);
            if json {
                let report = OverlapReport {
                    a: &a,
                    b: &b,
                    overlap,
                    parsed_a: TimeSpec::parse(&a),
                    parsed_b: TimeSpec::parse(&b),
                    overlap_minutes: overlap_minutes(&a, &b),
                };
                print_json(&report)?;
            } else {
                println!("{overlap}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Parse { spec } => {
            print_json(&TimeSpec::parse(&spec))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check {
            snapshot,
            teacher,
            spec,
            subject,
            owner,
            exclude,
            all,
        } => {
            let existing = load(&snapshot)?;
            let exclude = exclude.or_else(|| (!owner.is_empty()).then(|| owner.clone()));
            let candidate = ScheduleEntry::new(teacher, spec)
                .with_subject(subject)
                .with_owner(owner);

            tracing::info!(
                teacher = candidate.teacher_id(),
                spec = candidate.time_spec(),
                existing = existing.len(),
                "checking assignment"
            );

            let conflicts = if all {
                find_all_conflicts(&candidate, &existing, exclude.as_deref())
            } else {
                find_conflict(&candidate, &existing, exclude.as_deref())
                    .into_iter()
                    .collect()
            };

            let reports: Vec<ConflictReport> = conflicts.iter().map(ConflictReport::from).collect();
            if all {
                print_json(&serde_json::json!({ "conflicts": reports }))?;
            } else {
                print_json(&serde_json::json!({ "conflict": reports.first() }))?;
            }

            if conflicts.is_empty() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(EXIT_CONFLICT))
            }
        }
    }
}

fn load(path: &Path) -> Result<Vec<ScheduleEntry>> {
    if path.as_os_str() == "-" {
        return read_snapshot(io::stdin().lock()).context("failed to read snapshot from stdin");
    }
    let file = File::open(path)
        .with_context(|| format!("failed to open snapshot '{}'", path.display()))?;
    read_snapshot(BufReader::new(file))
        .with_context(|| format!("failed to read snapshot '{}'", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}
