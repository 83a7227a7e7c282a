// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use zone_validator::{
    config::ValidatorConfig,
    record::RecordInput,
    record_store::InMemoryRecordStore,
    registry::{RecordType, Registry},
    report::{BatchSummary, RecordReport},
    zone_readiness::ZoneReadinessChecker,
};

/// Validate DNS records before they are written to a zone.
#[derive(Parser)]
#[command(name = "zone-validator")]
#[command(version)]
#[command(about = "Validate DNS resource records against RFC rules and zone contents")]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Configuration file (YAML, or JSON by extension).
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single record and print a JSON report.
    Check(CheckArgs),

    /// Validate every record in a YAML or JSON file.
    ///
    /// Exits with status 1 when any record is invalid.
    Batch(BatchArgs),

    /// Check that a zone has what DNSSEC signing needs.
    ///
    /// Exits with status 1 when the zone is not ready.
    Readiness(ReadinessArgs),

    /// List the record types with a dedicated validator.
    Types,

    /// Print shell completions.
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Args)]
struct CheckArgs {
    /// Record type mnemonic, e.g. AAAA
    #[arg(long = "type", short = 't')]
    record_type: String,

    /// Owner name, relative to --zone or fully qualified
    #[arg(long, short = 'n', default_value = "")]
    name: String,

    /// Record content
    #[arg(long)]
    content: String,

    /// Zone the record belongs to
    #[arg(long, short = 'z')]
    zone: Option<String>,

    /// Zone identifier in the records file
    #[arg(long)]
    zone_id: Option<i64>,

    /// Identifier of the record being edited
    #[arg(long)]
    record_id: Option<i64>,

    #[arg(long)]
    priority: Option<String>,

    #[arg(long)]
    ttl: Option<String>,

    /// Existing zone records (YAML or JSON) used for conflict checks
    #[arg(long)]
    zone_records: Option<PathBuf>,
}

#[derive(Args)]
struct BatchArgs {
    /// Records to validate
    file: PathBuf,

    /// Existing zone records (YAML or JSON) used for conflict checks
    #[arg(long)]
    zone_records: Option<PathBuf>,
}

#[derive(Args)]
struct ReadinessArgs {
    /// Zone records (YAML or JSON)
    #[arg(long)]
    zone_records: PathBuf,

    #[arg(long)]
    zone_id: i64,

    /// Zone name, e.g. example.com
    #[arg(long, short = 'z')]
    zone: String,
}

fn main() -> Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => {
            let registry = build_registry(cli.config.as_deref(), args.zone_records.as_deref())?;
            let input = RecordInput {
                record_type: args.record_type,
                content: args.content,
                name: args.name,
                priority: args.priority,
                ttl: args.ttl,
                default_ttl: None,
                zone: args.zone,
                zone_id: args.zone_id,
                record_id: args.record_id,
            };
            let report = RecordReport::new(&input, &registry.validate(&input));
            print_json(&report)?;
            Ok(exit_code(report.valid))
        }
        Commands::Batch(args) => {
            let registry = build_registry(cli.config.as_deref(), args.zone_records.as_deref())?;
            let records: Vec<RecordInput> = load(&args.file)?;
            info!(path = %args.file.display(), count = records.len(), "Validating record batch");

            let reports: Vec<RecordReport> = records
                .iter()
                .zip(registry.validate_batch(&records))
                .map(|(input, result)| RecordReport::new(input, &result))
                .collect();
            let summary = BatchSummary::from_reports(&reports);
            info!(
                total = summary.total,
                invalid = summary.invalid,
                warnings = summary.warnings,
                "Batch validated"
            );

            print_json(&serde_json::json!({ "summary": summary, "records": reports }))?;
            Ok(exit_code(summary.all_valid()))
        }
        Commands::Readiness(args) => {
            let store = InMemoryRecordStore::from_file(&args.zone_records)?;
            let report =
                ZoneReadinessChecker::new(&store).check_dnssec_readiness(args.zone_id, &args.zone);
            print_json(&report)?;
            if !report.is_ready() {
                eprintln!("{}", report.format_messages());
            }
            Ok(exit_code(report.is_ready()))
        }
        Commands::Types => {
            for record_type in RecordType::ALL {
                println!("{record_type}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "zone-validator",
                &mut std::io::stdout(),
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Initialize logging on stderr so reports on stdout stay machine-readable.
///
/// Respects `RUST_LOG` (default `info`) and `RUST_LOG_FORMAT` (`json` or `text`).
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

fn build_registry(config: Option<&Path>, zone_records: Option<&Path>) -> Result<Registry> {
    let config = match config {
        Some(path) => ValidatorConfig::from_file(path)?,
        None => ValidatorConfig::default(),
    }
    .apply_env_overrides()?;
    debug!(?config, "Configuration resolved");

    Ok(match zone_records {
        Some(path) => {
            let store = InMemoryRecordStore::from_file(path)?;
            Registry::with_store(config, Arc::new(store))
        }
        None => Registry::new(config),
    })
}

/// Read a YAML file, or a JSON file by extension.
fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse JSON {}", path.display()))
    } else {
        serde_yaml::from_str(&raw).with_context(|| format!("Failed to parse YAML {}", path.display()))
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    println!("{text}");
    Ok(())
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
