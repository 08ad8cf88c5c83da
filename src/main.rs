//! Alliance Aid - Entry Point
//!
//! Loads a nation/offer snapshot and an optional engine configuration, runs
//! the recommendation engine for the requested alliances and prints the
//! results.

use std::path::PathBuf;

use alliance_aid::coordinator::recommend_for_groups;
use alliance_aid::core::config::EngineConfig;
use alliance_aid::core::error::Result;
use alliance_aid::core::types::AllianceId;
use alliance_aid::recommend::GenerationOutput;
use alliance_aid::snapshot::Snapshot;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Full generation output as pretty JSON
    Json,
    /// One line per recommendation plus drift and warnings
    Text,
}

/// Alliance Aid - propose aid pairings for an alliance
#[derive(Parser, Debug)]
#[command(name = "alliance-aid")]
#[command(about = "Generate aid recommendations from a nation/offer snapshot")]
struct Args {
    /// Snapshot JSON file ({"nations": [...], "offers": [...]})
    #[arg(long)]
    snapshot: PathBuf,

    /// Engine configuration TOML (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Alliance to process; repeat for several. Defaults to every alliance in the snapshot
    #[arg(long = "alliance", short = 'a')]
    alliances: Vec<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "alliance_aid=debug" } else { "alliance_aid=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::default(),
    };
    let snapshot = Snapshot::load(&args.snapshot)?;

    let alliances: Vec<AllianceId> = if args.alliances.is_empty() {
        snapshot.alliances()
    } else {
        args.alliances.iter().copied().map(AllianceId).collect()
    };
    tracing::info!(
        "Loaded {} nations and {} offers; processing {} alliances",
        snapshot.nations.len(),
        snapshot.offers.len(),
        alliances.len()
    );

    let mut outputs = Vec::new();
    for (alliance, result) in recommend_for_groups(&snapshot, &config, &alliances) {
        match result {
            Ok(output) => outputs.push(output),
            Err(err) => tracing::error!("Alliance {} failed: {}", alliance, err),
        }
    }

    match args.format {
        OutputFormat::Text => {
            for output in &outputs {
                print_text(output);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outputs)?),
    }

    Ok(())
}

fn print_text(output: &GenerationOutput) {
    println!("=== {} ===", output.summary());
    for rec in &output.recommendations {
        println!(
            "  [tier {}] {} -> {}: {}",
            rec.tier as u8, rec.sender.name, rec.recipient.name, rec.reason
        );
    }

    let idle = output.available_slots.total();
    if idle > 0 {
        println!("  {} idle slot entries", idle);
    }
    for overflow in &output.mismatched_offers.slot_overflows {
        println!(
            "  drift: {} has {} active {} offers for {} slots",
            overflow.name,
            overflow.actual,
            overflow.kind.label(),
            overflow.configured
        );
    }
    for misuse in &output.mismatched_offers.external_misuse {
        println!(
            "  external misuse: {} holds {} external slots with {} tracked offers over {} tracked slots",
            misuse.name, misuse.external_slots, misuse.tracked_offers, misuse.tracked_capacity
        );
    }
    for warning in &output.warnings {
        println!("  warning: {}", warning);
    }
}
