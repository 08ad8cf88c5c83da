//! Categorization report
//!
//! Prints the band and slot allocation each nation in a snapshot resolves to,
//! for checking a banding table before running recommendations.

use std::path::PathBuf;

use alliance_aid::categorize::{Category, Categorizer};
use alliance_aid::core::config::EngineConfig;
use alliance_aid::core::types::AllianceId;
use alliance_aid::snapshot::Snapshot;
use clap::{Parser, ValueEnum};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Parser, Debug)]
#[command(name = "categorize_nations")]
#[command(about = "Show the slot allocation every nation in a snapshot resolves to")]
struct Args {
    /// Snapshot JSON file
    #[arg(long)]
    snapshot: PathBuf,

    /// Engine configuration TOML (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only show this alliance
    #[arg(long)]
    alliance: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Row {
    id: u64,
    name: String,
    group_id: u64,
    technology: f64,
    infrastructure: f64,
    category: String,
    send_cash: u8,
    send_tech: u8,
    get_cash: u8,
    get_tech: u8,
    external: u8,
    send_priority: u8,
    receive_priority: u8,
    over_limit: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("alliance_aid=warn")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load_from_file(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config {:?}: {}", path, e);
            eprintln!("Using default configuration");
            EngineConfig::default()
        }),
        None => EngineConfig::default(),
    };

    let snapshot = match Snapshot::load(&args.snapshot) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Failed to load snapshot {:?}: {}", args.snapshot, e);
            std::process::exit(1);
        }
    };

    let categorizer = Categorizer::new(&config);
    let rows: Vec<Row> = snapshot
        .nations
        .iter()
        .filter(|n| args.alliance.map_or(true, |a| n.group_id == AllianceId(a)))
        .map(|nation| {
            let categorized = categorizer.categorize_nation(nation);
            let category = match &categorized.category {
                Category::Persisted => "persisted".to_string(),
                Category::Band(name) => name.clone(),
                Category::Unbanded => "unbanded".to_string(),
            };
            Row {
                id: nation.id.0,
                name: nation.name.clone(),
                group_id: nation.group_id.0,
                technology: nation.technology,
                infrastructure: nation.infrastructure,
                category,
                send_cash: categorized.slots.send_cash,
                send_tech: categorized.slots.send_tech,
                get_cash: categorized.slots.get_cash,
                get_tech: categorized.slots.get_tech,
                external: categorized.slots.external,
                send_priority: categorized.slots.send_priority,
                receive_priority: categorized.slots.receive_priority,
                over_limit: categorized.over_limit(),
            }
        })
        .collect();

    if args.format == OutputFormat::Json {
        match serde_json::to_string_pretty(&rows) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize report: {}", e),
        }
        return;
    }

    println!(
        "{:>8} {:<24} {:>8} {:>10} {:>10} {:<12} {:>3} {:>3} {:>3} {:>3} {:>3}  prio",
        "id", "name", "alliance", "tech", "infra", "category", "SC", "ST", "GC", "GT", "EX"
    );
    for row in &rows {
        println!(
            "{:>8} {:<24} {:>8} {:>10.2} {:>10.2} {:<12} {:>3} {:>3} {:>3} {:>3} {:>3}  {}/{}{}",
            row.id,
            row.name,
            row.group_id,
            row.technology,
            row.infrastructure,
            row.category,
            row.send_cash,
            row.send_tech,
            row.get_cash,
            row.get_tech,
            row.external,
            row.send_priority,
            row.receive_priority,
            if row.over_limit { "  OVER LIMIT" } else { "" }
        );
    }
}
