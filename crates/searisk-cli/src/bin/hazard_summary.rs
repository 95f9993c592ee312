//! Print an overview of a hazard zone file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use searisk_cli::init_tracing;
use searisk_core::{HazardRegistry, Severity};

/// Summarize hazard zones by severity and type
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Hazard zone file
    #[arg(long, default_value = "data/hazardous_zones.json")]
    hazards: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Also list every active zone
    #[arg(long)]
    zones: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing("searisk_core=warn")?;

    let registry = HazardRegistry::try_load(&args.hazards)
        .with_context(|| format!("failed to load {}", args.hazards.display()))?;
    let summary = registry.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Hazard zones: {} ({} active)", summary.total_hazards, summary.total_active_hazards);
    println!("Last updated: {}", summary.last_updated);
    println!();
    println!("By severity:");
    for severity in [Severity::High, Severity::Medium, Severity::Low] {
        let count = summary.by_severity.get(&severity).copied().unwrap_or(0);
        println!("  {:<8} {}", severity.as_str(), count);
    }
    println!();
    println!("By type:");
    for (kind, count) in &summary.by_type {
        println!("  {:<20} {}", kind, count);
    }

    if args.zones {
        println!();
        println!("Active zones:");
        for zone in registry.active_zones() {
            println!(
                "  {:<8} {:<7} {:<32} {} incident(s)",
                zone.id,
                zone.severity.as_str(),
                zone.name,
                zone.reported_incidents
            );
        }
    }

    Ok(())
}
