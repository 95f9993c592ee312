//! Plan a hazard-aware sea route between two ports.
//!
//! Generates the direct route, evaluates it against the hazard registry and
//! detours around the worst zones when needed.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use searisk_cli::display::route_summary;
use searisk_cli::{build_generator, find_port, init_tracing, parse_point, PORTS};
use searisk_core::{export_feature, format_safety_report, HazardRegistry, LonLat, RerouteOrchestrator};

/// Generate a safe maritime route and print its safety report
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Origin preset port name (see --list-ports)
    #[arg(long, default_value = "Le Havre", conflicts_with = "origin")]
    from: String,

    /// Destination preset port name
    #[arg(long, default_value = "Tianjin", conflicts_with = "destination")]
    to: String,

    /// Explicit origin as lon,lat
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    origin: Option<LonLat>,

    /// Explicit destination as lon,lat
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    destination: Option<LonLat>,

    /// Hazard zone file
    #[arg(long, default_value = "data/hazardous_zones.json")]
    hazards: PathBuf,

    /// Sea router base URL; omit for the offline straight-line generator
    #[arg(long)]
    router_url: Option<String>,

    /// Router request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Reroute iterations after the direct route
    #[arg(long, default_value_t = 3)]
    max_attempts: usize,

    /// Write the route and verdict as a GeoJSON Feature
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Print the preset ports and exit
    #[arg(long)]
    list_ports: bool,
}

fn resolve(explicit: Option<LonLat>, preset: &str) -> anyhow::Result<(LonLat, String)> {
    if let Some(point) = explicit {
        return Ok((point, format!("[{}, {}]", point[0], point[1])));
    }
    match find_port(preset) {
        Some(port) => Ok((port.location, port.label())),
        None => bail!("unknown port '{}'; use --list-ports or pass lon,lat", preset),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing("searisk_core=info")?;

    if args.list_ports {
        for port in PORTS {
            println!("{:<24} {:>10.4} {:>9.4}", port.label(), port.location[0], port.location[1]);
        }
        return Ok(());
    }

    let (origin, origin_label) = resolve(args.origin, &args.from)?;
    let (destination, destination_label) = resolve(args.destination, &args.to)?;

    let registry = HazardRegistry::load(&args.hazards);
    let generator = build_generator(args.router_url.as_deref(), Duration::from_secs(args.timeout))
        .context("failed to set up path generator")?;

    println!("Route: {} -> {}", origin_label, destination_label);
    println!("Hazard zones loaded: {}", registry.len());
    println!();

    let outcome = RerouteOrchestrator::new(&registry, generator).generate_safe_route(
        origin,
        destination,
        args.max_attempts,
    );

    let Some(route) = outcome.route else {
        println!("{}", format_safety_report(&outcome.verdict));
        bail!("failed to generate route");
    };

    println!("{}", route_summary(&route));
    println!();
    println!("{}", format_safety_report(&outcome.verdict));

    if let Some(waypoint) = outcome.verdict.waypoint_used {
        println!();
        println!("Safety waypoint added at: [{:.4}, {:.4}]", waypoint[0], waypoint[1]);
    }
    tracing::debug!(
        attempts = outcome.stats.attempts,
        candidates = outcome.stats.candidates_tried,
        generator_calls = outcome.stats.generator_calls,
        "Search finished"
    );

    if let Some(path) = args.geojson {
        let feature = export_feature(&route, Some(&outcome.verdict));
        let body = serde_json::to_string_pretty(&feature)?;
        std::fs::write(&path, body)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!();
        println!("Route saved to {}", path.display());
    }

    Ok(())
}
