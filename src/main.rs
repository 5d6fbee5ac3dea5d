use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wildfire_dispatch::{
    config::{Config, ObservabilityConfig},
    create_coordinator,
    models::{Coordinates, NewIncident},
    DispatchCoordinator,
};

#[derive(Parser)]
#[command(name = "wildfire-dispatch")]
#[command(about = "Wildfire incident dispatch and routing", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file layered over the built-in defaults
    /// (falls back to $WILDFIRE_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted dispatch scenario against the seed data
    Demo,

    /// Compute the shortest route between two regions
    Route {
        #[arg(short, long)]
        from: String,

        #[arg(short, long)]
        to: String,
    },

    /// Rank regions for a response leaving from a base.
    /// Incidents are given as REGION:SEVERITY pairs.
    Plan {
        #[arg(short, long)]
        base: String,

        #[arg(short, long = "incident", value_name = "REGION:SEVERITY")]
        incidents: Vec<String>,
    },

    /// Show region connections and graph statistics
    Map,

    /// List regions by risk priority
    Regions,

    /// Show coordinator counters
    Status,

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(Some(path)),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    init_tracing(&config.observability);

    tracing::debug!("Starting wildfire-dispatch v{}", env!("CARGO_PKG_VERSION"));

    let mut coordinator = create_coordinator(&config).context("Failed to build coordinator from seed")?;

    match cli.command {
        Commands::Demo => run_demo(&mut coordinator)?,

        Commands::Route { from, to } => {
            let route = coordinator.shortest_path(&from, &to)?;
            print_json(&route)?;
        }

        Commands::Plan { base, incidents } => {
            for spec in &incidents {
                let (region, severity) = parse_incident_arg(spec)?;
                let coordinates = coordinator
                    .graph()
                    .coordinates(&region)
                    .unwrap_or(Coordinates::new(0.0, 0.0));
                coordinator.create_incident(NewIncident::new(region, severity, coordinates))?;
            }
            let plan = coordinator.plan_response(&base)?;
            print_json(&plan)?;
        }

        Commands::Map => {
            print_json(&coordinator.graph().connections())?;
            print_json(&coordinator.graph().stats())?;
        }

        Commands::Regions => print_json(&coordinator.regions_by_priority())?,

        Commands::Status => print_json(&coordinator.status())?,

        Commands::Config => {
            let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
            println!("{}", rendered);
        }
    }

    Ok(())
}

fn init_tracing(config: &ObservabilityConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("wildfire_dispatch={}", config.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_incident_arg(spec: &str) -> anyhow::Result<(String, i64)> {
    let (region, severity) = spec
        .rsplit_once(':')
        .with_context(|| format!("Expected REGION:SEVERITY, got '{}'", spec))?;
    let severity = severity
        .trim()
        .parse()
        .with_context(|| format!("Invalid severity in '{}'", spec))?;
    Ok((region.trim().to_string(), severity))
}

/// Scripted walk through the main operations using the seed data
fn run_demo(coordinator: &mut DispatchCoordinator) -> anyhow::Result<()> {
    let reports = [
        ("Mata Atlantica Sul", 8, (-23.5505, -46.6333), "Large forest fire"),
        ("Cerrado Central", 5, (-15.7942, -47.8822), "Controlled burn out of control"),
        ("Amazonia Norte", 10, (-3.1190, -60.0217), "Critical emergency"),
    ];

    for (region, severity, (lat, lon), description) in reports {
        coordinator.create_incident(
            NewIncident::new(region, severity, Coordinates::new(lat, lon)).with_description(description),
        )?;
    }

    for _ in 0..2 {
        match coordinator.dispatch_next() {
            Ok(dispatch) => print_json(&dispatch)?,
            Err(err) if err.is_negative_outcome() => {
                tracing::info!(reason = %err, "Nothing dispatched")
            }
            Err(err) => return Err(err.into()),
        }
    }

    coordinator.record_actions(1, ["Team deployed", "Perimeter established", "Suppression started"])?;

    let active: Vec<_> = coordinator.active_incidents().collect();
    print_json(&active)?;
    print_json(&coordinator.region_report(None))?;
    print_json(&coordinator.team_history(1)?)?;
    print_json(&coordinator.status())?;
    print_json(&coordinator.shortest_path("Mata Atlantica Sul", "Amazonia Norte")?)?;
    print_json(&coordinator.plan_response("Cerrado Central")?)?;
    print_json(&coordinator.graph().stats())?;

    Ok(())
}
