//! Solar prescription CLI: config loading, catalog construction and
//! subcommand dispatch.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use solar_prescription::catalog::Catalog;
use solar_prescription::config::AppConfig;
use solar_prescription::engine::production::{ArrayOrientation, modeled_capacity_watts};
use solar_prescription::engine::PrescriptionEngine;
use solar_prescription::io::export::{export_appliances_csv, export_monthly_csv};
use solar_prescription::io::request::PrescriptionInput;

#[derive(Parser)]
#[command(name = "solar-prescription")]
#[command(about = "Solar home kit sizing and prescription tool", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prescribe a kit for a request document
    Prescribe {
        /// Request file (TOML, or JSON with a .json extension)
        request: PathBuf,
        /// Print the prescription as JSON
        #[arg(long)]
        json: bool,
        /// Write the appliance breakdown to a CSV file
        #[arg(long)]
        appliances_csv: Option<PathBuf>,
        /// Write the monthly production breakdown to a CSV file
        #[arg(long)]
        monthly_csv: Option<PathBuf>,
    },
    /// List the appliance table
    Appliances,
    /// List the product table
    Products,
    /// Print panel orientation and modeling capacity for a production estimate
    Orientation {
        /// Site latitude in degrees, positive north
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
        /// Kit size in watts
        #[arg(long)]
        kit_watts: u32,
    },
    /// Serve the HTTP API
    #[cfg(feature = "api")]
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_prescribe(
    config: &AppConfig,
    catalog: &Catalog,
    request: &Path,
    json: bool,
    appliances_csv: Option<&Path>,
    monthly_csv: Option<&Path>,
) {
    let resolved = PrescriptionInput::from_path(request)
        .and_then(|input| input.resolve(&config.defaults))
        .unwrap_or_else(|e| fail(e));

    let engine = PrescriptionEngine::new(catalog);
    let prescription = engine.prescribe_resolving(
        &resolved.request,
        &resolved.production,
        resolved.modeled_kit_watts,
    );

    if json {
        match serde_json::to_string_pretty(&prescription) {
            Ok(s) => println!("{s}"),
            Err(e) => fail(e),
        }
    } else {
        println!("{prescription}");
    }

    if let Some(path) = appliances_csv {
        if let Err(e) = export_appliances_csv(&prescription, path) {
            fail(format!("failed to write CSV: {e}"));
        }
        eprintln!("Appliance breakdown written to {}", path.display());
    }
    if let Some(path) = monthly_csv {
        if let Err(e) = export_monthly_csv(&prescription, path) {
            fail(format!("failed to write CSV: {e}"));
        }
        eprintln!("Monthly production written to {}", path.display());
    }
}

fn cmd_appliances(catalog: &Catalog) {
    println!("{:<16} {:>7} {:>7} {:>9}  label", "id", "watts", "hours", "wh/day");
    for spec in catalog.appliances.iter() {
        println!(
            "{:<16} {:>7.1} {:>7.1} {:>9.1}  {}",
            spec.id,
            spec.watts,
            spec.hours_per_day,
            spec.daily_wh(),
            spec.label
        );
    }
}

fn cmd_products(catalog: &Catalog) {
    for (watts, spec) in catalog.products.iter() {
        let info = spec.info(watts);
        let tested = info
            .tested_daily_energy_wh
            .map_or_else(|| "untested".to_string(), |wh| format!("{wh:.0} Wh/day tested"));
        let certified = if info.verasol_certified { ", certified" } else { "" };
        println!(
            "{watts:>5}W  {} {} ({}), battery {}, {tested}{certified}",
            info.brand, info.model, info.kind, info.battery
        );
    }
}

fn cmd_orientation(latitude: f64, kit_watts: u32) {
    if !(-90.0..=90.0).contains(&latitude) {
        fail(format!("latitude must be within [-90, 90], got {latitude}"));
    }
    let o = ArrayOrientation::for_latitude(latitude);
    println!("tilt:       {:.1} deg", o.tilt_deg);
    println!("azimuth:    {:.0} deg", o.azimuth_deg);
    println!("losses:     {:.0} %", o.losses_pct);
    println!("model at:   {} W", modeled_capacity_watts(kit_watts));
}

#[cfg(feature = "api")]
fn cmd_serve(config: &AppConfig, catalog: Catalog, port: Option<u16>) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use solar_prescription::api::{AppState, serve};

    let state = Arc::new(AppState {
        catalog,
        defaults: config.defaults.clone(),
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], port.unwrap_or(config.api.port)));
    let rt = tokio::runtime::Runtime::new()
        .unwrap_or_else(|e| fail(format!("failed to create tokio runtime: {e}")));
    if let Err(e) = rt.block_on(serve(state, addr)) {
        fail(format!("server error on {addr}: {e}"));
    }
}

fn main() {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).unwrap_or_else(|e| fail(e));
    init_logging(&config);

    let catalog = Catalog::load(&config.catalog).unwrap_or_else(|e| fail(e));

    match cli.command {
        Commands::Prescribe {
            request,
            json,
            appliances_csv,
            monthly_csv,
        } => cmd_prescribe(
            &config,
            &catalog,
            &request,
            json,
            appliances_csv.as_deref(),
            monthly_csv.as_deref(),
        ),
        Commands::Appliances => cmd_appliances(&catalog),
        Commands::Products => cmd_products(&catalog),
        Commands::Orientation {
            latitude,
            kit_watts,
        } => cmd_orientation(latitude, kit_watts),
        #[cfg(feature = "api")]
        Commands::Serve { port } => cmd_serve(&config, catalog, port),
    }
}
