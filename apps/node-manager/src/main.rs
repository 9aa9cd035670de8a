mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use node_manager::{LookupMode, Service};
use serde::Serialize;

use crate::config::AppConfig;

/// Node Manager - maps cluster nodes onto the virtual machines backing them
#[derive(Parser)]
#[command(name = "node-manager")]
#[command(about = "Node Manager - maps cluster nodes onto the virtual machines backing them")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration and exit
    Check,
    /// Register the configured cluster nodes and export what was discovered
    List {
        /// Only export nodes under this endpoint
        #[arg(long)]
        endpoint: Option<String>,
        /// Only export nodes under this location (requires --endpoint)
        #[arg(long)]
        location: Option<String>,
    },
    /// Discover a single node and print its record
    Discover {
        /// Hardware UUID in the inventory layout, or a node name with --by-name
        node_id: String,
        /// Look the node up by name instead of UUID
        #[arg(long)]
        by_name: bool,
    },
    /// Register the configured cluster nodes, rediscover them all and report
    Refresh,
}

#[derive(Serialize)]
struct RefreshEntry {
    uuid: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init_logging(&config.logging, cli.verbose)?;

    if cli.print_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(());
    }

    tracing::info!("Node Manager starting");

    match cli.command.unwrap_or(Commands::List {
        endpoint: None,
        location: None,
    }) {
        Commands::Check => check_config(&config),
        Commands::List { endpoint, location } => {
            let service = build_service(&config);
            register_cluster_nodes(&service, &config).await;
            list_nodes(&service, endpoint.as_deref(), location.as_deref())
        }
        Commands::Discover { node_id, by_name } => {
            let service = build_service(&config);
            let mode = if by_name {
                LookupMode::ByName
            } else {
                LookupMode::ByUuid
            };
            discover(&service, &node_id, mode).await
        }
        Commands::Refresh => {
            let service = build_service(&config);
            register_cluster_nodes(&service, &config).await;
            refresh(&service).await
        }
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration is valid");
    println!("{}", config.to_pretty_json()?);
    Ok(())
}

fn build_service(config: &AppConfig) -> Service {
    let inventory = Arc::new(static_inventory_plugin::Service::from_config(
        &config.static_inventory,
    ));
    tracing::info!(machines = inventory.len(), "Static inventory ready");
    Service::new(&config.node_manager, inventory)
}

/// Feed the configured cluster nodes through the registration front door.
/// Failures are logged and do not stop the remaining nodes.
async fn register_cluster_nodes(service: &Service, config: &AppConfig) {
    for node in &config.cluster_nodes {
        if let Err(e) = service.register_node(node).await {
            tracing::warn!(node_name = %node.name, error = %e, "Failed to register cluster node");
        }
    }
}

fn list_nodes(service: &Service, endpoint: Option<&str>, location: Option<&str>) -> Result<()> {
    let nodes = service
        .list_nodes(endpoint, location)
        .context("failed to export nodes")?;
    println!("{}", serde_json::to_string_pretty(&nodes)?);
    Ok(())
}

async fn discover(service: &Service, node_id: &str, mode: LookupMode) -> Result<()> {
    let record = service
        .discover_node(node_id, mode)
        .await
        .with_context(|| format!("failed to discover node {node_id}"))?;
    println!("{}", serde_json::to_string_pretty(&*record)?);
    Ok(())
}

async fn refresh(service: &Service) -> Result<()> {
    let entries: Vec<RefreshEntry> = service
        .refresh_registered()
        .await
        .into_iter()
        .map(|outcome| RefreshEntry {
            uuid: outcome.uuid.to_string(),
            ok: outcome.result.is_ok(),
            error: outcome.result.err().map(|e| e.to_string()),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    tracing::info!(stats = ?service.stats(), "Refresh finished");
    Ok(())
}
