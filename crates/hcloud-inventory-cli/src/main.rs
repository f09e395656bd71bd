//! ansible-hcloud-inventory
//!
//! Ansible dynamic inventory script for Hetzner Cloud. Servers are grouped by
//! datacenter location and keyed by the reverse-DNS name of their public IPv4
//! address; server labels become host variables.

use std::sync::Arc;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use hcloud_inventory::InventoryCollector;
use hcloud_inventory_client::HcloudClient;
use hcloud_inventory_exec::LocalExecutor;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

use cli::Mode;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse arguments before doing any work
    let args = cli::parse();

    // Logs go to stderr; stdout is reserved for the inventory
    init_tracing(args.verbose);

    let env = |key: &str| std::env::var(key).ok();
    let settings = config::resolve(&env, &LocalExecutor::new())
        .await
        .wrap_err("failed to resolve Hetzner Cloud credentials")?;
    debug!(
        source = ?settings.credentials.source,
        endpoint = %settings.client.endpoint,
        "credentials resolved"
    );

    let client = HcloudClient::with_options(&settings.credentials.token, &settings.client)
        .wrap_err("failed to create Hetzner Cloud client")?;
    let inventory = InventoryCollector::new(Arc::new(client))
        .collect()
        .await
        .wrap_err("failed to build inventory")?;

    match args.mode() {
        Mode::List => println!("{}", inventory.to_json()?),
        Mode::Ini => print!("{}", inventory.to_ini()),
        Mode::Host(hostname) => match inventory.host_json(&hostname)? {
            Some(vars) => println!("{vars}"),
            None => debug!(%hostname, "host not in inventory"),
        },
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
