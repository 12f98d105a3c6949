//! pallasd entry point.
//!
//! This binary only wires the protocol core from `pallas-ircd` to a config
//! file and starts logging; the socket accept loop, TLS, and service bots
//! that a deployed server needs live outside this crate's scope.

use std::path::Path;
use std::sync::Arc;

use pallas_ircd::config::CoreConfig;
use pallas_ircd::graph::Network;
use pallas_ircd::handlers::build_dispatcher;
use pallas_ircd::time::SystemClock;
use tracing::info;

fn resolve_config_path() -> String {
    let mut args = std::env::args().skip(1);
    match args.next() {
        Some(flag) if flag == "-c" || flag == "--config" => args.next().unwrap_or_else(|| {
            eprintln!("Missing path after {}", flag);
            std::process::exit(1);
        }),
        Some(path) => path,
        None => "config.toml".to_string(),
    }
}

fn load_config(path: &str) -> anyhow::Result<CoreConfig> {
    if !Path::new(path).exists() {
        return Ok(CoreConfig::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = resolve_config_path();
    let config = load_config(&config_path)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    info!(
        server = %config.server_name,
        numeric = config.server_numeric,
        "starting pallasd core"
    );

    let network = Network::new(config, Arc::new(SystemClock));
    let _dispatcher = build_dispatcher();

    info!(
        self_server = %network.self_server_name,
        "protocol core ready; no transport attached"
    );

    Ok(())
}
