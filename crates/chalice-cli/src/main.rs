//! CLI entry point for the chalice companion runtime.
//!
//! This binary provides the `chalice` command with subcommands for
//! simulating the configuration round trip and inspecting the watch's
//! message key space.

mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chalice_bridge::{ConfigBridge, percent_encode};
use chalice_host::{LifecycleBus, LifecycleEvent, UrlOpener};
use chalice_watch::{LoopbackWatch, MessageKey, SettingsStore};

use cli::{Cli, Commands};

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { response, color } => cmd_simulate(response, color).await,
        Commands::Keys => cmd_keys(),
    }
}

// ---------------------------------------------------------------------------
// Subcommand: simulate
// ---------------------------------------------------------------------------

/// A `UrlOpener` that only logs; there is no real browser in a simulation.
struct LoggingOpener;

impl UrlOpener for LoggingOpener {
    fn open_url(&self, url: &str) {
        info!(url, "host would open configuration webview");
    }
}

async fn cmd_simulate(response: Option<String>, color: String) -> Result<()> {
    let response = match response {
        Some(encoded) => encoded,
        None => {
            let mut payload = serde_json::Map::new();
            payload.insert(MessageKey::ColorFace.name().to_string(), json!(color));
            percent_encode(&serde_json::to_string(&payload)?)
        }
    };

    let bus = LifecycleBus::new(16);
    let store = SettingsStore::new();
    let watch = Arc::new(LoopbackWatch::new(store.clone()));
    let bridge = Arc::new(ConfigBridge::new(Arc::new(LoggingOpener), watch));

    let events = bus.subscribe();
    let runner = {
        let bridge = Arc::clone(&bridge);
        tokio::spawn(async move { bridge.run(events).await })
    };
    let mut changes = store.subscribe();

    info!("simulating host lifecycle");
    bus.publish(LifecycleEvent::ready())
        .context("publish ready")?;
    bus.publish(LifecycleEvent::show_configuration())
        .context("publish showConfiguration")?;
    bus.publish(LifecycleEvent::webview_closed(response))
        .context("publish webviewclosed")?;

    // Wait for the settings write; a NAK or decode fault only logs, so give
    // the loop a moment either way.
    let _ = tokio::time::timeout(Duration::from_secs(1), changes.recv()).await;

    drop(bus);
    runner.await.context("bridge loop panicked")?;

    println!("ready:      {}", bridge.is_ready());
    println!("face color: #{:06x}", store.face_color());
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: keys
// ---------------------------------------------------------------------------

fn cmd_keys() -> Result<()> {
    for key in MessageKey::ALL {
        println!("{:>3}  {}", key as u32, key.name());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
