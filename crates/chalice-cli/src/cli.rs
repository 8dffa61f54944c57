//! CLI argument definitions for the chalice companion runtime.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use clap::{Parser, Subcommand};

/// chalice -- companion runtime for the chalice watchface.
#[derive(Parser)]
#[command(
    name = "chalice",
    version,
    about = "chalice -- watchface companion runtime",
    long_about = "Companion runtime for the chalice watchface: drives the configuration \
                  round trip between the host lifecycle, the configuration webview, and \
                  the paired watch."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate a full configuration round trip against a loopback watch.
    Simulate {
        /// Percent-encoded JSON response to feed in as the webview result.
        #[arg(long, conflicts_with = "color")]
        response: Option<String>,

        /// Face color to configure, as #RRGGBB (encoded into a response).
        #[arg(long, default_value = "#ffffff")]
        color: String,
    },

    /// List the watch's app-message key space.
    Keys,
}
