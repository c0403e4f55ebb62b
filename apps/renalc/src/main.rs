//! # renalc - Kidney Function Calculator
//!
//! The main binary for the renalc eGFR / CrCl calculator.
//!
//! This application provides:
//! - CLI interface for computing estimates and browsing the history
//! - HTTP REST API server (axum-based)
//! - Append-only CSV history with verbatim export
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                apps/renalc (THE BINARY)                 │
//! │                                                         │
//! │  ┌─────────────┐   ┌─────────────┐   ┌──────────────┐  │
//! │  │   CLI       │   │   HTTP API  │   │  History     │  │
//! │  │  (clap)     │   │   (axum)    │   │  (CSV log)   │  │
//! │  └──────┬──────┘   └──────┬──────┘   └──────┬───────┘  │
//! │         │                 │                 │          │
//! │         └─────────────────┼─────────────────┘          │
//! │                           ▼                            │
//! │                   ┌───────────────┐                    │
//! │                   │  renalc-core  │                    │
//! │                   │  (THE LOGIC)  │                    │
//! │                   └───────────────┘                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Compute and save a CKD-EPI 2021 estimate
//! renalc compute -m ckd-epi-2021 -a 40 -s male --scr 90 --save
//!
//! # Browse the history, start the server
//! renalc history --limit 10
//! renalc serve --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use renalc::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse CLI arguments first so --verbose can widen the default filter.
    let cli = cli::Cli::parse();

    // Initialize tracing — RENALC_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("RENALC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "renalc=debug,tower_http=debug"
    } else {
        "renalc=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the renalc startup banner.
fn print_banner() {
    println!(
        r#"
  ██████╗ ███████╗███╗   ██╗ █████╗ ██╗      ██████╗
  ██╔══██╗██╔════╝████╗  ██║██╔══██╗██║     ██╔════╝
  ██████╔╝█████╗  ██╔██╗ ██║███████║██║     ██║
  ██╔══██╗██╔══╝  ██║╚██╗██║██╔══██║██║     ██║
  ██║  ██║███████╗██║ ╚████║██║  ██║███████╗╚██████╗
  ╚═╝  ╚═╝╚══════╝╚═╝  ╚═══╝╚═╝  ╚═╝╚══════╝ ╚═════╝

  Kidney Function Calculator v{}

  Estimates only • Not a diagnostic tool
"#,
        env!("CARGO_PKG_VERSION")
    );
}
