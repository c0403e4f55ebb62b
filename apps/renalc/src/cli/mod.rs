//! # renalc CLI Module
//!
//! This module implements the CLI interface for renalc.
//!
//! ## Available Commands
//!
//! - `compute` - Compute an eGFR / CrCl estimate
//! - `history` - Show saved results
//! - `export` - Copy the history CSV to another path
//! - `stages` - Show the KDIGO staging table
//! - `serve` - Start the HTTP server

mod commands;

use crate::config::Config;
use crate::history::HistoryStore;
use clap::{Parser, Subcommand};
use renalc_core::RenalError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// renalc - eGFR / CrCl calculator
///
/// Computes estimated kidney filtration metrics with one of four published
/// equations, classifies the result into a KDIGO stage, and optionally logs
/// it to an append-only history file. Adults only (age >= 18).
#[derive(Parser, Debug)]
#[command(name = "renalc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the history CSV (overrides config file)
    #[arg(long, global = true)]
    pub history: Option<PathBuf>,

    /// Path to a TOML config file (default: renalc.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute an eGFR / CrCl estimate
    Compute {
        /// Method: ckd-epi-2021, ckd-epi-2009, mdrd-idms, or cockcroft-gault
        #[arg(short, long)]
        method: String,

        /// Age in years (adults only, >= 18)
        #[arg(short, long)]
        age: u32,

        /// Sex: male or female
        #[arg(short, long)]
        sex: String,

        /// Serum creatinine value
        #[arg(long)]
        scr: f64,

        /// Creatinine unit: umol/L or mg/dL
        #[arg(short, long, default_value = "umol/L")]
        unit: String,

        /// Apply the Black race coefficient (CKD-EPI 2009 / MDRD only)
        #[arg(long)]
        black: bool,

        /// Body weight in kg (required for Cockcroft-Gault)
        #[arg(short, long)]
        weight: Option<f64>,

        /// Append the result to the history file
        #[arg(long)]
        save: bool,
    },

    /// Show saved results
    History {
        /// Show only the most recent N rows
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Copy the history CSV verbatim to another path
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show the KDIGO staging table
    Stages,

    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides config file)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), RenalError> {
    let config = Config::load(cli.config.as_deref())?;
    let store = HistoryStore::new(config.resolve_history_path(cli.history.as_deref()));
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Compute {
            method,
            age,
            sex,
            scr,
            unit,
            black,
            weight,
            save,
        }) => cmd_compute(
            &store, json_mode, &method, age, &sex, scr, &unit, black, weight, save,
        ),
        Some(Commands::History { limit }) => cmd_history(&store, json_mode, limit),
        Some(Commands::Export { output }) => cmd_export(&store, &output),
        Some(Commands::Serve { host, port }) => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            cmd_serve(store, &host, port).await
        }
        // No subcommand - show the staging table by default
        Some(Commands::Stages) | None => cmd_stages(json_mode),
    }
}
