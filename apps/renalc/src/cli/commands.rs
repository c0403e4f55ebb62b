//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::history::HistoryStore;
use renalc_core::{
    ALL_STAGES, ComputationInput, ComputationResult, RenalError, Stage, compute,
};
use std::path::Path;

// =============================================================================
// COMPUTE COMMAND
// =============================================================================

/// Compute an estimate, print it, and optionally append it to the history.
#[allow(clippy::fn_params_excessive_bools)]
pub fn cmd_compute(
    store: &HistoryStore,
    json_mode: bool,
    method: &str,
    age: u32,
    sex: &str,
    scr: f64,
    unit: &str,
    black: bool,
    weight: Option<f64>,
    save: bool,
) -> Result<(), RenalError> {
    // String selectors are parsed here, at the boundary; the engine only
    // ever sees the closed enums.
    let input = ComputationInput {
        method: method.parse()?,
        age,
        sex: sex.parse()?,
        scr_value: scr,
        scr_unit: unit.parse()?,
        black,
        weight_kg: weight,
    };

    let result = compute(&input)?;

    if save {
        store.append(&result)?;
    }

    if json_mode {
        let output = serde_json::json!({
            "timestamp": result.timestamp,
            "method": result.method.name(),
            "age": result.age,
            "sex": result.sex.as_str(),
            "scr_value": result.scr_value,
            "scr_unit": result.scr_unit.as_str(),
            "scr_mgdl": result.scr_mgdl,
            "black": result.black,
            "weight_kg": result.weight_kg,
            "value": result.value,
            "value_unit": result.value_unit,
            "stage": result.stage.code(),
            "stage_text": result.stage_text(),
            "notes": result.notes,
            "saved": save
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    print_result_card(&result);
    if save {
        println!();
        println!("Saved to history: {:?}", store.path());
    }

    Ok(())
}

/// Print the human-readable result card.
fn print_result_card(result: &ComputationResult) {
    println!("Result ({})", result.method.name());
    println!("====================================");
    println!();
    println!("Value:      {:.1} {}", result.value, result.value_unit);
    println!("Stage:      {}", result.stage);
    println!("Severity:   [{}] G1 -> G5", severity_bar(result.stage));
    println!(
        "Creatinine: {:.3} mg/dL (from {} {})",
        result.scr_mgdl,
        result.scr_value,
        result.scr_unit.label()
    );
    println!("Time:       {}", result.timestamp);
    println!();
    println!("Note: {}", result.notes);
}

/// Render the G1->G5 severity progress bar for a stage.
fn severity_bar(stage: Stage) -> String {
    let filled = stage.severity_rank() + 1;
    let total = ALL_STAGES.len();
    format!("{}{}", "#".repeat(filled), "-".repeat(total - filled))
}

// =============================================================================
// HISTORY COMMAND
// =============================================================================

/// Render the history file.
pub fn cmd_history(
    store: &HistoryStore,
    json_mode: bool,
    limit: Option<usize>,
) -> Result<(), RenalError> {
    let rows = store.read_rows(limit)?;

    if json_mode {
        let output = serde_json::json!({
            "file": store.path().to_string_lossy(),
            "count": rows.len(),
            "rows": rows
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Computation History");
    println!("===================");
    println!("File: {:?}", store.path());
    println!();

    if rows.is_empty() {
        println!("No saved results yet. Run `renalc compute ... --save` to record one.");
        return Ok(());
    }

    println!(
        "{:<20} {:<16} {:>5} {:>8} {:<16} {:<5}",
        "Timestamp", "Method", "Age", "Value", "Unit", "Stage"
    );
    for row in &rows {
        println!(
            "{:<20} {:<16} {:>5} {:>8} {:<16} {:<5}",
            row.timestamp, row.method, row.age, row.value, row.value_unit, row.stage
        );
    }
    println!();
    println!("{} row(s)", rows.len());

    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Copy the history CSV verbatim to another path.
pub fn cmd_export(store: &HistoryStore, output: &Path) -> Result<(), RenalError> {
    let bytes = store.export_to(output)?;
    println!("Exported {} bytes to {:?}", bytes, output);
    Ok(())
}

// =============================================================================
// STAGES COMMAND
// =============================================================================

/// Print the KDIGO staging table.
pub fn cmd_stages(json_mode: bool) -> Result<(), RenalError> {
    if json_mode {
        let stages: Vec<_> = ALL_STAGES
            .iter()
            .map(|s| {
                serde_json::json!({
                    "code": s.code(),
                    "description": s.description(),
                    "lower_bound": s.lower_bound().is_finite().then(|| s.lower_bound()),
                    "severity_rank": s.severity_rank()
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "stages": stages }))
                .unwrap_or_default()
        );
        return Ok(());
    }

    println!("KDIGO Staging (eGFR in mL/min/1.73m²)");
    println!("=====================================");
    println!();
    for stage in ALL_STAGES {
        println!("  {}", stage);
    }
    println!();
    println!("For Cockcroft-Gault (CrCl, mL/min) this staging is approximate.");

    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(store: HistoryStore, host: &str, port: u16) -> Result<(), RenalError> {
    println!("renalc HTTP Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:    {}", host);
    println!("  Port:    {}", port);
    println!("  History: {:?}", store.path());
    println!();
    println!("Endpoints:");
    println!("  GET  /health         - Health check");
    println!("  POST /compute        - Compute an estimate");
    println!("  GET  /stages         - KDIGO staging table");
    println!("  GET  /history        - Saved results as JSON");
    println!("  GET  /history/export - Raw history CSV");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, store).await
}
