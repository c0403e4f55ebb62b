//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use renalc_core::{ComputationInput, ComputationResult, RenalError, Stage};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// COMPUTE REQUEST/RESPONSE
// =============================================================================

/// Computation request.
///
/// `method`, `sex`, and `scr_unit` arrive as free strings and are parsed
/// at this boundary so API clients can use the same spellings as the CLI;
/// an unrecognized selector is an invalid-input error, never a dispatch
/// on strings inside the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeRequest {
    pub method: String,
    pub age: u32,
    pub sex: String,
    pub scr_value: f64,
    pub scr_unit: String,
    #[serde(default)]
    pub black: bool,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Append the result to the history file on success.
    #[serde(default)]
    pub save: bool,
}

impl ComputeRequest {
    /// Parse the string selectors and build an engine input.
    pub fn to_input(&self) -> Result<ComputationInput, RenalError> {
        Ok(ComputationInput {
            method: self.method.parse()?,
            age: self.age,
            sex: self.sex.parse()?,
            scr_value: self.scr_value,
            scr_unit: self.scr_unit.parse()?,
            black: self.black,
            weight_kg: self.weight_kg,
        })
    }
}

/// JSON projection of a [`ComputationResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultJson {
    pub timestamp: String,
    pub method: String,
    pub age: u32,
    pub sex: String,
    pub scr_value: f64,
    pub scr_unit: String,
    pub scr_mgdl: f64,
    pub black: Option<bool>,
    pub weight_kg: Option<f64>,
    pub value: f64,
    pub value_unit: String,
    pub stage: String,
    pub stage_text: String,
    pub severity_rank: usize,
    pub notes: String,
}

impl From<&ComputationResult> for ResultJson {
    fn from(result: &ComputationResult) -> Self {
        Self {
            timestamp: result.timestamp.clone(),
            method: result.method.name().to_string(),
            age: result.age,
            sex: result.sex.as_str().to_string(),
            scr_value: result.scr_value,
            scr_unit: result.scr_unit.as_str().to_string(),
            scr_mgdl: result.scr_mgdl,
            black: result.black,
            weight_kg: result.weight_kg,
            value: result.value,
            value_unit: result.value_unit.clone(),
            stage: result.stage.code().to_string(),
            stage_text: result.stage_text().to_string(),
            severity_rank: result.stage.severity_rank(),
            notes: result.notes.clone(),
        }
    }
}

/// Computation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeResponse {
    pub success: bool,
    pub result: Option<ResultJson>,
    pub saved: bool,
    pub error: Option<String>,
}

impl ComputeResponse {
    pub fn success(result: &ComputationResult, saved: bool) -> Self {
        Self {
            success: true,
            result: Some(ResultJson::from(result)),
            saved,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            saved: false,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// STAGES RESPONSE
// =============================================================================

/// One KDIGO stage bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageJson {
    pub code: String,
    pub description: String,
    /// Inclusive lower bound; absent for G5 (unbounded below).
    pub lower_bound: Option<f64>,
    pub severity_rank: usize,
}

impl From<Stage> for StageJson {
    fn from(stage: Stage) -> Self {
        let lower = stage.lower_bound();
        Self {
            code: stage.code().to_string(),
            description: stage.description().to_string(),
            lower_bound: lower.is_finite().then_some(lower),
            severity_rank: stage.severity_rank(),
        }
    }
}

/// Full staging table, least severe first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagesResponse {
    pub stages: Vec<StageJson>,
}

// =============================================================================
// HISTORY RESPONSE
// =============================================================================

/// Parsed history rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub count: usize,
    pub rows: Vec<crate::history::HistoryRow>,
}
