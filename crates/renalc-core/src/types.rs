//! # Core Type Definitions
//!
//! This module contains all core types for the renalc calculation engine:
//! - Demographic and measurement enums (`Sex`, `CreatinineUnit`)
//! - The closed method selector (`Method`)
//! - Input and output records (`ComputationInput`, `ComputationResult`)
//! - Error types (`RenalError`)
//!
//! ## Design Notes
//!
//! `Method` is a closed enum: adding an equation is a compile-time-checked
//! exhaustive match everywhere it is dispatched, never a string comparison.
//! String selectors only exist at the app boundary (`FromStr`).

use crate::staging::Stage;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// SEX
// =============================================================================

/// Biological sex as used by the published equations.
///
/// Every equation carries sex-specific coefficients; there is no
/// sex-neutral variant in any of the four methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Get the canonical lowercase label ("male" / "female").
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = RenalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(RenalError::invalid(format!(
                "unrecognized sex '{other}' (expected male or female)"
            ))),
        }
    }
}

// =============================================================================
// CREATININE UNIT
// =============================================================================

/// Measurement unit of a serum creatinine input.
///
/// All equations consume mg/dL internally; µmol/L inputs are normalized
/// by [`crate::units::creatinine_to_mgdl`] before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatinineUnit {
    /// Micromoles per liter (SI, common in lab reports).
    #[serde(rename = "umol/L")]
    MicromolPerLiter,
    /// Milligrams per deciliter (conventional, used by the equations).
    #[serde(rename = "mg/dL")]
    MilligramPerDeciliter,
}

impl CreatinineUnit {
    /// ASCII code used in serialized rows ("umol/L" / "mg/dL").
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CreatinineUnit::MicromolPerLiter => "umol/L",
            CreatinineUnit::MilligramPerDeciliter => "mg/dL",
        }
    }

    /// Human-readable label with the proper micro sign.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            CreatinineUnit::MicromolPerLiter => "µmol/L",
            CreatinineUnit::MilligramPerDeciliter => "mg/dL",
        }
    }
}

impl FromStr for CreatinineUnit {
    type Err = RenalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "umol/l" | "µmol/l" | "umol" => Ok(CreatinineUnit::MicromolPerLiter),
            "mg/dl" | "mgdl" => Ok(CreatinineUnit::MilligramPerDeciliter),
            other => Err(RenalError::invalid(format!(
                "unrecognized creatinine unit '{other}' (expected umol/L or mg/dL)"
            ))),
        }
    }
}

// =============================================================================
// METHOD
// =============================================================================

/// The four supported estimation methods.
///
/// Each variant carries a fixed display name, output unit label, advisory
/// note, and flags describing which optional inputs it consumes. Dispatch
/// is always an exhaustive match on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// CKD-EPI 2021 creatinine equation (race-free).
    #[serde(rename = "CKD-EPI 2021")]
    CkdEpi2021,
    /// CKD-EPI 2009 creatinine equation (optional Black race coefficient).
    #[serde(rename = "CKD-EPI 2009")]
    CkdEpi2009,
    /// MDRD 4-variable equation, IDMS-traceable calibration.
    #[serde(rename = "MDRD (IDMS)")]
    MdrdIdms,
    /// Cockcroft-Gault creatinine clearance (requires body weight).
    #[serde(rename = "Cockcroft-Gault")]
    CockcroftGault,
}

/// All methods in presentation order.
pub const ALL_METHODS: [Method; 4] = [
    Method::CkdEpi2021,
    Method::CkdEpi2009,
    Method::MdrdIdms,
    Method::CockcroftGault,
];

impl Method {
    /// Get the display name of this method.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Method::CkdEpi2021 => "CKD-EPI 2021",
            Method::CkdEpi2009 => "CKD-EPI 2009",
            Method::MdrdIdms => "MDRD (IDMS)",
            Method::CockcroftGault => "Cockcroft-Gault",
        }
    }

    /// Unit label of the filtration value this method produces.
    ///
    /// The three eGFR equations are normalized to 1.73m² body surface
    /// area; Cockcroft-Gault is a raw clearance in mL/min.
    #[must_use]
    pub fn output_unit(&self) -> &'static str {
        match self {
            Method::CkdEpi2021 | Method::CkdEpi2009 | Method::MdrdIdms => "mL/min/1.73m²",
            Method::CockcroftGault => "mL/min",
        }
    }

    /// Fixed advisory note attached to every result of this method.
    #[must_use]
    pub fn advisory(&self) -> &'static str {
        match self {
            Method::CkdEpi2021 => {
                "eGFR normalized to 1.73m² body surface area (CKD-EPI 2021; race-free equation)."
            }
            Method::CkdEpi2009 => {
                "eGFR normalized to 1.73m² body surface area (CKD-EPI 2009). \
                 Optional Black race coefficient; many institutions now discourage its use."
            }
            Method::MdrdIdms => {
                "eGFR normalized to 1.73m² body surface area (MDRD; IDMS-traceable). \
                 Optional Black race coefficient; many institutions now discourage its use."
            }
            Method::CockcroftGault => {
                "CrCl (Cockcroft-Gault) is NOT normalized to 1.73m² body surface area; \
                 commonly used for drug dosing. KDIGO staging of a raw CrCl is approximate."
            }
        }
    }

    /// Whether this method consumes the optional race flag.
    #[must_use]
    pub fn uses_race_factor(&self) -> bool {
        matches!(self, Method::CkdEpi2009 | Method::MdrdIdms)
    }

    /// Whether this method requires body weight.
    #[must_use]
    pub fn requires_weight(&self) -> bool {
        matches!(self, Method::CockcroftGault)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = RenalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "ckdepi2021" => Ok(Method::CkdEpi2021),
            "ckdepi2009" => Ok(Method::CkdEpi2009),
            "mdrd" | "mdrdidms" => Ok(Method::MdrdIdms),
            "cockcroftgault" | "cg" => Ok(Method::CockcroftGault),
            _ => Err(RenalError::invalid(format!(
                "unrecognized method '{}' (expected one of: ckd-epi-2021, ckd-epi-2009, mdrd-idms, cockcroft-gault)",
                s.trim()
            ))),
        }
    }
}

// =============================================================================
// COMPUTATION INPUT
// =============================================================================

/// Validated-shape input to one computation.
///
/// Construction does not validate values; validation happens inside
/// [`crate::compute::compute`] so the engine remains safe to call without
/// any range-checked input surface in front of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationInput {
    /// Equation to dispatch to.
    pub method: Method,
    /// Age in whole years. All four equations are adult-only (>= 18).
    pub age: u32,
    /// Biological sex.
    pub sex: Sex,
    /// Serum creatinine measurement, in `scr_unit`.
    pub scr_value: f64,
    /// Unit of `scr_value`.
    pub scr_unit: CreatinineUnit,
    /// Black race flag; consumed only by CKD-EPI 2009 and MDRD.
    #[serde(default)]
    pub black: bool,
    /// Body weight in kg; required by Cockcroft-Gault, ignored otherwise.
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

impl ComputationInput {
    /// Create an input with the mandatory fields; race flag off, no weight.
    #[must_use]
    pub fn new(method: Method, age: u32, sex: Sex, scr_value: f64, scr_unit: CreatinineUnit) -> Self {
        Self {
            method,
            age,
            sex,
            scr_value,
            scr_unit,
            black: false,
            weight_kg: None,
        }
    }

    /// Set the Black race flag (CKD-EPI 2009 / MDRD only).
    #[must_use]
    pub fn with_race_flag(mut self, black: bool) -> Self {
        self.black = black;
        self
    }

    /// Set body weight in kg (Cockcroft-Gault only).
    #[must_use]
    pub fn with_weight_kg(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }
}

// =============================================================================
// COMPUTATION RESULT
// =============================================================================

/// Immutable record of one successful computation.
///
/// Created once by [`crate::compute::compute`], never mutated, independent
/// of all prior results. The engine has no ownership of persistence; the
/// caller decides whether a record is displayed, saved, or dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationResult {
    /// Local wall-clock time of the computation, `%Y-%m-%d %H:%M:%S`.
    pub timestamp: String,
    /// Method that produced the value.
    pub method: Method,
    /// Echoed age.
    pub age: u32,
    /// Echoed sex.
    pub sex: Sex,
    /// Echoed creatinine value, in `scr_unit`.
    pub scr_value: f64,
    /// Echoed creatinine unit.
    pub scr_unit: CreatinineUnit,
    /// Creatinine normalized to mg/dL.
    pub scr_mgdl: f64,
    /// Race flag as consumed: `Some` only for CKD-EPI 2009 / MDRD.
    pub black: Option<bool>,
    /// Body weight as consumed: `Some` only for Cockcroft-Gault.
    pub weight_kg: Option<f64>,
    /// Computed filtration value, unrounded.
    pub value: f64,
    /// Unit label of `value` ("mL/min/1.73m²" or "mL/min").
    pub value_unit: String,
    /// KDIGO stage bucket of `value`.
    pub stage: Stage,
    /// Fixed advisory note for the method (normalization / race caveats).
    pub notes: String,
}

impl ComputationResult {
    /// Human-readable description of the stage bucket.
    #[must_use]
    pub fn stage_text(&self) -> &'static str {
        self.stage.description()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the renalc system.
///
/// The calculation engine itself produces exactly one kind of error:
/// [`RenalError::InvalidInput`], raised synchronously with a human-readable
/// reason that callers surface directly. Errors are deterministic given the
/// inputs, so there is nothing to retry, and a failed computation produces
/// no record. `Io` and `Serialization` exist for the app layer (history
/// store, config) and are never constructed by the engine.
#[derive(Debug, Error)]
pub enum RenalError {
    /// An input value violates a physical or formula precondition.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An I/O error occurred (app layer only).
    #[error("I/O error: {0}")]
    Io(String),

    /// A serialization or parsing error occurred (app layer only).
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RenalError {
    /// Shorthand for building an `InvalidInput` with a formatted reason.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        RenalError::InvalidInput(reason.into())
    }
}

// =============================================================================
// TESTS
// =============================================================================
