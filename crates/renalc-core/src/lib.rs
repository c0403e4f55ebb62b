//! # renalc-core
//!
//! The eGFR / CrCl calculation engine for renalc - THE LOGIC.
//!
//! This crate computes estimated kidney filtration metrics from patient
//! inputs using one of four published clinical equations, classifies the
//! result into a KDIGO severity stage, and assembles an immutable result
//! record for the caller to display or persist.
//!
//! ## Layers (leaf-first)
//!
//! - [`units`] - creatinine unit normalization and physical validation
//! - [`formulas`] - the four equations as independent pure functions
//! - [`staging`] - KDIGO G1-G5 classification of a filtration value
//! - [`compute`] - orchestration into a [`ComputationResult`]
//!
//! ## Architectural Constraints
//!
//! - The engine is pure: no async, no network, no file I/O. The single
//!   side effect is one wall-clock read per [`compute::compute`] call.
//! - Formulas are implemented exactly as published, without deviation.
//!   This is not a medical decision-support system; there is no dosing
//!   logic and no population-specific calibration.
//! - Persistence and presentation are external collaborators: the engine
//!   produces records, it never reads or writes the history log.

// =============================================================================
// MODULES
// =============================================================================

pub mod compute;
pub mod formulas;
pub mod staging;
pub mod types;
pub mod units;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    ALL_METHODS, ComputationInput, ComputationResult, CreatinineUnit, Method, RenalError, Sex,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use compute::{TIMESTAMP_FORMAT, compute};
pub use formulas::{MIN_ADULT_AGE, ckd_epi_2009, ckd_epi_2021, cockcroft_gault, mdrd_idms};
pub use staging::{ALL_STAGES, Stage, classify};
pub use units::{UMOL_PER_MGDL, creatinine_to_mgdl};
