//! # Formula Engine
//!
//! The four published estimation equations, implemented exactly as given.
//!
//! Every function takes serum creatinine already normalized to mg/dL (see
//! [`crate::units`]) plus demographic inputs, and returns an unrounded
//! filtration value. Rounding is a presentation concern for the caller.
//!
//! All four equations are adult-only: age below [`MIN_ADULT_AGE`] is
//! rejected with `InvalidInput`. None of them has been validated for
//! minors, so the boundary is inclusive at 18.

use crate::types::{RenalError, Sex};

/// Minimum age in years for every equation. All four are adult-only.
pub const MIN_ADULT_AGE: u32 = 18;

fn check_adult(method: &str, age: u32) -> Result<(), RenalError> {
    if age < MIN_ADULT_AGE {
        return Err(RenalError::invalid(format!(
            "{method} applies to adults only (age >= {MIN_ADULT_AGE}, got {age})"
        )));
    }
    Ok(())
}

// =============================================================================
// CKD-EPI 2021 (race-free)
// =============================================================================

/// CKD-EPI 2021 creatinine equation (race-free), mL/min/1.73m².
///
/// eGFR = 142 * min(Scr/κ, 1)^α * max(Scr/κ, 1)^(-1.200)
///          * 0.9938^age * (1.012 if female)
///
/// κ = 0.7 female / 0.9 male; α = -0.241 female / -0.302 male.
pub fn ckd_epi_2021(scr_mgdl: f64, age: u32, sex: Sex) -> Result<f64, RenalError> {
    check_adult("CKD-EPI 2021", age)?;

    let (kappa, alpha, female_factor) = match sex {
        Sex::Female => (0.7, -0.241, 1.012),
        Sex::Male => (0.9, -0.302, 1.0),
    };

    let ratio = scr_mgdl / kappa;

    Ok(142.0
        * ratio.min(1.0).powf(alpha)
        * ratio.max(1.0).powf(-1.200)
        * 0.9938_f64.powi(age as i32)
        * female_factor)
}

// =============================================================================
// CKD-EPI 2009
// =============================================================================

/// CKD-EPI 2009 creatinine equation, mL/min/1.73m².
///
/// eGFR = 141 * min(Scr/κ, 1)^α * max(Scr/κ, 1)^(-1.209)
///          * 0.993^age * (1.018 if female) * (1.159 if black)
///
/// κ = 0.7 female / 0.9 male; α = -0.329 female / -0.411 male.
pub fn ckd_epi_2009(scr_mgdl: f64, age: u32, sex: Sex, black: bool) -> Result<f64, RenalError> {
    check_adult("CKD-EPI 2009", age)?;

    let (kappa, alpha, female_factor) = match sex {
        Sex::Female => (0.7, -0.329, 1.018),
        Sex::Male => (0.9, -0.411, 1.0),
    };
    let black_factor = if black { 1.159 } else { 1.0 };

    let ratio = scr_mgdl / kappa;

    Ok(141.0
        * ratio.min(1.0).powf(alpha)
        * ratio.max(1.0).powf(-1.209)
        * 0.993_f64.powi(age as i32)
        * female_factor
        * black_factor)
}

// =============================================================================
// MDRD (IDMS-traceable)
// =============================================================================

/// MDRD 4-variable equation with IDMS-traceable calibration, mL/min/1.73m².
///
/// eGFR = 175 * Scr^(-1.154) * age^(-0.203)
///          * (0.742 if female) * (1.212 if black)
pub fn mdrd_idms(scr_mgdl: f64, age: u32, sex: Sex, black: bool) -> Result<f64, RenalError> {
    check_adult("MDRD", age)?;

    let female_factor = if sex == Sex::Female { 0.742 } else { 1.0 };
    let black_factor = if black { 1.212 } else { 1.0 };

    Ok(175.0
        * scr_mgdl.powf(-1.154)
        * f64::from(age).powf(-0.203)
        * female_factor
        * black_factor)
}

// =============================================================================
// COCKCROFT-GAULT
// =============================================================================

/// Cockcroft-Gault creatinine clearance, mL/min.
///
/// CrCl = ((140 - age) * weight_kg) / (72 * Scr), * 0.85 if female.
///
/// The output is NOT normalized to 1.73m² body surface area; the advisory
/// note on results states this. Weight must be positive.
pub fn cockcroft_gault(
    scr_mgdl: f64,
    age: u32,
    sex: Sex,
    weight_kg: f64,
) -> Result<f64, RenalError> {
    check_adult("Cockcroft-Gault", age)?;

    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(RenalError::invalid(format!(
            "body weight must be a positive number of kg, got {weight_kg}"
        )));
    }

    let mut crcl = ((140.0 - f64::from(age)) * weight_kg) / (72.0 * scr_mgdl);
    if sex == Sex::Female {
        crcl *= 0.85;
    }
    Ok(crcl)
}

// =============================================================================
// TESTS
// =============================================================================
