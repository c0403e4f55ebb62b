//! # Unit Normalization
//!
//! All four equations consume serum creatinine in mg/dL. Lab reports
//! commonly state µmol/L, so the engine normalizes at the boundary and
//! every formula downstream can assume mg/dL.

use crate::types::{CreatinineUnit, RenalError};

/// Fixed conversion constant: 1 mg/dL of creatinine is 88.4 µmol/L.
///
/// This is a property of the creatinine molecule (molar mass), not a
/// configurable parameter.
pub const UMOL_PER_MGDL: f64 = 88.4;

/// Normalize a serum creatinine measurement to mg/dL.
///
/// - µmol/L divides by [`UMOL_PER_MGDL`]
/// - mg/dL is the identity
///
/// Rejects non-positive and non-finite values with `InvalidInput`. No
/// upper bound is enforced at this layer; implausibly high values are a
/// presentation concern for range-checked input surfaces.
pub fn creatinine_to_mgdl(value: f64, unit: CreatinineUnit) -> Result<f64, RenalError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(RenalError::invalid(format!(
            "creatinine must be a positive number, got {value}"
        )));
    }

    match unit {
        CreatinineUnit::MicromolPerLiter => Ok(value / UMOL_PER_MGDL),
        CreatinineUnit::MilligramPerDeciliter => Ok(value),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mgdl_is_identity() {
        let v = creatinine_to_mgdl(1.3, CreatinineUnit::MilligramPerDeciliter).expect("ok");
        assert!((v - 1.3).abs() < 1e-12);
    }

    #[test]
    fn umol_divides_by_constant() {
        let v = creatinine_to_mgdl(88.4, CreatinineUnit::MicromolPerLiter).expect("ok");
        assert!((v - 1.0).abs() < 1e-12);

        let v = creatinine_to_mgdl(90.0, CreatinineUnit::MicromolPerLiter).expect("ok");
        assert!((v - 90.0 / 88.4).abs() < 1e-12);
    }

    #[test]
    fn zero_is_rejected() {
        for unit in [
            CreatinineUnit::MicromolPerLiter,
            CreatinineUnit::MilligramPerDeciliter,
        ] {
            assert!(creatinine_to_mgdl(0.0, unit).is_err());
        }
    }

    #[test]
    fn negative_is_rejected() {
        for unit in [
            CreatinineUnit::MicromolPerLiter,
            CreatinineUnit::MilligramPerDeciliter,
        ] {
            assert!(creatinine_to_mgdl(-1.0, unit).is_err());
        }
    }

    #[test]
    fn non_finite_is_rejected() {
        assert!(creatinine_to_mgdl(f64::NAN, CreatinineUnit::MilligramPerDeciliter).is_err());
        assert!(creatinine_to_mgdl(f64::INFINITY, CreatinineUnit::MicromolPerLiter).is_err());
    }
}
