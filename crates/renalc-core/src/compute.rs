//! # Result Assembly
//!
//! The single entry point of the engine: normalize the creatinine input,
//! dispatch on the method, classify the result, and assemble an immutable
//! [`ComputationResult`].
//!
//! Orchestration is state-machine-free and synchronous. The only side
//! effect is one wall-clock read for the timestamp field; everything else
//! is a pure function of the input. Each call is independent, so callers
//! may run computations concurrently without coordination.

use crate::formulas;
use crate::staging;
use crate::types::{ComputationInput, ComputationResult, Method, RenalError};
use crate::units;
use chrono::Local;

/// Timestamp format used on result records (local time, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Compute a filtration estimate and assemble the result record.
///
/// Steps: normalize creatinine to mg/dL, check weight presence for
/// Cockcroft-Gault, invoke the matching formula, classify the value, and
/// stamp the record. Any `InvalidInput` from the lower layers propagates
/// unchanged; the assembler adds only the weight-presence check.
pub fn compute(input: &ComputationInput) -> Result<ComputationResult, RenalError> {
    let scr_mgdl = units::creatinine_to_mgdl(input.scr_value, input.scr_unit)?;

    // Echoed race/weight fields are Some only where the method consumed them.
    let (value, black, weight_kg) = match input.method {
        Method::CkdEpi2021 => {
            let v = formulas::ckd_epi_2021(scr_mgdl, input.age, input.sex)?;
            (v, None, None)
        }
        Method::CkdEpi2009 => {
            let v = formulas::ckd_epi_2009(scr_mgdl, input.age, input.sex, input.black)?;
            (v, Some(input.black), None)
        }
        Method::MdrdIdms => {
            let v = formulas::mdrd_idms(scr_mgdl, input.age, input.sex, input.black)?;
            (v, Some(input.black), None)
        }
        Method::CockcroftGault => {
            let weight = input.weight_kg.ok_or_else(|| {
                RenalError::invalid("Cockcroft-Gault requires body weight in kg")
            })?;
            let v = formulas::cockcroft_gault(scr_mgdl, input.age, input.sex, weight)?;
            (v, None, Some(weight))
        }
    };

    let stage = staging::classify(value);

    Ok(ComputationResult {
        timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        method: input.method,
        age: input.age,
        sex: input.sex,
        scr_value: input.scr_value,
        scr_unit: input.scr_unit,
        scr_mgdl,
        black,
        weight_kg,
        value,
        value_unit: input.method.output_unit().to_string(),
        stage,
        notes: input.method.advisory().to_string(),
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staging::Stage;
    use crate::types::{CreatinineUnit, Sex};

    #[test]
    fn ckd_epi_2021_end_to_end() {
        // 90 umol/L male, 40y -> ~1.017 mg/dL -> eGFR in the mid-90s -> G1.
        let input = ComputationInput::new(
            Method::CkdEpi2021,
            40,
            Sex::Male,
            90.0,
            CreatinineUnit::MicromolPerLiter,
        );
        let result = compute(&input).expect("ok");

        assert!((result.scr_mgdl - 90.0 / 88.4).abs() < 1e-12);
        assert_eq!(result.value_unit, "mL/min/1.73m²");
        assert!(matches!(result.stage, Stage::G1 | Stage::G2));
        assert_eq!(result.black, None);
        assert_eq!(result.weight_kg, None);
    }

    #[test]
    fn cockcroft_gault_end_to_end() {
        let input = ComputationInput::new(
            Method::CockcroftGault,
            60,
            Sex::Female,
            1.0,
            CreatinineUnit::MilligramPerDeciliter,
        )
        .with_weight_kg(60.0);
        let result = compute(&input).expect("ok");

        assert!((result.value - 56.666_666_666_666_664).abs() < 1e-6);
        assert_eq!(result.value_unit, "mL/min");
        assert_eq!(result.stage, Stage::G3a);
        assert_eq!(result.weight_kg, Some(60.0));
        assert_eq!(result.black, None);
        assert!(result.notes.contains("NOT normalized"));
    }

    #[test]
    fn cockcroft_gault_without_weight_fails() {
        let input = ComputationInput::new(
            Method::CockcroftGault,
            60,
            Sex::Female,
            1.0,
            CreatinineUnit::MilligramPerDeciliter,
        );
        let err = compute(&input);
        assert!(matches!(err, Err(RenalError::InvalidInput(_))));
    }

    #[test]
    fn race_flag_echoed_only_where_consumed() {
        let input = ComputationInput::new(
            Method::MdrdIdms,
            50,
            Sex::Male,
            1.2,
            CreatinineUnit::MilligramPerDeciliter,
        )
        .with_race_flag(true);
        let result = compute(&input).expect("ok");
        assert_eq!(result.black, Some(true));

        let input = ComputationInput::new(
            Method::CkdEpi2021,
            50,
            Sex::Male,
            1.2,
            CreatinineUnit::MilligramPerDeciliter,
        )
        .with_race_flag(true);
        let result = compute(&input).expect("ok");
        // CKD-EPI 2021 is race-free; the flag is not consumed, not echoed.
        assert_eq!(result.black, None);
    }

    #[test]
    fn weight_ignored_by_egfr_methods() {
        let input = ComputationInput::new(
            Method::CkdEpi2009,
            50,
            Sex::Male,
            1.2,
            CreatinineUnit::MilligramPerDeciliter,
        )
        .with_weight_kg(80.0);
        let result = compute(&input).expect("ok");
        assert_eq!(result.weight_kg, None);
    }

    #[test]
    fn invalid_creatinine_propagates_unchanged() {
        let input = ComputationInput::new(
            Method::CkdEpi2021,
            40,
            Sex::Male,
            0.0,
            CreatinineUnit::MilligramPerDeciliter,
        );
        let err = compute(&input).expect_err("must fail");
        assert!(matches!(&err, RenalError::InvalidInput(msg) if msg.contains("creatinine")));
    }

    #[test]
    fn idempotent_modulo_timestamp() {
        let input = ComputationInput::new(
            Method::CkdEpi2009,
            55,
            Sex::Female,
            110.0,
            CreatinineUnit::MicromolPerLiter,
        )
        .with_race_flag(true);

        let mut a = compute(&input).expect("ok");
        let mut b = compute(&input).expect("ok");
        a.timestamp.clear();
        b.timestamp.clear();
        assert_eq!(a, b);
    }
}
