//! # End-to-End Scenario Tests
//!
//! Full engine runs over clinically meaningful inputs: normalization,
//! dispatch, classification, and record assembly in one pass.

#![allow(clippy::unwrap_used, clippy::panic)]

use renalc_core::{
    ComputationInput, CreatinineUnit, Method, RenalError, Sex, Stage, compute,
};

// =============================================================================
// SCENARIO A: CKD-EPI 2021, SI units
// =============================================================================

#[test]
fn scenario_ckd_epi_2021_si_units() {
    let input = ComputationInput::new(
        Method::CkdEpi2021,
        40,
        Sex::Male,
        90.0,
        CreatinineUnit::MicromolPerLiter,
    );
    let result = compute(&input).unwrap();

    // 90 umol/L normalizes to ~1.017 mg/dL.
    assert!((result.scr_mgdl - 1.017).abs() < 1e-3);
    assert_eq!(result.value_unit, "mL/min/1.73m²");
    assert!(matches!(result.stage, Stage::G1 | Stage::G2));
    // For this healthy profile the value lands in the mid-90s.
    assert!(result.value > 90.0 && result.value < 100.0);
    assert_eq!(result.method, Method::CkdEpi2021);
}

// =============================================================================
// SCENARIO B: Cockcroft-Gault with weight
// =============================================================================

#[test]
fn scenario_cockcroft_gault_with_weight() {
    let input = ComputationInput::new(
        Method::CockcroftGault,
        60,
        Sex::Female,
        1.0,
        CreatinineUnit::MilligramPerDeciliter,
    )
    .with_weight_kg(60.0);
    let result = compute(&input).unwrap();

    // ((140 - 60) * 60) / (72 * 1.0) * 0.85 = 56.67 mL/min.
    assert!((result.value - 56.666_666_666_666_664).abs() < 1e-9);
    assert_eq!(result.value_unit, "mL/min");
    assert_eq!(result.stage, Stage::G3a);
    assert_eq!(result.weight_kg, Some(60.0));
}

// =============================================================================
// SCENARIO C: MDRD race factor
// =============================================================================

#[test]
fn scenario_mdrd_race_factor_applied_only_when_set() {
    let base = ComputationInput::new(
        Method::MdrdIdms,
        50,
        Sex::Male,
        1.2,
        CreatinineUnit::MilligramPerDeciliter,
    );

    let without = compute(&base.clone()).unwrap();
    let with = compute(&base.with_race_flag(true)).unwrap();

    let expected = 175.0 * 1.2_f64.powf(-1.154) * 50.0_f64.powf(-0.203) * 1.212;
    assert!((with.value - expected).abs() < 1e-9);
    assert!((with.value / without.value - 1.212).abs() < 1e-9);
    assert_eq!(with.black, Some(true));
    assert_eq!(without.black, Some(false));
}

// =============================================================================
// FAILURE PATHS
// =============================================================================

#[test]
fn minors_rejected_for_every_method() {
    for method in renalc_core::ALL_METHODS {
        let mut input = ComputationInput::new(
            method,
            17,
            Sex::Male,
            1.0,
            CreatinineUnit::MilligramPerDeciliter,
        );
        if method.requires_weight() {
            input = input.with_weight_kg(70.0);
        }
        let err = compute(&input).unwrap_err();
        assert!(matches!(err, RenalError::InvalidInput(_)), "{method}");
    }
}

#[test]
fn zero_weight_rejected_distinctly_from_missing_weight() {
    let base = ComputationInput::new(
        Method::CockcroftGault,
        60,
        Sex::Male,
        1.0,
        CreatinineUnit::MilligramPerDeciliter,
    );

    let missing = compute(&base.clone()).unwrap_err();
    assert!(matches!(&missing, RenalError::InvalidInput(msg) if msg.contains("requires")));

    let zero = compute(&base.with_weight_kg(0.0)).unwrap_err();
    assert!(matches!(&zero, RenalError::InvalidInput(msg) if msg.contains("positive")));
}

#[test]
fn failed_computation_produces_no_record() {
    let input = ComputationInput::new(
        Method::CkdEpi2009,
        40,
        Sex::Female,
        -2.0,
        CreatinineUnit::MicromolPerLiter,
    );
    assert!(compute(&input).is_err());
}
