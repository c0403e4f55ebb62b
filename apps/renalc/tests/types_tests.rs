//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use renalc::api::{ComputeRequest, ComputeResponse, HealthResponse, ResultJson, StageJson};
use renalc_core::{CreatinineUnit, Method, Sex, Stage, compute};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_serialization() {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: "0.4.2".to_string(),
    };

    let json = serde_json::to_string(&health).unwrap();
    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"version\":\"0.4.2\""));
}

// =============================================================================
// COMPUTE REQUEST TESTS
// =============================================================================

#[test]
fn test_compute_request_minimal_json() {
    let json = r#"{
        "method": "ckd-epi-2021",
        "age": 40,
        "sex": "male",
        "scr_value": 90.0,
        "scr_unit": "umol/L"
    }"#;
    let request: ComputeRequest = serde_json::from_str(json).unwrap();

    // Omitted optionals take their defaults.
    assert!(!request.black);
    assert!(request.weight_kg.is_none());
    assert!(!request.save);

    let input = request.to_input().unwrap();
    assert_eq!(input.method, Method::CkdEpi2021);
    assert_eq!(input.sex, Sex::Male);
    assert_eq!(input.scr_unit, CreatinineUnit::MicromolPerLiter);
}

#[test]
fn test_compute_request_selector_spellings() {
    for (method, expected) in [
        ("CKD-EPI 2021", Method::CkdEpi2021),
        ("ckdepi2009", Method::CkdEpi2009),
        ("mdrd", Method::MdrdIdms),
        ("cg", Method::CockcroftGault),
    ] {
        let request = ComputeRequest {
            method: method.to_string(),
            age: 40,
            sex: "f".to_string(),
            scr_value: 1.0,
            scr_unit: "mg/dL".to_string(),
            black: false,
            weight_kg: Some(70.0),
            save: false,
        };
        assert_eq!(request.to_input().unwrap().method, expected);
    }
}

#[test]
fn test_compute_request_unknown_selectors_fail() {
    let mut request = ComputeRequest {
        method: "ckd-epi-2021".to_string(),
        age: 40,
        sex: "male".to_string(),
        scr_value: 1.0,
        scr_unit: "mg/dL".to_string(),
        black: false,
        weight_kg: None,
        save: false,
    };
    assert!(request.to_input().is_ok());

    request.method = "inulin-clearance".to_string();
    assert!(request.to_input().is_err());

    request.method = "mdrd".to_string();
    request.sex = "other".to_string();
    assert!(request.to_input().is_err());

    request.sex = "female".to_string();
    request.scr_unit = "mmol/L".to_string();
    assert!(request.to_input().is_err());
}

// =============================================================================
// COMPUTE RESPONSE TESTS
// =============================================================================

#[test]
fn test_compute_response_success_projection() {
    let input = renalc_core::ComputationInput::new(
        Method::CkdEpi2021,
        40,
        Sex::Male,
        1.0,
        CreatinineUnit::MilligramPerDeciliter,
    );
    let result = compute(&input).unwrap();
    let response = ComputeResponse::success(&result, true);

    assert!(response.success);
    assert!(response.saved);
    assert!(response.error.is_none());

    let projected = response.result.unwrap();
    assert_eq!(projected.method, "CKD-EPI 2021");
    assert_eq!(projected.stage, result.stage.code());
    assert_eq!(projected.stage_text, result.stage.description());
    assert_eq!(projected.severity_rank, result.stage.severity_rank());
}

#[test]
fn test_compute_response_error() {
    let response = ComputeResponse::error("age must be >= 18");

    assert!(!response.success);
    assert!(!response.saved);
    assert!(response.result.is_none());
    assert_eq!(response.error.unwrap(), "age must be >= 18");
}

#[test]
fn test_result_json_round_trip() {
    let input = renalc_core::ComputationInput::new(
        Method::CockcroftGault,
        60,
        Sex::Female,
        1.0,
        CreatinineUnit::MilligramPerDeciliter,
    )
    .with_weight_kg(60.0);
    let result = compute(&input).unwrap();

    let projected = ResultJson::from(&result);
    let json = serde_json::to_string(&projected).unwrap();
    let back: ResultJson = serde_json::from_str(&json).unwrap();

    assert_eq!(back.method, "Cockcroft-Gault");
    assert_eq!(back.value_unit, "mL/min");
    assert_eq!(back.weight_kg, Some(60.0));
    assert_eq!(back.stage, "G3a");
}

// =============================================================================
// STAGE JSON TESTS
// =============================================================================

#[test]
fn test_stage_json_bounds() {
    let g1 = StageJson::from(Stage::G1);
    assert_eq!(g1.code, "G1");
    assert_eq!(g1.lower_bound, Some(90.0));
    assert_eq!(g1.severity_rank, 0);

    // G5 is unbounded below; the JSON field goes null, not -inf.
    let g5 = StageJson::from(Stage::G5);
    assert_eq!(g5.lower_bound, None);
    assert_eq!(g5.severity_rank, 5);
    let json = serde_json::to_string(&g5).unwrap();
    assert!(json.contains("\"lower_bound\":null"));
}
