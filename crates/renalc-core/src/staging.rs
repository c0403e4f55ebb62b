//! # KDIGO Stage Classification
//!
//! Maps a filtration value to one of the six KDIGO severity buckets
//! (G1 through G5, with G3 split into G3a/G3b).
//!
//! ## Stage Definitions
//!
//! | Stage | Range (mL/min/1.73m²) | Description |
//! |-------|-----------------------|-------------|
//! | G1    | >= 90                 | Normal or high |
//! | G2    | 60-89                 | Mildly decreased |
//! | G3a   | 45-59                 | Mild to moderate decrease |
//! | G3b   | 30-44                 | Moderate to severe decrease |
//! | G4    | 15-29                 | Severely decreased |
//! | G5    | < 15                  | Kidney failure |
//!
//! Classification is total: every finite value maps to exactly one bucket
//! (zero and negative values land in G5). Whether the value itself is
//! physically sensible is the caller's concern.
//!
//! Thresholds are calibrated for eGFR (mL/min/1.73m²). Classifying a raw
//! Cockcroft-Gault clearance with them is a documented approximation; the
//! method's advisory note carries that caveat.

use serde::{Deserialize, Serialize};

// =============================================================================
// STAGE THRESHOLDS (inclusive lower bounds)
// =============================================================================

/// Lower bound of G1: normal or high.
pub const G1_THRESHOLD: f64 = 90.0;

/// Lower bound of G2: mildly decreased.
pub const G2_THRESHOLD: f64 = 60.0;

/// Lower bound of G3a: mild to moderate decrease.
pub const G3A_THRESHOLD: f64 = 45.0;

/// Lower bound of G3b: moderate to severe decrease.
pub const G3B_THRESHOLD: f64 = 30.0;

/// Lower bound of G4: severely decreased. Below this is G5.
pub const G4_THRESHOLD: f64 = 15.0;

// =============================================================================
// STAGE ENUM
// =============================================================================

/// KDIGO G1-G5 severity buckets.
///
/// Derived `Ord` follows declaration order, so `G1 < G5`: a *greater*
/// stage is a *worse* kidney function. Callers use the ordering for
/// severity progress indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Normal or high filtration (>= 90).
    G1,
    /// Mildly decreased (60-89).
    G2,
    /// Mild to moderate decrease (45-59).
    #[serde(rename = "G3a")]
    G3a,
    /// Moderate to severe decrease (30-44).
    #[serde(rename = "G3b")]
    G3b,
    /// Severely decreased (15-29).
    G4,
    /// Kidney failure (< 15).
    G5,
}

/// All stages in severity order, least severe first.
pub const ALL_STAGES: [Stage; 6] = [
    Stage::G1,
    Stage::G2,
    Stage::G3a,
    Stage::G3b,
    Stage::G4,
    Stage::G5,
];

impl Stage {
    /// Get the stage code ("G1" .. "G5").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Stage::G1 => "G1",
            Stage::G2 => "G2",
            Stage::G3a => "G3a",
            Stage::G3b => "G3b",
            Stage::G4 => "G4",
            Stage::G5 => "G5",
        }
    }

    /// Get the human-readable description of this bucket.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Stage::G1 => "Normal or high (>=90)",
            Stage::G2 => "Mildly decreased (60-89)",
            Stage::G3a => "Mild to moderate decrease (45-59)",
            Stage::G3b => "Moderate to severe decrease (30-44)",
            Stage::G4 => "Severely decreased (15-29)",
            Stage::G5 => "Kidney failure (<15)",
        }
    }

    /// Inclusive lower bound of this bucket. G5 is unbounded below.
    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        match self {
            Stage::G1 => G1_THRESHOLD,
            Stage::G2 => G2_THRESHOLD,
            Stage::G3a => G3A_THRESHOLD,
            Stage::G3b => G3B_THRESHOLD,
            Stage::G4 => G4_THRESHOLD,
            Stage::G5 => f64::NEG_INFINITY,
        }
    }

    /// Zero-based severity rank (G1 = 0 .. G5 = 5), for progress displays.
    #[must_use]
    pub fn severity_rank(&self) -> usize {
        match self {
            Stage::G1 => 0,
            Stage::G2 => 1,
            Stage::G3a => 2,
            Stage::G3b => 3,
            Stage::G4 => 4,
            Stage::G5 => 5,
        }
    }

    /// Get the next (more severe) stage, if any.
    #[must_use]
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::G1 => Some(Stage::G2),
            Stage::G2 => Some(Stage::G3a),
            Stage::G3a => Some(Stage::G3b),
            Stage::G3b => Some(Stage::G4),
            Stage::G4 => Some(Stage::G5),
            Stage::G5 => None,
        }
    }

    /// Get the previous (less severe) stage, if any.
    #[must_use]
    pub fn previous(&self) -> Option<Stage> {
        match self {
            Stage::G1 => None,
            Stage::G2 => Some(Stage::G1),
            Stage::G3a => Some(Stage::G2),
            Stage::G3b => Some(Stage::G3a),
            Stage::G4 => Some(Stage::G3b),
            Stage::G5 => Some(Stage::G4),
        }
    }

    /// Check if this stage is kidney failure (G5).
    #[must_use]
    pub fn is_kidney_failure(&self) -> bool {
        matches!(self, Stage::G5)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classify a filtration value into its KDIGO bucket.
///
/// Buckets are evaluated top-down with inclusive lower bounds; the first
/// matching range wins. There is no error path: any value that matches no
/// other bucket (including zero and negatives) is G5.
#[must_use]
pub fn classify(value: f64) -> Stage {
    if value >= G1_THRESHOLD {
        Stage::G1
    } else if value >= G2_THRESHOLD {
        Stage::G2
    } else if value >= G3A_THRESHOLD {
        Stage::G3a
    } else if value >= G3B_THRESHOLD {
        Stage::G3b
    } else if value >= G4_THRESHOLD {
        Stage::G4
    } else {
        Stage::G5
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values() {
        assert_eq!(classify(90.0), Stage::G1);
        assert_eq!(classify(89.999), Stage::G2);
        assert_eq!(classify(60.0), Stage::G2);
        assert_eq!(classify(59.999), Stage::G3a);
        assert_eq!(classify(45.0), Stage::G3a);
        assert_eq!(classify(44.999), Stage::G3b);
        assert_eq!(classify(30.0), Stage::G3b);
        assert_eq!(classify(29.999), Stage::G4);
        assert_eq!(classify(15.0), Stage::G4);
        assert_eq!(classify(14.999), Stage::G5);
    }

    #[test]
    fn zero_and_negative_land_in_g5() {
        assert_eq!(classify(0.0), Stage::G5);
        assert_eq!(classify(-10.0), Stage::G5);
    }

    #[test]
    fn severity_ordering() {
        assert!(Stage::G1 < Stage::G2);
        assert!(Stage::G2 < Stage::G3a);
        assert!(Stage::G3a < Stage::G3b);
        assert!(Stage::G3b < Stage::G4);
        assert!(Stage::G4 < Stage::G5);
    }

    #[test]
    fn next_previous_walk_the_ladder() {
        let mut stage = Stage::G1;
        let mut count = 1;
        while let Some(next) = stage.next() {
            assert_eq!(next.previous(), Some(stage));
            stage = next;
            count += 1;
        }
        assert_eq!(count, ALL_STAGES.len());
        assert!(stage.is_kidney_failure());
    }

    #[test]
    fn severity_rank_matches_order() {
        for (i, stage) in ALL_STAGES.iter().enumerate() {
            assert_eq!(stage.severity_rank(), i);
        }
    }

    #[test]
    fn stage_display() {
        assert_eq!(format!("{}", Stage::G1), "G1: Normal or high (>=90)");
        assert_eq!(format!("{}", Stage::G5), "G5: Kidney failure (<15)");
    }

    #[test]
    fn serde_codes() {
        let json = serde_json::to_string(&Stage::G3a).expect("json");
        assert_eq!(json, "\"G3a\"");
        let back: Stage = serde_json::from_str("\"G3b\"").expect("json");
        assert_eq!(back, Stage::G3b);
    }
}
