//! Governance Health Index aggregation.
//!
//! The GHI is a convex combination of the four dimension scores with fixed
//! weights, so it always lies in [0, 100].  Weights are constants, never
//! configurable per call; they are returned alongside the score so
//! downstream consumers can render a breakdown without recomputation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const DIMENSION_AUDIT_READINESS: &str = "audit_readiness";
pub const DIMENSION_LIFECYCLE_RISK: &str = "lifecycle_risk";
pub const DIMENSION_SLA_GAP: &str = "sla_gap";
pub const DIMENSION_COMPLIANCE: &str = "compliance";

pub const AUDIT_WEIGHT: f64 = 0.4;
pub const LIFECYCLE_WEIGHT: f64 = 0.3;
pub const SLA_WEIGHT: f64 = 0.2;
pub const COMPLIANCE_WEIGHT: f64 = 0.1;

/// Letter grade, a pure step function of the rounded GHI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(ghi: f64) -> Self {
        if ghi >= 90.0 {
            Self::A
        } else if ghi >= 80.0 {
            Self::B
        } else if ghi >= 60.0 {
            Self::C
        } else if ghi >= 40.0 {
            Self::D
        } else {
            Self::F
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceHealthIndex {
    /// Composite score, rounded to 2 decimals, in [0, 100].
    pub ghi: f64,
    /// The four dimension scores, rounded to 2 decimals.
    pub dimensions: BTreeMap<String, f64>,
    /// Fixed weights; always sum to 1.0.
    pub weights: BTreeMap<String, f64>,
    pub grade: Grade,
}

/// Aggregates four already-computed 0-100 dimension scores.
pub fn compute_ghi(
    audit_score: f64,
    lifecycle_score: f64,
    sla_score: f64,
    compliance_score: f64,
) -> GovernanceHealthIndex {
    let ghi = round2(
        audit_score * AUDIT_WEIGHT
            + lifecycle_score * LIFECYCLE_WEIGHT
            + sla_score * SLA_WEIGHT
            + compliance_score * COMPLIANCE_WEIGHT,
    );

    let mut dimensions = BTreeMap::new();
    dimensions.insert(DIMENSION_AUDIT_READINESS.to_string(), round2(audit_score));
    dimensions.insert(
        DIMENSION_LIFECYCLE_RISK.to_string(),
        round2(lifecycle_score),
    );
    dimensions.insert(DIMENSION_SLA_GAP.to_string(), round2(sla_score));
    dimensions.insert(DIMENSION_COMPLIANCE.to_string(), round2(compliance_score));

    let mut weights = BTreeMap::new();
    weights.insert(DIMENSION_AUDIT_READINESS.to_string(), AUDIT_WEIGHT);
    weights.insert(DIMENSION_LIFECYCLE_RISK.to_string(), LIFECYCLE_WEIGHT);
    weights.insert(DIMENSION_SLA_GAP.to_string(), SLA_WEIGHT);
    weights.insert(DIMENSION_COMPLIANCE.to_string(), COMPLIANCE_WEIGHT);

    GovernanceHealthIndex {
        ghi,
        dimensions,
        weights,
        grade: Grade::from_score(ghi),
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
