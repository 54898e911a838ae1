//! SLA gap dimension: shortfall between a declared uptime target and the
//! requirement of the assigned tier.

use serde::{Deserialize, Serialize};

use crate::domain::ApplicationTier;

/// Classified outcome of the gap analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    OnTrack,
    AtRisk,
    Unrealistic,
    NotConfigured,
}

impl SlaStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::AtRisk => "at_risk",
            Self::Unrealistic => "unrealistic",
            Self::NotConfigured => "not_configured",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaGapSummary {
    pub score: f64,
    pub status: SlaStatus,
    pub tier: Option<ApplicationTier>,
    pub tier_requirement: Option<f64>,
    pub sla_target: Option<f64>,
    /// `requirement - target`, rounded to 4 decimals.  Absent when not
    /// configured.
    pub gap: Option<f64>,
}

const AT_RISK_GAP_CEILING: f64 = 0.5;

/// Scores the SLA gap for a tier/target pair.
///
/// A missing or unrecognized tier, or an absent target, is degenerate input
/// and yields `NotConfigured` with score 0.  The gap is rounded to 4
/// decimals before classification so the 0.5 boundary is exact.
pub fn sla_gap(tier: Option<ApplicationTier>, sla_target: Option<f64>) -> SlaGapSummary {
    let (tier, target) = match (tier, sla_target) {
        (Some(tier), Some(target)) => (tier, target),
        _ => {
            return SlaGapSummary {
                score: 0.0,
                status: SlaStatus::NotConfigured,
                tier,
                tier_requirement: tier.map(ApplicationTier::required_availability),
                sla_target,
                gap: None,
            };
        }
    };

    let requirement = tier.required_availability();
    let gap = round4(requirement - target);

    let (status, score) = if gap <= 0.0 {
        (SlaStatus::OnTrack, 100.0)
    } else if gap <= AT_RISK_GAP_CEILING {
        (SlaStatus::AtRisk, 60.0)
    } else {
        (SlaStatus::Unrealistic, 20.0)
    };

    SlaGapSummary {
        score,
        status,
        tier: Some(tier),
        tier_requirement: Some(requirement),
        sla_target: Some(target),
        gap: Some(gap),
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
