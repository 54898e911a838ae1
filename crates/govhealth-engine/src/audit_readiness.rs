//! Audit readiness dimension: inverse measure of unresolved-finding burden.
//!
//! Deductions are applied per finding and are deliberately uncapped per
//! severity class; the score clamps at zero.  Resolved and accepted findings
//! never contribute.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Finding, FindingSeverity};

pub const CRITICAL_DEDUCTION: f64 = 15.0;
pub const HIGH_DEDUCTION: f64 = 8.0;
pub const MEDIUM_DEDUCTION: f64 = 3.0;
pub const LOW_DEDUCTION: f64 = 0.0;

/// Per-finding deduction for a severity class.
pub const fn severity_deduction(severity: FindingSeverity) -> f64 {
    match severity {
        FindingSeverity::Critical => CRITICAL_DEDUCTION,
        FindingSeverity::High => HIGH_DEDUCTION,
        FindingSeverity::Medium => MEDIUM_DEDUCTION,
        FindingSeverity::Low => LOW_DEDUCTION,
    }
}

/// Diagnostic result of the audit readiness scorer.  The breakdown map is
/// keyed by severity name and reports total deduction per class; it exists
/// for logging and rendering, never for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReadinessSummary {
    pub score: f64,
    pub critical_count: u32,
    pub high_count: u32,
    pub medium_count: u32,
    pub low_count: u32,
    pub unresolved_total: u32,
    pub deductions: BTreeMap<String, f64>,
}

/// Scores audit readiness over the supplied findings.
///
/// `score = max(0, 100 - 15*critical - 8*high - 3*medium)`, counting only
/// open and in-progress findings.  An empty set scores 100.
pub fn audit_readiness(findings: &[Finding]) -> AuditReadinessSummary {
    let mut critical_count = 0u32;
    let mut high_count = 0u32;
    let mut medium_count = 0u32;
    let mut low_count = 0u32;

    for finding in findings {
        if !finding.status.is_unresolved() {
            continue;
        }
        match finding.severity {
            FindingSeverity::Critical => critical_count += 1,
            FindingSeverity::High => high_count += 1,
            FindingSeverity::Medium => medium_count += 1,
            FindingSeverity::Low => low_count += 1,
        }
    }

    let mut deductions = BTreeMap::new();
    deductions.insert(
        FindingSeverity::Critical.as_str().to_string(),
        f64::from(critical_count) * CRITICAL_DEDUCTION,
    );
    deductions.insert(
        FindingSeverity::High.as_str().to_string(),
        f64::from(high_count) * HIGH_DEDUCTION,
    );
    deductions.insert(
        FindingSeverity::Medium.as_str().to_string(),
        f64::from(medium_count) * MEDIUM_DEDUCTION,
    );
    deductions.insert(
        FindingSeverity::Low.as_str().to_string(),
        f64::from(low_count) * LOW_DEDUCTION,
    );

    let total_deduction: f64 = deductions.values().sum();
    let score = (100.0 - total_deduction).max(0.0);

    AuditReadinessSummary {
        score,
        critical_count,
        high_count,
        medium_count,
        low_count,
        unresolved_total: critical_count + high_count + medium_count + low_count,
        deductions,
    }
}
