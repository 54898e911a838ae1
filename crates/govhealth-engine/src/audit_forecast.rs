//! Audit forecast: cross-references a scheduled audit against open findings
//! that are textually related to the audit's framework.
//!
//! Reuses the audit-readiness severity weighting, restricted to the related
//! set.  The caller supplies the reference date; the core never reads the
//! clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::audit_readiness::severity_deduction;
use crate::domain::{Finding, FindingSeverity};

/// Escalation window: unresolved critical/high findings this close to the
/// audit date raise the risk to critical.  Past-due audits count as inside
/// the window.
pub const ESCALATION_WINDOW_DAYS: i64 = 30;

/// A registry of framework keyword sets.  Matching is case-insensitive
/// substring over a finding's title, description, and domain tag.  The
/// first entry whose key occurs in the scheduled audit's framework name
/// wins; unknown frameworks resolve to the empty set.
const FRAMEWORK_KEYWORDS: &[(&str, &[&str])] = &[
    ("hipaa", &["hipaa", "phi", "health", "medical"]),
    ("pci", &["pci", "cardholder", "payment", "card"]),
    ("gdpr", &["gdpr", "privacy", "consent", "data subject"]),
    ("soc 2", &["soc 2", "soc2", "access control", "change management"]),
    ("soc2", &["soc 2", "soc2", "access control", "change management"]),
    ("cmmc", &["cmmc", "cui", "dod", "800-171"]),
    ("800-171", &["cmmc", "cui", "dod", "800-171"]),
    ("fedramp", &["fedramp", "authorization to operate", "continuous monitoring"]),
    ("iso 27001", &["iso 27001", "iso27001", "isms"]),
];

/// One audit on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledAudit {
    pub id: String,
    pub organization_id: String,
    pub framework: String,
    pub audit_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastRisk {
    Low,
    Medium,
    High,
    Critical,
}

impl ForecastRisk {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    const fn recommendation(self) -> &'static str {
        match self {
            Self::Critical => {
                "remediate related critical and high findings immediately; the audit window \
                 leaves no slack for open severe findings"
            }
            Self::High => {
                "prioritize remediation of related findings this sprint and prepare \
                 compensating-control evidence for anything that will remain open"
            }
            Self::Medium => {
                "review related findings and schedule remediation ahead of the audit \
                 preparation phase"
            }
            Self::Low => "no related findings demand action; proceed with standard audit preparation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditForecast {
    pub scheduled_audit_id: String,
    pub organization_id: String,
    pub framework: String,
    pub audit_date: NaiveDate,
    pub days_until_audit: i64,
    pub related_finding_count: u32,
    pub related_critical_or_high: u32,
    /// Severity-weighted readiness score over the related set only.
    pub audit_readiness_score: f64,
    pub risk: ForecastRisk,
    pub recommendation: String,
}

/// Forecasts audit risk for one scheduled audit.
pub fn forecast(audit: &ScheduledAudit, findings: &[Finding], as_of: NaiveDate) -> AuditForecast {
    let keywords = framework_keywords(&audit.framework);
    let related: Vec<&Finding> = findings
        .iter()
        .filter(|finding| finding.status.is_unresolved() && matches_keywords(finding, keywords))
        .collect();

    let related_critical_or_high = related
        .iter()
        .filter(|finding| {
            matches!(
                finding.severity,
                FindingSeverity::Critical | FindingSeverity::High
            )
        })
        .count() as u32;

    let deduction: f64 = related
        .iter()
        .map(|finding| severity_deduction(finding.severity))
        .sum();
    let audit_readiness_score = (100.0 - deduction).max(0.0);

    let days_until_audit = (audit.audit_date - as_of).num_days();
    let related_total = related.len() as u32;

    let risk = if related_critical_or_high >= 3
        || (related_critical_or_high >= 1 && days_until_audit < ESCALATION_WINDOW_DAYS)
    {
        ForecastRisk::Critical
    } else if related_critical_or_high >= 1 || related_total >= 5 {
        ForecastRisk::High
    } else if related_total >= 2 {
        ForecastRisk::Medium
    } else {
        ForecastRisk::Low
    };

    AuditForecast {
        scheduled_audit_id: audit.id.clone(),
        organization_id: audit.organization_id.clone(),
        framework: audit.framework.clone(),
        audit_date: audit.audit_date,
        days_until_audit,
        related_finding_count: related_total,
        related_critical_or_high,
        audit_readiness_score,
        risk,
        recommendation: risk.recommendation().to_string(),
    }
}

/// Keyword set for a framework name; empty for unknown frameworks.
pub fn framework_keywords(framework: &str) -> &'static [&'static str] {
    let needle = framework.trim().to_ascii_lowercase();
    for &(key, keywords) in FRAMEWORK_KEYWORDS {
        if needle.contains(key) {
            return keywords;
        }
    }
    &[]
}

fn matches_keywords(finding: &Finding, keywords: &[&str]) -> bool {
    if keywords.is_empty() {
        return false;
    }
    let haystack = format!(
        "{} {} {}",
        finding.title,
        finding.description,
        finding.domain.as_deref().unwrap_or_default()
    )
    .to_ascii_lowercase();
    keywords.iter().any(|keyword| haystack.contains(keyword))
}
