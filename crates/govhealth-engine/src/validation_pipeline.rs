//! Governance validation pipeline.
//!
//! Runs the four dimension scorers, aggregates the GHI, derives
//! human-readable issues from fixed thresholds, and decides pass/fail.
//! The pipeline is pure: identical inputs produce byte-identical results
//! across invocations, which the canonical-JSON fingerprint makes directly
//! assertable.
//!
//! Each dimension computation emits one structured log event carrying the
//! organization identifier, the computed counts, and the resulting score.
//! Log fields are identifiers and counters only; finding titles,
//! descriptions, and any other free text never reach the log stream.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::audit_readiness::{audit_readiness, AuditReadinessSummary};
use crate::compliance_applicability::{compliance_summary, ComplianceSummary};
use crate::domain::{Finding, OrganizationProfile, TechStackItem};
use crate::health_index::{compute_ghi, GovernanceHealthIndex};
use crate::lifecycle_risk::{lifecycle_risk, LifecycleRiskSummary};
use crate::sla_gap::{sla_gap, SlaGapSummary, SlaStatus};

/// Audit score below this trips the readiness issue.
pub const AUDIT_ISSUE_THRESHOLD: f64 = 50.0;
/// Composite score at or above this is required to pass.
pub const PASSING_GHI: f64 = 60.0;

const LOG_TARGET: &str = "govhealth::assurance";

/// Full outcome of one validation run.  Created fresh on every invocation;
/// the core never caches these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub organization_id: String,
    pub audit_readiness: AuditReadinessSummary,
    pub lifecycle_risk: LifecycleRiskSummary,
    pub sla_gap: SlaGapSummary,
    pub compliance: ComplianceSummary,
    pub health_index: GovernanceHealthIndex,
    pub passed: bool,
    pub issues: Vec<String>,
    /// SHA-256 over the canonical JSON of everything above.  Two runs over
    /// identical inputs yield identical fingerprints.
    pub fingerprint_hex: String,
}

/// The fingerprint preimage: the result minus its own fingerprint.
#[derive(Serialize)]
struct UnfingerprintedResult<'a> {
    organization_id: &'a str,
    audit_readiness: &'a AuditReadinessSummary,
    lifecycle_risk: &'a LifecycleRiskSummary,
    sla_gap: &'a SlaGapSummary,
    compliance: &'a ComplianceSummary,
    health_index: &'a GovernanceHealthIndex,
    passed: bool,
    issues: &'a [String],
}

/// Validates one organization's governance posture.
///
/// The four scorers are independent and run in a fixed order only so that
/// log output is stable; no scorer reads another's result.
pub fn validate(
    profile: &OrganizationProfile,
    findings: &[Finding],
    tech_stack: &[TechStackItem],
) -> ValidationResult {
    let audit = audit_readiness(findings);
    tracing::info!(
        target: LOG_TARGET,
        organization = %profile.id,
        dimension = "audit_readiness",
        critical = audit.critical_count,
        high = audit.high_count,
        medium = audit.medium_count,
        low = audit.low_count,
        score = audit.score,
        "dimension scored"
    );

    let lifecycle = lifecycle_risk(tech_stack);
    tracing::info!(
        target: LOG_TARGET,
        organization = %profile.id,
        dimension = "lifecycle_risk",
        eol = lifecycle.eol_count,
        deprecated = lifecycle.deprecated_count,
        outdated = lifecycle.outdated_count,
        unknown = lifecycle.unknown_count,
        score = lifecycle.score,
        "dimension scored"
    );

    let sla = sla_gap(profile.application_tier, profile.sla_target);
    tracing::info!(
        target: LOG_TARGET,
        organization = %profile.id,
        dimension = "sla_gap",
        status = sla.status.as_str(),
        gap = sla.gap.unwrap_or(0.0),
        score = sla.score,
        "dimension scored"
    );

    let compliance = compliance_summary(profile);
    tracing::info!(
        target: LOG_TARGET,
        organization = %profile.id,
        dimension = "compliance",
        applicable = compliance.frameworks.len(),
        mandatory = compliance.mandatory_count,
        score = compliance.score,
        "dimension scored"
    );

    let health_index = compute_ghi(
        audit.score,
        lifecycle.score,
        sla.score,
        compliance.score,
    );

    let issues = derive_issues(&audit, &lifecycle, &sla, &compliance);
    let passed = issues.is_empty() && health_index.ghi >= PASSING_GHI;

    tracing::info!(
        target: LOG_TARGET,
        organization = %profile.id,
        ghi = health_index.ghi,
        grade = health_index.grade.as_str(),
        issue_count = issues.len(),
        passed,
        "governance health index computed"
    );

    let fingerprint_hex = fingerprint(&UnfingerprintedResult {
        organization_id: &profile.id,
        audit_readiness: &audit,
        lifecycle_risk: &lifecycle,
        sla_gap: &sla,
        compliance: &compliance,
        health_index: &health_index,
        passed,
        issues: &issues,
    });

    ValidationResult {
        organization_id: profile.id.clone(),
        audit_readiness: audit,
        lifecycle_risk: lifecycle,
        sla_gap: sla,
        compliance,
        health_index,
        passed,
        issues,
        fingerprint_hex,
    }
}

/// Issue derivation with fixed thresholds and fixed order: audit, then
/// lifecycle, then SLA, then compliance.
fn derive_issues(
    audit: &AuditReadinessSummary,
    lifecycle: &LifecycleRiskSummary,
    sla: &SlaGapSummary,
    compliance: &ComplianceSummary,
) -> Vec<String> {
    let mut issues = Vec::new();

    if audit.score < AUDIT_ISSUE_THRESHOLD {
        issues.push(format!(
            "audit readiness is critically low: {} critical and {} high findings unresolved",
            audit.critical_count, audit.high_count
        ));
    }

    if lifecycle.eol_count > 0 {
        issues.push(format!(
            "{} end-of-life component(s) remain in the production stack",
            lifecycle.eol_count
        ));
    }

    if sla.status == SlaStatus::Unrealistic {
        issues.push(format!(
            "declared SLA target trails the tier requirement by {:.4}%",
            sla.gap.unwrap_or(0.0)
        ));
    }

    if compliance.score == 0.0 && compliance.frameworks.is_empty() {
        issues.push(
            "organization profile is unconfigured: no compliance attributes declared".to_string(),
        );
    }

    issues
}

fn fingerprint(preimage: &UnfingerprintedResult<'_>) -> String {
    // Serialization of these value types cannot fail; map orderings are
    // BTreeMap-stable, so the preimage is canonical.
    let payload = serde_json::to_vec(preimage).unwrap_or_default();
    let digest = Sha256::digest(&payload);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ApplicationTier, FindingSeverity, FindingStatus, LifecycleStatus,
    };

    fn finding(id: &str, severity: FindingSeverity, status: FindingStatus) -> Finding {
        Finding {
            id: id.to_string(),
            severity,
            status,
            title: format!("finding {id}"),
            description: String::new(),
            domain: None,
        }
    }

    fn tiered_profile(id: &str, tier: ApplicationTier, target: f64) -> OrganizationProfile {
        OrganizationProfile {
            id: id.to_string(),
            application_tier: Some(tier),
            sla_target: Some(target),
            ..OrganizationProfile::default()
        }
    }

    #[test]
    fn healthy_technology_organization_passes_with_grade_b() {
        let mut profile = tiered_profile("org-a", ApplicationTier::Tier2, 99.95);
        profile.industry = "technology".to_string();
        let findings = vec![
            finding("f1", FindingSeverity::Critical, FindingStatus::Open),
            finding("f2", FindingSeverity::High, FindingStatus::Open),
            finding("f3", FindingSeverity::Medium, FindingStatus::Open),
        ];

        let result = validate(&profile, &findings, &[]);
        assert_eq!(result.audit_readiness.score, 74.0);
        assert_eq!(result.lifecycle_risk.score, 100.0);
        assert_eq!(result.sla_gap.score, 100.0);
        assert_eq!(result.compliance.score, 100.0);
        assert_eq!(result.health_index.ghi, 89.6);
        assert_eq!(result.health_index.grade.as_str(), "B");
        assert!(result.issues.is_empty());
        assert!(result.passed);
    }

    #[test]
    fn degraded_organization_fails_with_every_issue_class() {
        let profile = tiered_profile("org-b", ApplicationTier::Tier1, 98.0);
        let findings: Vec<Finding> = (0..7)
            .map(|i| {
                finding(
                    &format!("f{i}"),
                    FindingSeverity::Critical,
                    FindingStatus::Open,
                )
            })
            .collect();
        let stack = vec![TechStackItem {
            name: "node".to_string(),
            version: "16.0.0".to_string(),
            lifecycle_status: Some(LifecycleStatus::Eol),
            major_versions_behind: 4,
        }];

        let result = validate(&profile, &findings, &stack);
        assert_eq!(result.audit_readiness.score, 0.0);
        assert_eq!(result.lifecycle_risk.score, 75.0);
        assert_eq!(result.sla_gap.score, 20.0);
        assert_eq!(result.compliance.score, 0.0);
        assert_eq!(result.health_index.ghi, 26.5);
        assert_eq!(result.health_index.grade.as_str(), "F");
        assert!(!result.passed);
        assert_eq!(result.issues.len(), 4);
        assert!(result.issues[0].contains("7 critical"));
        assert!(result.issues[1].contains("1 end-of-life"));
        assert!(result.issues[2].contains("1.9900"));
        assert!(result.issues[3].contains("unconfigured"));
    }

    #[test]
    fn repeated_invocations_are_byte_identical() {
        let mut profile = tiered_profile("org-c", ApplicationTier::Tier3, 99.6);
        profile.industry = "saas".to_string();
        let findings = vec![finding("f1", FindingSeverity::High, FindingStatus::InProgress)];

        let first = validate(&profile, &findings, &[]);
        let second = validate(&profile, &findings, &[]);
        assert_eq!(first, second);
        assert_eq!(first.fingerprint_hex, second.fingerprint_hex);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn fingerprint_distinguishes_different_inputs() {
        let profile = tiered_profile("org-d", ApplicationTier::Tier2, 99.95);
        let base = validate(&profile, &[], &[]);
        let with_finding = validate(
            &profile,
            &[finding("f1", FindingSeverity::Low, FindingStatus::Open)],
            &[],
        );
        assert_ne!(base.fingerprint_hex, with_finding.fingerprint_hex);
    }

    #[test]
    fn audit_issue_requires_dropping_below_fifty() {
        let profile = tiered_profile("org-e", ApplicationTier::Tier2, 99.9);
        // 3 critical + 1 high = 53 deduction -> score 47 -> issue fires.
        let findings: Vec<Finding> = vec![
            finding("f1", FindingSeverity::Critical, FindingStatus::Open),
            finding("f2", FindingSeverity::Critical, FindingStatus::Open),
            finding("f3", FindingSeverity::Critical, FindingStatus::Open),
            finding("f4", FindingSeverity::High, FindingStatus::Open),
        ];
        let result = validate(&profile, &findings, &[]);
        assert_eq!(result.audit_readiness.score, 47.0);
        assert!(result.issues.iter().any(|i| i.contains("audit readiness")));

        // Exactly 50 does not: 2 critical + 1 high + 4 medium = 50 deducted.
        let findings: Vec<Finding> = vec![
            finding("f1", FindingSeverity::Critical, FindingStatus::Open),
            finding("f2", FindingSeverity::Critical, FindingStatus::Open),
            finding("f3", FindingSeverity::High, FindingStatus::Open),
            finding("f4", FindingSeverity::Medium, FindingStatus::Open),
            finding("f5", FindingSeverity::Medium, FindingStatus::Open),
            finding("f6", FindingSeverity::Medium, FindingStatus::Open),
            finding("f7", FindingSeverity::Medium, FindingStatus::Open),
        ];
        let result = validate(&profile, &findings, &[]);
        assert_eq!(result.audit_readiness.score, 50.0);
        assert!(!result.issues.iter().any(|i| i.contains("audit readiness")));
    }

    #[test]
    fn a_clean_pass_requires_both_no_issues_and_ghi_at_least_sixty() {
        // Unconfigured SLA and blank profile: no SLA issue (not unrealistic),
        // but compliance issue fires and GHI is low.
        let profile = OrganizationProfile {
            id: "org-f".to_string(),
            ..OrganizationProfile::default()
        };
        let result = validate(&profile, &[], &[]);
        assert_eq!(result.sla_gap.score, 0.0);
        assert_eq!(result.compliance.score, 0.0);
        // audit 100, lifecycle 100 -> ghi = 40 + 30 = 70, but the
        // unconfigured-profile issue still fails the run.
        assert_eq!(result.health_index.ghi, 70.0);
        assert!(!result.passed);
        assert_eq!(result.issues.len(), 1);
    }
}
