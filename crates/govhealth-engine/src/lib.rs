#![forbid(unsafe_code)]

//! Deterministic Governance Health Index (GHI) scoring core.
//!
//! Four independent dimension scorers — audit readiness, lifecycle risk,
//! SLA gap, and compliance applicability — feed a fixed-weight composite
//! with letter grading, pass/fail gating, and issue derivation.  A related
//! forecast component cross-references scheduled audits against open
//! findings by framework keyword.
//!
//! Everything here is pure and synchronous: callers supply materialized
//! records and receive value objects.  The only process-wide state is the
//! static lifecycle catalog, loaded once on first use.  Degenerate input
//! (unparsable regions, unrecognized tiers, unknown technologies, empty
//! sets) resolves to defined zero-signal outcomes instead of errors.

pub mod audit_forecast;
pub mod audit_readiness;
pub mod compliance_applicability;
pub mod directory;
pub mod domain;
pub mod health_index;
pub mod lifecycle_catalog;
pub mod lifecycle_risk;
pub mod sla_gap;
pub mod validation_pipeline;

pub use audit_forecast::{forecast, AuditForecast, ForecastRisk, ScheduledAudit};
pub use audit_readiness::{audit_readiness, AuditReadinessSummary};
pub use compliance_applicability::{
    applicable_frameworks, compliance_summary, ComplianceSummary,
};
pub use directory::{
    DirectoryError, GovernanceDirectory, InMemoryDirectory, OrganizationRecord,
};
pub use domain::{
    ApplicationTier, Finding, FindingSeverity, FindingStatus, FrameworkApplicability,
    LifecycleStatus, OrganizationProfile, TechStackItem,
};
pub use health_index::{compute_ghi, GovernanceHealthIndex, Grade};
pub use lifecycle_risk::{lifecycle_risk, LifecycleRiskSummary};
pub use sla_gap::{sla_gap, SlaGapSummary, SlaStatus};
pub use validation_pipeline::{validate, ValidationResult};
