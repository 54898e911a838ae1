//! Input records and categorical types shared by every scorer.
//!
//! All categorical fields are closed enums so that adding a category is a
//! compile-time-visible change in every scorer that matches on it.  The
//! records are immutable inputs: nothing in this crate mutates them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Finding severity and status
// ---------------------------------------------------------------------------

/// Severity of an unresolved audit finding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FindingSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl FindingSeverity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow status of a finding.  Only `Open` and `InProgress` findings
/// participate in scoring; `Resolved` and `Accepted` are excluded from every
/// dimension calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    Open,
    InProgress,
    Resolved,
    Accepted,
}

impl FindingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Accepted => "accepted",
        }
    }

    /// Whether the finding still counts against the organization.
    pub const fn is_unresolved(self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }
}

/// One audit finding attached to an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub severity: FindingSeverity,
    pub status: FindingStatus,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub domain: Option<String>,
}

// ---------------------------------------------------------------------------
// Technology lifecycle
// ---------------------------------------------------------------------------

/// Published lifecycle stage of a technology release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    Lts,
    Active,
    Deprecated,
    Eol,
}

impl LifecycleStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lts => "lts",
            Self::Active => "active",
            Self::Deprecated => "deprecated",
            Self::Eol => "eol",
        }
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One component of an organization's declared technology stack.
///
/// `lifecycle_status` may be absent; the lifecycle scorer then resolves the
/// `(name, version)` pair against the static catalog, and an unresolvable
/// pair is treated as unknown rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechStackItem {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub lifecycle_status: Option<LifecycleStatus>,
    #[serde(default)]
    pub major_versions_behind: u32,
}

// ---------------------------------------------------------------------------
// Application tier
// ---------------------------------------------------------------------------

/// Operating tier an organization assigns to its application estate.
///
/// Wire form is the slug ("tier_1"); the canonical form ("Tier 1") and the
/// compact form ("tier1") are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationTier {
    #[serde(rename = "tier_1", alias = "Tier 1", alias = "tier1")]
    Tier1,
    #[serde(rename = "tier_2", alias = "Tier 2", alias = "tier2")]
    Tier2,
    #[serde(rename = "tier_3", alias = "Tier 3", alias = "tier3")]
    Tier3,
    #[serde(rename = "tier_4", alias = "Tier 4", alias = "tier4")]
    Tier4,
}

impl ApplicationTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tier1 => "tier_1",
            Self::Tier2 => "tier_2",
            Self::Tier3 => "tier_3",
            Self::Tier4 => "tier_4",
        }
    }

    /// Required availability percentage for the tier.
    pub const fn required_availability(self) -> f64 {
        match self {
            Self::Tier1 => 99.99,
            Self::Tier2 => 99.9,
            Self::Tier3 => 99.5,
            Self::Tier4 => 99.0,
        }
    }

    /// Parses both the canonical form ("Tier 1") and the slug forms
    /// ("tier_1", "tier1", "TIER-1").  Returns `None` for anything else;
    /// an unrecognized tier is degenerate input, not an error.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "tier1" => Some(Self::Tier1),
            "tier2" => Some(Self::Tier2),
            "tier3" => Some(Self::Tier3),
            "tier4" => Some(Self::Tier4),
            _ => None,
        }
    }
}

impl fmt::Display for ApplicationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Organization profile
// ---------------------------------------------------------------------------

/// Declared attributes of an organization.  Immutable input to scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    pub id: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub geo_regions: BTreeSet<String>,
    #[serde(default)]
    pub processes_pii: bool,
    #[serde(default)]
    pub processes_phi: bool,
    #[serde(default)]
    pub processes_cardholder_data: bool,
    #[serde(default)]
    pub handles_dod_data: bool,
    #[serde(default)]
    pub uses_ai_in_production: bool,
    #[serde(default)]
    pub government_contractor: bool,
    #[serde(default)]
    pub financial_services: bool,
    #[serde(default)]
    pub application_tier: Option<ApplicationTier>,
    #[serde(default)]
    pub sla_target: Option<f64>,
}

impl OrganizationProfile {
    /// Whether the profile carries any compliance-relevant signal.  The
    /// application tier and SLA target are operational attributes and do not
    /// count here.
    pub fn has_compliance_signal(&self) -> bool {
        self.processes_pii
            || self.processes_phi
            || self.processes_cardholder_data
            || self.handles_dod_data
            || self.uses_ai_in_production
            || self.government_contractor
            || self.financial_services
            || !self.industry.trim().is_empty()
            || !self.geo_regions.is_empty()
    }

    pub fn operates_in(&self, region_code: &str) -> bool {
        self.geo_regions
            .contains(&region_code.trim().to_ascii_uppercase())
    }
}

/// Parses a free-form region list ("EU, US; apac") into normalized region
/// codes.  Unparsable input yields the empty set, never an error.
pub fn parse_geo_regions(raw: &str) -> BTreeSet<String> {
    raw.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|token| token.to_ascii_uppercase())
        .collect()
}

// ---------------------------------------------------------------------------
// Framework applicability
// ---------------------------------------------------------------------------

/// One compliance framework triggered by an organization's attributes.
/// Produced by the applicability engine, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkApplicability {
    pub framework: String,
    pub reason: String,
    pub mandatory: bool,
    pub reference: String,
}
