//! Compliance applicability engine.
//!
//! Maps an organization's declared attributes onto the external frameworks
//! that apply to it.  Every rule is evaluated independently and any number
//! may fire; output order is rule declaration order, so the result is
//! deterministic for a given profile.  The one exclusion: GDPR and the NIST
//! Privacy Framework are mutually exclusive outcomes for the PII flag.

use serde::{Deserialize, Serialize};

use crate::domain::{FrameworkApplicability, OrganizationProfile};

pub const FULL_COVERAGE_SCORE: f64 = 100.0;
pub const SIGNAL_WITHOUT_MATCH_SCORE: f64 = 50.0;
pub const BLANK_PROFILE_SCORE: f64 = 0.0;

/// Industries that trigger SOC 2 Type II on their own.
const SOC2_INDUSTRIES: [&str; 3] = ["technology", "saas", "software"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub score: f64,
    pub frameworks: Vec<FrameworkApplicability>,
    pub mandatory_count: u32,
    /// Whether the profile carried any compliance-relevant signal at all.
    pub signal_present: bool,
}

/// Evaluates every applicability rule against the profile.
///
/// Returns the empty list (not an error) when nothing fires.
pub fn applicable_frameworks(profile: &OrganizationProfile) -> Vec<FrameworkApplicability> {
    let mut frameworks = Vec::new();

    if profile.processes_phi {
        frameworks.push(framework(
            "HIPAA",
            "organization processes protected health information",
            true,
            "https://www.hhs.gov/hipaa/index.html",
        ));
    }

    if profile.handles_dod_data {
        frameworks.push(framework(
            "CMMC Level 2",
            "organization handles DoD data",
            true,
            "https://dodcio.defense.gov/CMMC/",
        ));
        frameworks.push(framework(
            "NIST SP 800-171",
            "controlled unclassified information requires NIST SP 800-171 safeguarding",
            true,
            "https://csrc.nist.gov/pubs/sp/800/171/r3/final",
        ));
    }

    if profile.processes_cardholder_data {
        frameworks.push(framework(
            "PCI-DSS v4.0",
            "organization processes cardholder data",
            true,
            "https://www.pcisecuritystandards.org/",
        ));
    }

    if profile.processes_pii {
        if profile.operates_in("EU") {
            frameworks.push(framework(
                "GDPR",
                "organization processes PII and operates in the EU",
                true,
                "https://gdpr.eu/",
            ));
        } else {
            frameworks.push(framework(
                "NIST Privacy Framework",
                "organization processes PII outside the EU",
                false,
                "https://www.nist.gov/privacy-framework",
            ));
        }
    }

    if is_soc2_industry(&profile.industry) {
        frameworks.push(framework(
            "SOC 2 Type II",
            "customers of technology service providers expect SOC 2 Type II attestation",
            false,
            "https://www.aicpa-cima.com/topic/audit-assurance/audit-and-assurance-greater-than-soc-2",
        ));
    }

    if profile.uses_ai_in_production {
        frameworks.push(framework(
            "NIST AI RMF",
            "organization operates AI systems in production",
            false,
            "https://www.nist.gov/itl/ai-risk-management-framework",
        ));
    }

    if profile.financial_services {
        frameworks.push(framework(
            "NIST CSF 2.0",
            "financial-services organizations are expected to maintain a CSF program",
            true,
            "https://www.nist.gov/cyberframework",
        ));
        frameworks.push(framework(
            "FFIEC IT Handbook",
            "financial-services organizations fall under FFIEC examination",
            true,
            "https://ithandbook.ffiec.gov/",
        ));
    }

    if profile.government_contractor {
        frameworks.push(framework(
            "FedRAMP",
            "government contractors offering cloud services pursue FedRAMP authorization",
            false,
            "https://www.fedramp.gov/",
        ));
    }

    frameworks
}

/// Applicability plus the compliance dimension's score contribution.
///
/// Non-empty coverage scores 100.  An empty result with signal present
/// scores 50; this branch is reachable (a non-matching industry or a region
/// set with no flags) and is kept deliberately.  A blank profile scores 0.
pub fn compliance_summary(profile: &OrganizationProfile) -> ComplianceSummary {
    let frameworks = applicable_frameworks(profile);
    let signal_present = profile.has_compliance_signal();

    let score = if !frameworks.is_empty() {
        FULL_COVERAGE_SCORE
    } else if signal_present {
        SIGNAL_WITHOUT_MATCH_SCORE
    } else {
        BLANK_PROFILE_SCORE
    };

    let mandatory_count = frameworks.iter().filter(|f| f.mandatory).count() as u32;

    ComplianceSummary {
        score,
        frameworks,
        mandatory_count,
        signal_present,
    }
}

fn is_soc2_industry(industry: &str) -> bool {
    let industry = industry.trim().to_ascii_lowercase();
    SOC2_INDUSTRIES.contains(&industry.as_str())
}

fn framework(
    name: &str,
    reason: &str,
    mandatory: bool,
    reference: &str,
) -> FrameworkApplicability {
    FrameworkApplicability {
        framework: name.to_string(),
        reason: reason.to_string(),
        mandatory,
        reference: reference.to_string(),
    }
}
