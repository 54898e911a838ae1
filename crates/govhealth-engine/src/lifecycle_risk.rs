//! Lifecycle risk dimension: exposure from end-of-life, deprecated, or
//! significantly outdated technology components.

use serde::{Deserialize, Serialize};

use crate::domain::{LifecycleStatus, TechStackItem};
use crate::lifecycle_catalog;

pub const EOL_DEDUCTION: f64 = 25.0;
pub const DEPRECATED_DEDUCTION: f64 = 15.0;
pub const OUTDATED_DEDUCTION: f64 = 5.0;

/// An item is "outdated" once it trails by this many major versions, unless
/// it is already EOL or deprecated (those classes dominate).
pub const OUTDATED_MAJOR_VERSIONS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleRiskSummary {
    pub score: f64,
    pub eol_count: u32,
    pub deprecated_count: u32,
    pub outdated_count: u32,
    /// Items with no declared status and no catalog match.  Scored healthy;
    /// surfaced so incomplete inventories are visible in diagnostics.
    pub unknown_count: u32,
    pub item_total: u32,
}

/// Scores lifecycle risk over the supplied tech-stack items.
///
/// `score = max(0, 100 - 25*eol - 15*deprecated - 5*outdated)`.  An item's
/// effective status is its declared one, falling back to the static catalog
/// for the `(name, version)` pair; an unresolvable pair is unknown and
/// healthy.  An empty stack scores 100.
pub fn lifecycle_risk(items: &[TechStackItem]) -> LifecycleRiskSummary {
    let catalog = lifecycle_catalog::catalog();

    let mut eol_count = 0u32;
    let mut deprecated_count = 0u32;
    let mut outdated_count = 0u32;
    let mut unknown_count = 0u32;

    for item in items {
        let status = item
            .lifecycle_status
            .or_else(|| catalog.resolve(&item.name, &item.version));
        match status {
            Some(LifecycleStatus::Eol) => eol_count += 1,
            Some(LifecycleStatus::Deprecated) => deprecated_count += 1,
            Some(LifecycleStatus::Lts) | Some(LifecycleStatus::Active) => {
                if item.major_versions_behind >= OUTDATED_MAJOR_VERSIONS {
                    outdated_count += 1;
                }
            }
            None => {
                unknown_count += 1;
                if item.major_versions_behind >= OUTDATED_MAJOR_VERSIONS {
                    outdated_count += 1;
                }
            }
        }
    }

    let deduction = f64::from(eol_count) * EOL_DEDUCTION
        + f64::from(deprecated_count) * DEPRECATED_DEDUCTION
        + f64::from(outdated_count) * OUTDATED_DEDUCTION;

    LifecycleRiskSummary {
        score: (100.0 - deduction).max(0.0),
        eol_count,
        deprecated_count,
        outdated_count,
        unknown_count,
        item_total: items.len() as u32,
    }
}
