//! Read-only access to assembled organization records.
//!
//! The scoring core consumes already-materialized records; this trait is the
//! seam where the surrounding system injects them.  There is deliberately no
//! write interface, and no process-global store: consumers hold whichever
//! implementation they were handed.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audit_forecast::ScheduledAudit;
use crate::domain::{Finding, OrganizationProfile, TechStackItem};

const ERROR_READ: &str = "GH-DIR-0001";
const ERROR_PARSE: &str = "GH-DIR-0002";

/// Everything the pipeline needs about one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub profile: OrganizationProfile,
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub tech_stack: Vec<TechStackItem>,
    #[serde(default)]
    pub scheduled_audits: Vec<ScheduledAudit>,
}

/// Upstream collaborator interface: given an organization id, its profile,
/// findings, and tech-stack items.
pub trait GovernanceDirectory {
    fn organization(&self, id: &str) -> Option<OrganizationRecord>;
    /// All records, ordered by organization id.
    fn organizations(&self) -> Vec<OrganizationRecord>;
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read organization export `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse organization export `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DirectoryError {
    pub const fn stable_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => ERROR_READ,
            Self::Parse { .. } => ERROR_PARSE,
        }
    }
}

/// On-disk export format consumed by the CLI and the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DirectoryDocument {
    organizations: Vec<OrganizationRecord>,
}

/// In-memory directory, keyed by organization id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    records: BTreeMap<String, OrganizationRecord>,
}

impl InMemoryDirectory {
    pub fn new(records: impl IntoIterator<Item = OrganizationRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.profile.id.clone(), record))
                .collect(),
        }
    }

    /// Loads a directory from a JSON export file.
    pub fn from_json_file(path: &Path) -> Result<Self, DirectoryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DirectoryError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw).map_err(|source| DirectoryError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let document: DirectoryDocument = serde_json::from_str(raw)?;
        Ok(Self::new(document.organizations))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl GovernanceDirectory for InMemoryDirectory {
    fn organization(&self, id: &str) -> Option<OrganizationRecord> {
        self.records.get(id).cloned()
    }

    fn organizations(&self) -> Vec<OrganizationRecord> {
        self.records.values().cloned().collect()
    }
}
