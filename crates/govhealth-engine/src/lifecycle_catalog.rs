//! Static technology lifecycle catalog.
//!
//! The catalog is a versioned table embedded in the crate and parsed once on
//! first use behind a `OnceLock`, read-only thereafter.  A parse failure
//! degrades to an empty catalog with a logged warning; every lookup against
//! an empty or non-matching catalog resolves to "unknown" rather than an
//! error, so incomplete data can never crash a caller.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::domain::LifecycleStatus;

const EMBEDDED_CATALOG: &str = include_str!("../data/lifecycle_catalog.json");

#[derive(Debug, Clone, Deserialize)]
struct CatalogDocument {
    schema_version: u32,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
    #[serde(default)]
    technologies: BTreeMap<String, TechnologyEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct TechnologyEntry {
    /// Lifecycle status keyed by release identifier: exact version,
    /// major.minor, or major-only.
    releases: BTreeMap<String, LifecycleStatus>,
}

/// Parsed, immutable lifecycle catalog.
#[derive(Debug, Clone, Default)]
pub struct LifecycleCatalog {
    schema_version: u32,
    aliases: BTreeMap<String, String>,
    technologies: BTreeMap<String, TechnologyEntry>,
}

impl LifecycleCatalog {
    /// Parses a catalog from its JSON form.  Exposed so load-failure
    /// handling can be exercised in isolation.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let document: CatalogDocument = serde_json::from_str(raw)?;
        Ok(Self {
            schema_version: document.schema_version,
            aliases: document.aliases,
            technologies: document.technologies,
        })
    }

    /// An empty catalog; every lookup resolves to unknown.
    pub fn empty() -> Self {
        Self::default()
    }

    pub const fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty()
    }

    /// Normalizes a technology name: trimmed, lower-cased, alias-resolved.
    pub fn normalize_name(&self, name: &str) -> String {
        let lowered = name.trim().to_ascii_lowercase();
        match self.aliases.get(&lowered) {
            Some(canonical) => canonical.clone(),
            None => lowered,
        }
    }

    /// Resolves the lifecycle status of a `(technology, version)` pair.
    ///
    /// Matching precedence: exact version, then `major.minor`, then
    /// major-only.  `None` means unknown.
    pub fn resolve(&self, name: &str, version: &str) -> Option<LifecycleStatus> {
        let entry = self.technologies.get(&self.normalize_name(name))?;
        let version = version.trim();
        if version.is_empty() {
            return None;
        }

        if let Some(status) = entry.releases.get(version) {
            return Some(*status);
        }

        let segments: Vec<&str> = version.split('.').collect();
        if segments.len() >= 2 {
            let major_minor = format!("{}.{}", segments[0], segments[1]);
            if let Some(status) = entry.releases.get(major_minor.as_str()) {
                return Some(*status);
            }
        }
        entry.releases.get(segments[0]).copied()
    }
}

static CATALOG: OnceLock<LifecycleCatalog> = OnceLock::new();

/// The process-wide catalog.  Loaded once on first use; concurrent readers
/// need no further synchronization.
pub fn catalog() -> &'static LifecycleCatalog {
    CATALOG.get_or_init(|| match LifecycleCatalog::from_json_str(EMBEDDED_CATALOG) {
        Ok(catalog) => catalog,
        Err(error) => {
            tracing::warn!(
                target: "govhealth::lifecycle",
                %error,
                "embedded lifecycle catalog failed to parse; degrading to empty catalog"
            );
            LifecycleCatalog::empty()
        }
    })
}
