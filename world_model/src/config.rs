//! Atlas configuration, loaded from TOML.
//!
//! The defaults keep the historical behavior: timestamps on non-events are
//! dropped, event spans are unordered, and only location containment is
//! checked for cycles.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::relationships::RelationshipDomain;

/// Top-level configuration for a world atlas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub entities: EntityPolicy,
    pub hierarchy: HierarchyPolicy,
}

impl AtlasConfig {
    /// Parse configuration from a TOML document. Missing keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// Rules applied when entities are created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityPolicy {
    /// Reject timestamps on non-event entities and events that end before
    /// they begin.
    pub strict_event_fields: bool,

    /// Reject a second entity with the same name and type in one world.
    pub unique_names: bool,
}

/// Which hierarchical domains must stay acyclic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyPolicy {
    /// Cycle-check "contains" edges between events.
    pub acyclic_event_composition: bool,

    /// Cycle-check "contains" edges between factions.
    pub acyclic_faction_nesting: bool,
}

impl HierarchyPolicy {
    /// Check if hierarchical edges in the domain must be cycle-checked.
    pub fn enforces_acyclic(&self, domain: RelationshipDomain) -> bool {
        match domain {
            RelationshipDomain::Location => true,
            RelationshipDomain::EventComposition => self.acyclic_event_composition,
            RelationshipDomain::FactionNesting => self.acyclic_faction_nesting,
            RelationshipDomain::Membership => false,
        }
    }

    /// Policy with every hierarchical domain checked.
    pub fn strict() -> Self {
        Self {
            acyclic_event_composition: true,
            acyclic_faction_nesting: true,
        }
    }
}
