//! Snapshots - the durable form of an atlas: an entity table and an edge
//! table. Loading replays both through the normal validation paths.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use world_model::{AtlasConfig, Entity, Result};

use crate::store::{EdgeRecord, EntityRegistry, RelationshipGraph};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtlasSnapshot {
    /// Entities in creation order.
    pub entities: Vec<Entity>,

    /// Every stored edge, inverses included, in insertion order.
    pub edges: Vec<EdgeRecord>,
}

impl AtlasSnapshot {
    /// Copy the current contents of a registry and graph.
    pub fn capture(registry: &EntityRegistry, graph: &RelationshipGraph) -> Self {
        Self {
            entities: registry.iter().cloned().collect(),
            edges: graph.records().to_vec(),
        }
    }

    /// Rebuild a registry and graph, re-checking every entity and edge rule.
    ///
    /// Edges missing their inverse get it back; anything that fails
    /// validation aborts the whole rebuild.
    #[instrument(skip_all, fields(entities = self.entities.len(), edges = self.edges.len()))]
    pub fn rebuild(&self, config: &AtlasConfig) -> Result<(EntityRegistry, RelationshipGraph)> {
        let mut registry = EntityRegistry::with_policy(config.entities.clone());
        for entity in &self.entities {
            registry.insert_existing(entity.clone())?;
        }

        let mut graph = RelationshipGraph::with_policy(config.hierarchy.clone());
        for record in &self.edges {
            graph.add_relationship(
                &registry,
                record.source,
                record.target,
                record.relationship_type,
            )?;
        }

        debug!(edge_count = graph.edge_count(), "Rebuilt atlas from snapshot");
        Ok((registry, graph))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
