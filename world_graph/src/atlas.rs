//! World atlas - the registry and graph behind one lock.
//!
//! Every mutation takes the write lock for its whole validate-then-insert
//! sequence, so a cycle check can never be invalidated by a concurrent
//! insertion. Reads take the read lock and return owned copies.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{info, instrument};
use world_model::{
    AtlasConfig, Entity, EntityId, EntityType, NewEntity, RelationshipType, Result, WorldId,
};

use crate::hierarchy::HierarchyQuery;
use crate::snapshot::AtlasSnapshot;
use crate::store::{Edge, EntityRegistry, RelationshipGraph};

#[derive(Debug, Default)]
struct AtlasState {
    registry: EntityRegistry,
    graph: RelationshipGraph,
}

/// Thread-safe entry point to a world atlas.
#[derive(Debug, Default)]
pub struct WorldAtlas {
    state: RwLock<AtlasState>,
    config: AtlasConfig,
}

impl WorldAtlas {
    /// Create an empty atlas with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty atlas with the given configuration.
    pub fn with_config(config: AtlasConfig) -> Self {
        let state = AtlasState {
            registry: EntityRegistry::with_policy(config.entities.clone()),
            graph: RelationshipGraph::with_policy(config.hierarchy.clone()),
        };
        Self {
            state: RwLock::new(state),
            config,
        }
    }

    /// Rebuild an atlas from a snapshot, re-validating everything in it.
    #[instrument(skip_all)]
    pub fn restore(snapshot: &AtlasSnapshot, config: AtlasConfig) -> Result<Self> {
        let (registry, graph) = snapshot.rebuild(&config)?;
        info!(entities = registry.len(), edges = graph.edge_count(), "Restored atlas");
        Ok(Self {
            state: RwLock::new(AtlasState { registry, graph }),
            config,
        })
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    // Stores are mutated only after validation, so a poisoned lock still
    // guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, AtlasState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AtlasState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn query<T>(&self, f: impl FnOnce(HierarchyQuery<'_>) -> T) -> T {
        let state = self.read();
        f(HierarchyQuery::new(&state.registry, &state.graph))
    }

    // Entities

    pub fn create_entity(&self, request: NewEntity) -> Result<Entity> {
        self.write().registry.create_entity(request)
    }

    pub fn entity(&self, id: EntityId) -> Option<Entity> {
        self.read().registry.get(id).cloned()
    }

    /// A world's entities in creation order, optionally of one type.
    pub fn entities_in_world(&self, world_id: &WorldId, entity_type: Option<EntityType>) -> Vec<Entity> {
        self.read().registry.list_by_world(world_id, entity_type)
    }

    pub fn entity_count(&self) -> usize {
        self.read().registry.len()
    }

    // Relationships

    /// Add an edge and its inverse. Returns `Ok(false)` if already present.
    pub fn add_relationship(
        &self,
        source: EntityId,
        target: EntityId,
        relationship: RelationshipType,
    ) -> Result<bool> {
        let mut state = self.write();
        let AtlasState { registry, graph } = &mut *state;
        graph.add_relationship(registry, source, target, relationship)
    }

    pub fn relationships(&self, entity_id: EntityId) -> Vec<Edge> {
        self.read().graph.relationships(entity_id).to_vec()
    }

    /// Outgoing edges, optionally only those of one kind.
    pub fn relationships_filtered(
        &self,
        entity_id: EntityId,
        relationship: Option<RelationshipType>,
    ) -> Vec<Edge> {
        match relationship {
            Some(kind) => self.read().graph.relationships_of_type(entity_id, kind),
            None => self.relationships(entity_id),
        }
    }

    pub fn related_entities(
        &self,
        entity_id: EntityId,
        relationship: Option<RelationshipType>,
    ) -> Vec<Entity> {
        let state = self.read();
        state
            .graph
            .related_entities(&state.registry, entity_id, relationship)
    }

    // Hierarchy

    pub fn ancestors_of(&self, location_id: EntityId) -> Vec<Entity> {
        self.query(|q| q.ancestors_of(location_id))
    }

    pub fn descendants_of(&self, location_id: EntityId) -> Vec<Entity> {
        self.query(|q| q.descendants_of(location_id))
    }

    pub fn events_visible_at(&self, location_id: EntityId) -> Vec<Entity> {
        self.query(|q| q.events_visible_at(location_id))
    }

    pub fn events_enclosing(&self, location_id: EntityId) -> Vec<Entity> {
        self.query(|q| q.events_enclosing(location_id))
    }

    pub fn events_within(&self, location_id: EntityId) -> Vec<Entity> {
        self.query(|q| q.events_within(location_id))
    }

    pub fn sub_events_of(&self, event_id: EntityId) -> Vec<Entity> {
        self.query(|q| q.sub_events_of(event_id))
    }

    pub fn sub_factions_of(&self, faction_id: EntityId) -> Vec<Entity> {
        self.query(|q| q.sub_factions_of(faction_id))
    }

    pub fn members_of(&self, faction_id: EntityId) -> Vec<Entity> {
        self.query(|q| q.members_of(faction_id))
    }

    pub fn neighbors_of(&self, location_id: EntityId) -> Vec<Entity> {
        self.query(|q| q.neighbors_of(location_id))
    }

    // Persistence

    /// Capture the current state.
    pub fn snapshot(&self) -> AtlasSnapshot {
        let state = self.read();
        AtlasSnapshot::capture(&state.registry, &state.graph)
    }
}
