//! Hierarchy queries - read-only views over location containment.
//!
//! Event visibility works as follows:
//! 1. **Ancestors**: walk "is contained by" edges up from the location
//! 2. **Descendants**: walk "contains" edges down from the location
//! 3. **Anchors**: collect events anchored at the location or any node found
//!
//! An event in the docks is therefore visible from the city that contains
//! them, and a city-wide event is visible from the docks.

mod traversal;

pub use traversal::*;

use std::collections::HashSet;

use tracing::trace;
use world_model::{Entity, EntityId, EntityType, RelationshipType};

use crate::store::{EntityRegistry, RelationshipGraph};

/// Read-only queries over a registry and graph. Never mutates either.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyQuery<'a> {
    registry: &'a EntityRegistry,
    graph: &'a RelationshipGraph,
}

impl<'a> HierarchyQuery<'a> {
    pub fn new(registry: &'a EntityRegistry, graph: &'a RelationshipGraph) -> Self {
        Self { registry, graph }
    }

    /// Every entity reached by repeatedly following "is contained by"
    /// edges, nearest first.
    ///
    /// Terminates and excludes the start even if the graph held a cycle.
    pub fn ancestors_of(&self, location_id: EntityId) -> Vec<Entity> {
        self.resolve(self.walk(location_id, RelationshipType::IsContainedBy))
    }

    /// Every entity reached by repeatedly following "contains" edges,
    /// nearest first.
    pub fn descendants_of(&self, location_id: EntityId) -> Vec<Entity> {
        self.resolve(self.walk(location_id, RelationshipType::Contains))
    }

    /// Events anchored at the location or any of its ancestors.
    pub fn events_enclosing(&self, location_id: EntityId) -> Vec<Entity> {
        let mut scope = vec![location_id];
        scope.extend(self.walk(location_id, RelationshipType::IsContainedBy));
        self.events_anchored_in(&scope)
    }

    /// Events anchored at the location or any of its descendants.
    pub fn events_within(&self, location_id: EntityId) -> Vec<Entity> {
        let mut scope = vec![location_id];
        scope.extend(self.walk(location_id, RelationshipType::Contains));
        self.events_anchored_in(&scope)
    }

    /// Events visible at a location: anchored at the location itself, at
    /// any ancestor, or at any descendant.
    ///
    /// Events at siblings or elsewhere in the world are not included. The
    /// order is stable for a given graph state.
    pub fn events_visible_at(&self, location_id: EntityId) -> Vec<Entity> {
        let mut scope = vec![location_id];
        scope.extend(self.walk(location_id, RelationshipType::IsContainedBy));
        scope.extend(self.walk(location_id, RelationshipType::Contains));

        let events = self.events_anchored_in(&scope);
        trace!(%location_id, scope = scope.len(), events = events.len(), "Resolved visible events");
        events
    }

    /// Events one "contains" hop below the event.
    pub fn sub_events_of(&self, event_id: EntityId) -> Vec<Entity> {
        self.one_hop(event_id, RelationshipType::Contains, EntityType::Event)
    }

    /// Factions one "contains" hop below the faction.
    pub fn sub_factions_of(&self, faction_id: EntityId) -> Vec<Entity> {
        self.one_hop(faction_id, RelationshipType::Contains, EntityType::Faction)
    }

    /// Creatures the faction "has member" edges point at.
    pub fn members_of(&self, faction_id: EntityId) -> Vec<Entity> {
        self.one_hop(faction_id, RelationshipType::HasMember, EntityType::Creature)
    }

    /// Locations related by any adjacency kind, each listed once.
    pub fn neighbors_of(&self, location_id: EntityId) -> Vec<Entity> {
        let mut seen = HashSet::new();
        let ids: Vec<_> = self
            .graph
            .relationships(location_id)
            .iter()
            .filter(|e| e.relationship_type.is_symmetric())
            .map(|e| e.target)
            .filter(|id| seen.insert(*id))
            .collect();
        self.resolve(ids)
    }

    fn walk(&self, start: EntityId, relationship: RelationshipType) -> Vec<EntityId> {
        Traversal::new(start, |id: EntityId| self.graph.targets(id, relationship)).collect()
    }

    fn one_hop(
        &self,
        entity_id: EntityId,
        relationship: RelationshipType,
        target_type: EntityType,
    ) -> Vec<Entity> {
        self.graph
            .targets(entity_id, relationship)
            .filter_map(|id| self.registry.get(id))
            .filter(|e| e.entity_type == target_type)
            .cloned()
            .collect()
    }

    fn events_anchored_in(&self, scope: &[EntityId]) -> Vec<Entity> {
        let mut seen = HashSet::new();
        scope
            .iter()
            .filter(|id| seen.insert(**id))
            .flat_map(|id| self.registry.events_anchored_at(*id))
            .filter(|e| e.is_event())
            .cloned()
            .collect()
    }

    fn resolve(&self, ids: impl IntoIterator<Item = EntityId>) -> Vec<Entity> {
        ids.into_iter()
            .filter_map(|id| self.registry.get(id))
            .cloned()
            .collect()
    }
}
