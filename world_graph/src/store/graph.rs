//! Relationship Graph - directed, typed edges between entities.

use std::collections::HashMap;

use tracing::{debug, instrument, trace};
use world_model::{
    Entity, EntityId, HierarchyPolicy, RelationshipDomain, RelationshipType, Result, WorldError,
};

use super::{Edge, EdgeRecord, EntityRegistry};
use crate::hierarchy::Traversal;

/// Outgoing edges of every entity, keyed by source.
///
/// Every insertion also stores the inverse edge on the target (for kinds
/// that have one), self loops are refused, and hierarchical edges are
/// refused when they would close a containment cycle.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    /// Adjacency list in insertion order.
    edges: HashMap<EntityId, Vec<Edge>>,

    /// Every stored edge across all sources, in insertion order.
    log: Vec<EdgeRecord>,

    policy: HierarchyPolicy,
}

impl RelationshipGraph {
    /// Create a new empty graph. Only location containment is cycle-checked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph that cycle-checks the domains in `policy`.
    pub fn with_policy(policy: HierarchyPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> &HierarchyPolicy {
        &self.policy
    }

    /// Add an edge and its inverse.
    ///
    /// Returns `Ok(false)` when the forward edge already existed. On error
    /// nothing is inserted.
    ///
    /// # Errors
    ///
    /// - `NotFound` if either endpoint is unknown (source checked first)
    /// - `Validation` if the endpoint types do not fit the relationship,
    ///   the endpoints live in different worlds, source equals target, or a
    ///   hierarchical edge would create a cycle
    #[instrument(skip_all, fields(%source, %target, %relationship))]
    pub fn add_relationship(
        &mut self,
        registry: &EntityRegistry,
        source: EntityId,
        target: EntityId,
        relationship: RelationshipType,
    ) -> Result<bool> {
        let source_entity = registry
            .get(source)
            .ok_or_else(|| WorldError::not_found("Source entity", source))?;
        let target_entity = registry
            .get(target)
            .ok_or_else(|| WorldError::not_found("Target entity", target))?;

        let domain = RelationshipDomain::classify(
            source_entity.entity_type,
            target_entity.entity_type,
            relationship,
        )?;

        if source_entity.world_id != target_entity.world_id {
            return Err(WorldError::validation(
                "Cannot relate entities from different worlds",
            ));
        }

        if source == target {
            return Err(WorldError::validation("Entity cannot relate to itself"));
        }

        if relationship.is_hierarchical()
            && self.policy.enforces_acyclic(domain)
            && self.would_create_cycle(source, target, relationship)
        {
            debug!("Rejected edge: would create circular reference");
            return Err(WorldError::validation(format!(
                "Adding '{}' from {} to {} would create circular reference",
                relationship, source_entity.name, target_entity.name
            )));
        }

        if self.has_edge(source, relationship, target) {
            trace!("Edge already present");
            return Ok(false);
        }

        let forward = Edge::new(target, relationship);
        self.push(source, forward);

        if let Some(inverse) = forward.inverse_from(source) {
            if !self.has_edge(target, inverse.relationship_type, source) {
                self.push(target, inverse);
            }
        }

        debug!(?domain, "Added relationship");
        Ok(true)
    }

    fn push(&mut self, source: EntityId, edge: Edge) {
        self.edges.entry(source).or_default().push(edge);
        self.log.push(EdgeRecord::new(source, edge));
    }

    /// Check if adding `source --relationship--> target` would close a loop.
    ///
    /// Walks from `target` along edges of the same kind; reaching `source`
    /// means the new edge would complete a cycle.
    pub fn would_create_cycle(
        &self,
        source: EntityId,
        target: EntityId,
        relationship: RelationshipType,
    ) -> bool {
        source == target || self.reaches(target, source, relationship)
    }

    /// Check if `goal` can be reached from `start` following only
    /// `relationship` edges.
    pub fn reaches(&self, start: EntityId, goal: EntityId, relationship: RelationshipType) -> bool {
        Traversal::new(start, |id: EntityId| self.targets(id, relationship)).reaches(goal)
    }

    /// Check if the exact edge exists.
    pub fn has_edge(
        &self,
        source: EntityId,
        relationship: RelationshipType,
        target: EntityId,
    ) -> bool {
        self.relationships(source)
            .iter()
            .any(|e| e.target == target && e.relationship_type == relationship)
    }

    /// All outgoing edges of an entity, in insertion order.
    ///
    /// Unknown or edge-less ids give an empty slice.
    pub fn relationships(&self, entity_id: EntityId) -> &[Edge] {
        self.edges.get(&entity_id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Outgoing edges of one kind, in insertion order.
    pub fn relationships_of_type(
        &self,
        entity_id: EntityId,
        relationship: RelationshipType,
    ) -> Vec<Edge> {
        self.relationships(entity_id)
            .iter()
            .filter(|e| e.relationship_type == relationship)
            .copied()
            .collect()
    }

    /// Targets of an entity's outgoing edges of one kind.
    pub fn targets(
        &self,
        entity_id: EntityId,
        relationship: RelationshipType,
    ) -> impl Iterator<Item = EntityId> + '_ {
        self.relationships(entity_id)
            .iter()
            .filter(move |e| e.relationship_type == relationship)
            .map(|e| e.target)
    }

    /// Resolve edge targets to entities, optionally for one kind only.
    ///
    /// Targets that no longer resolve are skipped.
    pub fn related_entities(
        &self,
        registry: &EntityRegistry,
        entity_id: EntityId,
        relationship: Option<RelationshipType>,
    ) -> Vec<Entity> {
        self.relationships(entity_id)
            .iter()
            .filter(|e| relationship.map_or(true, |r| e.relationship_type == r))
            .filter_map(|e| registry.get(e.target))
            .cloned()
            .collect()
    }

    /// Every stored edge, inverses included, in the order it was stored.
    ///
    /// Replaying these through `add_relationship` reproduces each entity's
    /// edge order exactly.
    pub fn records(&self) -> &[EdgeRecord] {
        &self.log
    }

    /// Get the total number of stored edges, inverses included.
    pub fn edge_count(&self) -> usize {
        self.log.len()
    }
}
