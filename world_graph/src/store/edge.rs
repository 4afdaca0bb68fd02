//! Edge definitions for the relationship graph.

use serde::{Deserialize, Serialize};
use world_model::{EntityId, RelationshipType};

/// An outgoing edge as stored on its source entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub target: EntityId,
    pub relationship_type: RelationshipType,
}

impl Edge {
    pub fn new(target: EntityId, relationship_type: RelationshipType) -> Self {
        Self {
            target,
            relationship_type,
        }
    }

    /// The edge that must exist on the target, if this kind has an inverse.
    pub fn inverse_from(&self, source: EntityId) -> Option<Edge> {
        self.relationship_type
            .inverse()
            .map(|inverse| Edge::new(source, inverse))
    }
}

/// A fully qualified edge, as written to a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: EntityId,
    pub relationship_type: RelationshipType,
    pub target: EntityId,
}

impl EdgeRecord {
    pub fn new(source: EntityId, edge: Edge) -> Self {
        Self {
            source,
            relationship_type: edge.relationship_type,
            target: edge.target,
        }
    }
}

impl std::fmt::Display for EdgeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} --{}--> {}", self.source, self.relationship_type, self.target)
    }
}
