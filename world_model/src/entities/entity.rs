//! Entity records and the request used to create them.

use serde::{Deserialize, Serialize};

use super::{EntityId, EntityType, EventSpan, WorldId};
use crate::time::WorldTime;

/// A named, typed object owned by a world.
///
/// Entities are immutable value records once created: the registry hands out
/// copies, and relationships live in the graph rather than on the entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub world_id: WorldId,
    pub entity_type: EntityType,
    pub name: String,
    pub summary: String,

    // Event-only fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beginning_timestamp: Option<WorldTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending_timestamp: Option<WorldTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_location_id: Option<EntityId>,
}

impl Entity {
    pub fn is_event(&self) -> bool {
        self.entity_type == EntityType::Event
    }

    pub fn is_location(&self) -> bool {
        self.entity_type == EntityType::Location
    }

    /// The event's time span. Empty for non-events.
    pub fn event_span(&self) -> EventSpan {
        EventSpan {
            beginning: self.beginning_timestamp,
            ending: self.ending_timestamp,
        }
    }

    /// Check if this event is anchored at the given location.
    pub fn is_anchored_at(&self, location_id: EntityId) -> bool {
        self.anchor_location_id == Some(location_id)
    }
}

/// Everything needed to create an entity. Validated by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntity {
    pub world_id: WorldId,
    pub entity_type: EntityType,
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub beginning_timestamp: Option<WorldTime>,
    #[serde(default)]
    pub ending_timestamp: Option<WorldTime>,
    #[serde(default)]
    pub anchor_location_id: Option<EntityId>,
}

impl NewEntity {
    /// Start a creation request for an entity of the given type.
    pub fn new(world_id: impl Into<WorldId>, entity_type: EntityType, name: impl Into<String>) -> Self {
        Self {
            world_id: world_id.into(),
            entity_type,
            name: name.into(),
            summary: String::new(),
            beginning_timestamp: None,
            ending_timestamp: None,
            anchor_location_id: None,
        }
    }

    pub fn location(world_id: impl Into<WorldId>, name: impl Into<String>) -> Self {
        Self::new(world_id, EntityType::Location, name)
    }

    pub fn event(world_id: impl Into<WorldId>, name: impl Into<String>) -> Self {
        Self::new(world_id, EntityType::Event, name)
    }

    pub fn faction(world_id: impl Into<WorldId>, name: impl Into<String>) -> Self {
        Self::new(world_id, EntityType::Faction, name)
    }

    pub fn creature(world_id: impl Into<WorldId>, name: impl Into<String>) -> Self {
        Self::new(world_id, EntityType::Creature, name)
    }

    /// Set the summary text.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set when the event begins.
    pub fn with_beginning(mut self, timestamp: WorldTime) -> Self {
        self.beginning_timestamp = Some(timestamp);
        self
    }

    /// Set when the event ends.
    pub fn with_ending(mut self, timestamp: WorldTime) -> Self {
        self.ending_timestamp = Some(timestamp);
        self
    }

    /// Anchor the event at a location.
    pub fn with_anchor(mut self, location_id: EntityId) -> Self {
        self.anchor_location_id = Some(location_id);
        self
    }

    pub fn has_timestamps(&self) -> bool {
        self.beginning_timestamp.is_some() || self.ending_timestamp.is_some()
    }

    /// Turn the request into a record under the given id.
    ///
    /// Names are trimmed. Timestamps survive only on events.
    pub fn into_entity(self, id: EntityId) -> Entity {
        let is_event = self.entity_type == EntityType::Event;
        Entity {
            id,
            world_id: self.world_id,
            entity_type: self.entity_type,
            name: self.name.trim().to_string(),
            summary: self.summary,
            beginning_timestamp: self.beginning_timestamp.filter(|_| is_event),
            ending_timestamp: self.ending_timestamp.filter(|_| is_event),
            anchor_location_id: self.anchor_location_id,
        }
    }
}
