//! Entity registry - creates entities and looks them up by id.

use std::collections::HashMap;

use tracing::{debug, instrument};
use world_model::{
    Entity, EntityId, EntityPolicy, EntityType, NewEntity, Result, WorldError, WorldId,
};

/// Owns every entity of every world.
///
/// Entities are kept in creation order and are never removed or changed
/// after creation.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    /// All entities stored by ID.
    entities: HashMap<EntityId, Entity>,

    /// Creation order.
    order: Vec<EntityId>,

    /// Index: anchor location -> events anchored there, in creation order.
    events_by_anchor: HashMap<EntityId, Vec<EntityId>>,

    policy: EntityPolicy,
}

impl EntityRegistry {
    /// Create a new empty registry with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry applying the given creation rules.
    pub fn with_policy(policy: EntityPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> &EntityPolicy {
        &self.policy
    }

    /// Validate a creation request and store the new entity.
    ///
    /// Returns a copy of the stored record.
    #[instrument(skip(self, request), fields(world_id = %request.world_id, entity_type = %request.entity_type))]
    pub fn create_entity(&mut self, request: NewEntity) -> Result<Entity> {
        self.validate_request(&request)?;

        let entity = request.into_entity(EntityId::new());
        self.store(entity.clone());

        debug!(entity_id = %entity.id, name = %entity.name, "Created entity");
        Ok(entity)
    }

    /// Store an entity that already has an id, running the same checks as
    /// creation. Used when rebuilding from a snapshot.
    pub fn insert_existing(&mut self, entity: Entity) -> Result<()> {
        if self.entities.contains_key(&entity.id) {
            return Err(WorldError::validation(format!(
                "Duplicate entity id: {}",
                entity.id
            )));
        }
        if !entity.is_event()
            && (entity.beginning_timestamp.is_some() || entity.ending_timestamp.is_some())
        {
            return Err(WorldError::validation(format!(
                "Entity {} carries timestamps but is not an event",
                entity.id
            )));
        }

        let id = entity.id;
        let request = NewEntity {
            world_id: entity.world_id,
            entity_type: entity.entity_type,
            name: entity.name,
            summary: entity.summary,
            beginning_timestamp: entity.beginning_timestamp,
            ending_timestamp: entity.ending_timestamp,
            anchor_location_id: entity.anchor_location_id,
        };
        self.validate_request(&request)?;

        self.store(request.into_entity(id));
        Ok(())
    }

    fn store(&mut self, entity: Entity) {
        let id = entity.id;
        if let Some(anchor) = entity.anchor_location_id {
            self.events_by_anchor.entry(anchor).or_default().push(id);
        }
        self.order.push(id);
        self.entities.insert(id, entity);
    }

    fn validate_request(&self, request: &NewEntity) -> Result<()> {
        if request.world_id.is_empty() {
            return Err(WorldError::validation("World id cannot be empty"));
        }
        if request.name.trim().is_empty() {
            return Err(WorldError::validation("Entity name cannot be empty"));
        }

        if let Some(anchor_id) = request.anchor_location_id {
            self.validate_anchor(request, anchor_id)?;
        }

        if self.policy.strict_event_fields {
            if request.entity_type != EntityType::Event && request.has_timestamps() {
                return Err(WorldError::validation(format!(
                    "Timestamps are only allowed on events, not on a {}",
                    request.entity_type
                )));
            }
            if let (Some(begin), Some(end)) = (request.beginning_timestamp, request.ending_timestamp)
            {
                if end < begin {
                    return Err(WorldError::validation("Event cannot end before it begins"));
                }
            }
        }

        if self.policy.unique_names {
            let name = request.name.trim();
            let taken = self.order.iter().filter_map(|id| self.entities.get(id)).any(|e| {
                e.world_id == request.world_id
                    && e.entity_type == request.entity_type
                    && e.name.eq_ignore_ascii_case(name)
            });
            if taken {
                return Err(WorldError::validation(format!(
                    "A {} named '{}' already exists in world {}",
                    request.entity_type, name, request.world_id
                )));
            }
        }

        Ok(())
    }

    fn validate_anchor(&self, request: &NewEntity, anchor_id: EntityId) -> Result<()> {
        if request.entity_type != EntityType::Event {
            return Err(WorldError::validation(
                "Only events can be anchored at a location",
            ));
        }

        let anchor = self
            .entities
            .get(&anchor_id)
            .ok_or_else(|| WorldError::not_found("Anchor location", anchor_id))?;

        if !anchor.is_location() {
            return Err(WorldError::validation(format!(
                "Anchor {} is a {}, not a location",
                anchor_id, anchor.entity_type
            )));
        }
        if anchor.world_id != request.world_id {
            return Err(WorldError::validation(
                "Anchor location belongs to a different world",
            ));
        }
        Ok(())
    }

    /// Get entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// List a world's entities in creation order, optionally of one type.
    ///
    /// The result is a copy; later creations are not visible through it.
    pub fn list_by_world(&self, world_id: &WorldId, entity_type: Option<EntityType>) -> Vec<Entity> {
        self.iter()
            .filter(|e| &e.world_id == world_id)
            .filter(|e| entity_type.map_or(true, |t| e.entity_type == t))
            .cloned()
            .collect()
    }

    /// Events anchored exactly at the given location, in creation order.
    pub fn events_anchored_at(&self, location_id: EntityId) -> impl Iterator<Item = &Entity> {
        self.events_by_anchor
            .get(&location_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.entities.get(id))
    }

    /// Iterate over every entity in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// Get the total number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
