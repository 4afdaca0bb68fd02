//! End-to-end scenarios against the atlas facade.

use std::collections::HashSet;

use tracing_subscriber::EnvFilter;
use world_graph::{Edge, WorldAtlas};
use world_model::{EntityId, EntityType, NewEntity, RelationshipType, WorldError, WorldId};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn location(atlas: &WorldAtlas, world: &str, name: &str) -> EntityId {
    atlas
        .create_entity(NewEntity::location(world, name))
        .unwrap()
        .id
}

fn visible_names(atlas: &WorldAtlas, location_id: EntityId) -> HashSet<String> {
    atlas
        .events_visible_at(location_id)
        .into_iter()
        .map(|e| e.name)
        .collect()
}

// =============================================================================
// Capital and docks
// =============================================================================

#[test]
fn storm_at_docks_is_visible_from_capital() {
    init_tracing();
    let atlas = WorldAtlas::new();
    let capital = location(&atlas, "W", "Capital");
    let docks = location(&atlas, "W", "Docks");

    atlas
        .add_relationship(docks, capital, RelationshipType::IsContainedBy)
        .unwrap();
    atlas
        .create_entity(NewEntity::event("W", "Storm").with_anchor(docks))
        .unwrap();

    assert!(visible_names(&atlas, capital).contains("Storm"));
    assert!(atlas
        .relationships(capital)
        .contains(&Edge::new(docks, RelationshipType::Contains)));
}

#[test]
fn capital_cannot_be_contained_by_its_own_docks() {
    init_tracing();
    let atlas = WorldAtlas::new();
    let capital = location(&atlas, "W", "Capital");
    let docks = location(&atlas, "W", "Docks");
    atlas
        .add_relationship(docks, capital, RelationshipType::IsContainedBy)
        .unwrap();

    let capital_before = atlas.relationships(capital);
    let docks_before = atlas.relationships(docks);

    let err = atlas
        .add_relationship(capital, docks, RelationshipType::IsContainedBy)
        .unwrap_err();
    assert!(matches!(err, WorldError::Validation(ref msg) if msg.contains("circular reference")));

    assert_eq!(atlas.relationships(capital), capital_before);
    assert_eq!(atlas.relationships(docks), docks_before);
}

// =============================================================================
// Hierarchy propagation
// =============================================================================

#[test]
fn events_propagate_along_the_chain_but_not_to_siblings() {
    let atlas = WorldAtlas::new();
    let a = location(&atlas, "W", "A");
    let b = location(&atlas, "W", "B");
    let c = location(&atlas, "W", "C");
    let sibling = location(&atlas, "W", "Sibling");

    atlas.add_relationship(c, b, RelationshipType::IsContainedBy).unwrap();
    atlas.add_relationship(b, a, RelationshipType::IsContainedBy).unwrap();
    atlas.add_relationship(sibling, b, RelationshipType::IsContainedBy).unwrap();

    atlas
        .create_entity(NewEntity::event("W", "Flood").with_anchor(c))
        .unwrap();
    atlas
        .create_entity(NewEntity::event("W", "Market").with_anchor(sibling))
        .unwrap();

    for place in [a, b, c] {
        assert!(visible_names(&atlas, place).contains("Flood"));
    }
    assert!(!visible_names(&atlas, c).contains("Market"));

    let ancestors: Vec<_> = atlas.ancestors_of(c).into_iter().map(|e| e.id).collect();
    assert_eq!(ancestors, vec![b, a]);
}

// =============================================================================
// World isolation
// =============================================================================

#[test]
fn worlds_do_not_mix() {
    let atlas = WorldAtlas::new();
    let here = location(&atlas, "north", "Here");
    let there = location(&atlas, "south", "There");

    for kind in RelationshipType::ALL {
        assert!(atlas.add_relationship(here, there, kind).is_err());
    }

    let north = atlas.entities_in_world(&WorldId::new("north"), None);
    assert_eq!(north.len(), 1);
    assert!(north.iter().all(|e| e.world_id == WorldId::new("north")));

    let err = atlas
        .create_entity(NewEntity::event("south", "Raid").with_anchor(here))
        .unwrap_err();
    assert!(err.is_validation());
}

// =============================================================================
// Factions and events
// =============================================================================

#[test]
fn faction_and_event_composition() {
    let atlas = WorldAtlas::new();
    let crown = atlas.create_entity(NewEntity::faction("W", "Crown")).unwrap().id;
    let guard = atlas.create_entity(NewEntity::faction("W", "Guard")).unwrap().id;
    let captain = atlas.create_entity(NewEntity::creature("W", "Captain")).unwrap().id;
    let war = atlas.create_entity(NewEntity::event("W", "War")).unwrap().id;
    let siege = atlas.create_entity(NewEntity::event("W", "Siege")).unwrap().id;

    atlas.add_relationship(crown, guard, RelationshipType::Contains).unwrap();
    atlas.add_relationship(guard, captain, RelationshipType::HasMember).unwrap();
    atlas.add_relationship(war, siege, RelationshipType::Contains).unwrap();

    assert_eq!(atlas.sub_factions_of(crown)[0].id, guard);
    assert_eq!(atlas.members_of(guard)[0].id, captain);
    assert_eq!(atlas.sub_events_of(war)[0].id, siege);

    // Creatures cannot hold members, events cannot border
    assert!(atlas
        .add_relationship(captain, guard, RelationshipType::HasMember)
        .is_err());
    assert!(atlas
        .add_relationship(war, siege, RelationshipType::BordersAgainst)
        .is_err());

    let events = atlas.entities_in_world(&WorldId::new("W"), Some(EntityType::Event));
    assert_eq!(events.len(), 2);
}

#[test]
fn snapshot_survives_json_round_trip() {
    let atlas = WorldAtlas::new();
    let capital = location(&atlas, "W", "Capital");
    let docks = location(&atlas, "W", "Docks");
    atlas.add_relationship(capital, docks, RelationshipType::Contains).unwrap();
    atlas
        .create_entity(NewEntity::event("W", "Storm").with_anchor(docks))
        .unwrap();

    let json = atlas.snapshot().to_json().unwrap();
    let snapshot = world_graph::AtlasSnapshot::from_json(&json).unwrap();
    let restored = WorldAtlas::restore(&snapshot, atlas.config().clone()).unwrap();

    assert_eq!(visible_names(&restored, capital), visible_names(&atlas, capital));
    assert_eq!(restored.relationships(docks), atlas.relationships(docks));
}
