//! The relationship catalog: a closed set of edge labels, each with a
//! statically known inverse and a symmetric/hierarchical classification.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::entities::EntityType;
use crate::error::{Result, WorldError};

/// All relationship kinds an edge can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "is contained by")]
    IsContainedBy,
    #[serde(rename = "borders against")]
    BordersAgainst,
    #[serde(rename = "is near")]
    IsNear,
    #[serde(rename = "is connected to")]
    IsConnectedTo,
    /// Faction to creature membership. Stored one-sided.
    #[serde(rename = "has member")]
    HasMember,
}

impl RelationshipType {
    pub const ALL: [RelationshipType; 6] = [
        RelationshipType::Contains,
        RelationshipType::IsContainedBy,
        RelationshipType::BordersAgainst,
        RelationshipType::IsNear,
        RelationshipType::IsConnectedTo,
        RelationshipType::HasMember,
    ];

    /// The label used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Contains => "contains",
            RelationshipType::IsContainedBy => "is contained by",
            RelationshipType::BordersAgainst => "borders against",
            RelationshipType::IsNear => "is near",
            RelationshipType::IsConnectedTo => "is connected to",
            RelationshipType::HasMember => "has member",
        }
    }

    /// The kind stored on the target when an edge of this kind is added.
    ///
    /// Symmetric kinds are their own inverse. `HasMember` has none.
    pub fn inverse(&self) -> Option<RelationshipType> {
        match self {
            RelationshipType::Contains => Some(RelationshipType::IsContainedBy),
            RelationshipType::IsContainedBy => Some(RelationshipType::Contains),
            RelationshipType::BordersAgainst
            | RelationshipType::IsNear
            | RelationshipType::IsConnectedTo => Some(*self),
            RelationshipType::HasMember => None,
        }
    }

    pub fn is_symmetric(&self) -> bool {
        matches!(
            self,
            RelationshipType::BordersAgainst
                | RelationshipType::IsNear
                | RelationshipType::IsConnectedTo
        )
    }

    /// Hierarchical kinds are the only ones subject to cycle prevention.
    pub fn is_hierarchical(&self) -> bool {
        matches!(
            self,
            RelationshipType::Contains | RelationshipType::IsContainedBy
        )
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipType {
    type Err = WorldError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let label = s.trim();
        RelationshipType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(label))
            .ok_or_else(|| WorldError::UnknownRelationship(s.to_string()))
    }
}

/// Which part of the world an edge belongs to, determined by the types of
/// its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipDomain {
    /// Containment and adjacency between locations.
    Location,
    /// Sub-events of events.
    EventComposition,
    /// Sub-factions of factions.
    FactionNesting,
    /// Creatures belonging to factions.
    Membership,
}

impl RelationshipDomain {
    /// Classify a requested edge, rejecting combinations no domain allows.
    pub fn classify(
        source: EntityType,
        target: EntityType,
        relationship: RelationshipType,
    ) -> Result<Self> {
        let domain = match (source, target) {
            (EntityType::Location, EntityType::Location) => Some(RelationshipDomain::Location),
            (EntityType::Event, EntityType::Event) => Some(RelationshipDomain::EventComposition),
            (EntityType::Faction, EntityType::Faction) => Some(RelationshipDomain::FactionNesting),
            (EntityType::Faction, EntityType::Creature) => Some(RelationshipDomain::Membership),
            _ => None,
        };

        match domain {
            Some(domain) if domain.allows(relationship) => Ok(domain),
            _ => Err(WorldError::validation(format!(
                "Relationship '{}' cannot link a {} to a {}",
                relationship, source, target
            ))),
        }
    }

    pub fn allows(&self, relationship: RelationshipType) -> bool {
        match self {
            RelationshipDomain::Location => relationship != RelationshipType::HasMember,
            RelationshipDomain::EventComposition | RelationshipDomain::FactionNesting => {
                relationship.is_hierarchical()
            }
            RelationshipDomain::Membership => relationship == RelationshipType::HasMember,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverses() {
        assert_eq!(
            RelationshipType::Contains.inverse(),
            Some(RelationshipType::IsContainedBy)
        );
        assert_eq!(
            RelationshipType::IsContainedBy.inverse(),
            Some(RelationshipType::Contains)
        );
        assert_eq!(RelationshipType::HasMember.inverse(), None);
    }

    #[test]
    fn test_symmetric_kinds_are_self_inverse() {
        for kind in RelationshipType::ALL {
            if kind.is_symmetric() {
                assert_eq!(kind.inverse(), Some(kind));
                assert!(!kind.is_hierarchical());
            }
        }
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(
            "is contained by".parse::<RelationshipType>().unwrap(),
            RelationshipType::IsContainedBy
        );
        assert_eq!(
            " Borders Against ".parse::<RelationshipType>().unwrap(),
            RelationshipType::BordersAgainst
        );
        let err = "is friends with".parse::<RelationshipType>().unwrap_err();
        assert!(matches!(err, WorldError::UnknownRelationship(_)));
    }

    #[test]
    fn test_unknown_label_rejected_on_deserialize() {
        let ok: RelationshipType = serde_json::from_str("\"is near\"").unwrap();
        assert_eq!(ok, RelationshipType::IsNear);
        assert!(serde_json::from_str::<RelationshipType>("\"orbits\"").is_err());
    }

    #[test]
    fn test_domain_classification() {
        assert_eq!(
            RelationshipDomain::classify(
                EntityType::Location,
                EntityType::Location,
                RelationshipType::IsNear
            )
            .unwrap(),
            RelationshipDomain::Location
        );
        assert_eq!(
            RelationshipDomain::classify(
                EntityType::Faction,
                EntityType::Creature,
                RelationshipType::HasMember
            )
            .unwrap(),
            RelationshipDomain::Membership
        );
        assert!(RelationshipDomain::classify(
            EntityType::Event,
            EntityType::Event,
            RelationshipType::BordersAgainst
        )
        .is_err());
        assert!(RelationshipDomain::classify(
            EntityType::Location,
            EntityType::Event,
            RelationshipType::Contains
        )
        .is_err());
        assert!(RelationshipDomain::classify(
            EntityType::Creature,
            EntityType::Faction,
            RelationshipType::HasMember
        )
        .is_err());
    }
}
