//! Node labels, relationship types and property values of the movie graph.
//!
//! Every label and relationship type that ends up in Cypher text comes from the
//! closed enums below, never from user input.

use serde::Serialize;
use std::fmt;

/// Entity kinds stored as graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Movie,
    Actor,
    Director,
    Genre,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Movie,
        EntityKind::Actor,
        EntityKind::Director,
        EntityKind::Genre,
    ];

    /// The Neo4j node label for this entity kind.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Movie => "Movie",
            EntityKind::Actor => "Actor",
            EntityKind::Director => "Director",
            EntityKind::Genre => "Genre",
        }
    }

    /// Name of the identifying property, unique per label.
    pub fn key(&self) -> &'static str {
        match self {
            EntityKind::Movie => "movie_id",
            EntityKind::Actor => "actor_id",
            EntityKind::Director => "director_id",
            EntityKind::Genre => "genre_id",
        }
    }

    /// Name of the uniqueness constraint on the identifying key.
    pub fn constraint_name(&self) -> String {
        format!("{}_{}_unique", self.label().to_lowercase(), self.key())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Relationship types stored as directed edges. Edges carry no properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationshipKind {
    ActedIn,
    Directed,
    InGenre,
}

impl RelationshipKind {
    pub const ALL: [RelationshipKind; 3] = [
        RelationshipKind::ActedIn,
        RelationshipKind::Directed,
        RelationshipKind::InGenre,
    ];

    /// The Neo4j relationship type.
    pub fn rel_type(&self) -> &'static str {
        match self {
            RelationshipKind::ActedIn => "ACTED_IN",
            RelationshipKind::Directed => "DIRECTED",
            RelationshipKind::InGenre => "IN_GENRE",
        }
    }

    /// Entity kind at the tail of the edge.
    pub fn from_kind(&self) -> EntityKind {
        match self {
            RelationshipKind::ActedIn => EntityKind::Actor,
            RelationshipKind::Directed => EntityKind::Director,
            RelationshipKind::InGenre => EntityKind::Movie,
        }
    }

    /// Entity kind at the head of the edge.
    pub fn to_kind(&self) -> EntityKind {
        match self {
            RelationshipKind::ActedIn | RelationshipKind::Directed => EntityKind::Movie,
            RelationshipKind::InGenre => EntityKind::Genre,
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rel_type())
    }
}

/// A scalar node property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Int(i64),
    Text(String),
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// A row that can be written as a node.
pub trait GraphNode {
    /// Entity kind (and therefore label and key) of the node.
    const KIND: EntityKind;

    /// Value of the identifying key.
    fn id(&self) -> i64;

    /// Properties other than the identifying key.
    fn properties(&self) -> Vec<(&'static str, PropertyValue)>;
}

/// A directed edge between two nodes, identified by their keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Link {
    pub from_id: i64,
    pub to_id: i64,
}

impl Link {
    pub fn new(from_id: i64, to_id: i64) -> Self {
        Self { from_id, to_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_keys() {
        assert_eq!(EntityKind::Movie.label(), "Movie");
        assert_eq!(EntityKind::Genre.key(), "genre_id");
        assert_eq!(EntityKind::Director.constraint_name(), "director_director_id_unique");
    }

    #[test]
    fn test_relationship_endpoints() {
        assert_eq!(RelationshipKind::ActedIn.from_kind(), EntityKind::Actor);
        assert_eq!(RelationshipKind::ActedIn.to_kind(), EntityKind::Movie);
        assert_eq!(RelationshipKind::Directed.from_kind(), EntityKind::Director);
        assert_eq!(RelationshipKind::InGenre.from_kind(), EntityKind::Movie);
        assert_eq!(RelationshipKind::InGenre.to_kind(), EntityKind::Genre);
    }
}
