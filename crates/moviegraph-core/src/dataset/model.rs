//! Sample dataset row types.

use serde::Serialize;

use crate::entity::{EntityKind, GraphNode, PropertyValue};

/// A movie row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub movie_id: i64,
    pub title: String,
    pub year: i64,
    /// Director of the movie; written as a `DIRECTED` edge, not as a property.
    pub director_id: i64,
}

/// An actor row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub actor_id: i64,
    pub name: String,
}

/// A director row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Director {
    pub director_id: i64,
    pub name: String,
}

/// A genre row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub genre_id: i64,
    pub name: String,
}

/// Join row: an actor appearing in a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MovieActor {
    pub movie_id: i64,
    pub actor_id: i64,
}

/// Join row: a movie classified under a genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MovieGenre {
    pub movie_id: i64,
    pub genre_id: i64,
}

/// Node and edge counts a complete load produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpectedCounts {
    pub movies: usize,
    pub actors: usize,
    pub directors: usize,
    pub genres: usize,
    pub acted_in: usize,
    pub directed: usize,
    pub in_genre: usize,
}

impl ExpectedCounts {
    pub fn nodes(&self) -> usize {
        self.movies + self.actors + self.directors + self.genres
    }

    pub fn relationships(&self) -> usize {
        self.acted_in + self.directed + self.in_genre
    }
}

impl GraphNode for Movie {
    const KIND: EntityKind = EntityKind::Movie;

    fn id(&self) -> i64 {
        self.movie_id
    }

    fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        vec![
            ("title", self.title.as_str().into()),
            ("year", self.year.into()),
        ]
    }
}

impl GraphNode for Actor {
    const KIND: EntityKind = EntityKind::Actor;

    fn id(&self) -> i64 {
        self.actor_id
    }

    fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        vec![("name", self.name.as_str().into())]
    }
}

impl GraphNode for Director {
    const KIND: EntityKind = EntityKind::Director;

    fn id(&self) -> i64 {
        self.director_id
    }

    fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        vec![("name", self.name.as_str().into())]
    }
}

impl GraphNode for Genre {
    const KIND: EntityKind = EntityKind::Genre;

    fn id(&self) -> i64 {
        self.genre_id
    }

    fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        vec![("name", self.name.as_str().into())]
    }
}
