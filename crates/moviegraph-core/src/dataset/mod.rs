//! Deterministic sample dataset.
//!
//! Every value is derived from its 1-based row index, so two calls to
//! [`SampleDataset::generate`] always produce identical tables.

pub mod model;

use crate::entity::Link;
use model::{Actor, Director, ExpectedCounts, Genre, Movie, MovieActor, MovieGenre};

pub const MOVIE_COUNT: i64 = 100;
pub const ACTOR_COUNT: i64 = 100;
pub const DIRECTOR_COUNT: i64 = 10;
pub const GENRE_COUNT: i64 = 10;
pub const ACTORS_PER_MOVIE: i64 = 3;
pub const GENRES_PER_MOVIE: i64 = 2;

/// The six sample tables.
#[derive(Debug, Clone)]
pub struct SampleDataset {
    pub movies: Vec<Movie>,
    pub actors: Vec<Actor>,
    pub directors: Vec<Director>,
    pub genres: Vec<Genre>,
    pub movie_actors: Vec<MovieActor>,
    pub movie_genres: Vec<MovieGenre>,
}

impl SampleDataset {
    /// Build all tables.
    pub fn generate() -> Self {
        let movies = (1..=MOVIE_COUNT)
            .map(|i| Movie {
                movie_id: i,
                title: format!("Movie {}", i),
                year: 2000 + (i % 20),
                director_id: director_for(i),
            })
            .collect();

        let actors = (1..=ACTOR_COUNT)
            .map(|i| Actor { actor_id: i, name: format!("Actor {}", i) })
            .collect();

        let directors = (1..=DIRECTOR_COUNT)
            .map(|i| Director { director_id: i, name: format!("Director {}", i) })
            .collect();

        let genres = (1..=GENRE_COUNT)
            .map(|i| Genre { genre_id: i, name: format!("Genre {}", i) })
            .collect();

        // Row r belongs to movie ceil(r / per_movie); the partner id wraps.
        let movie_actors = (1..=MOVIE_COUNT * ACTORS_PER_MOVIE)
            .map(|r| MovieActor {
                movie_id: (r - 1) / ACTORS_PER_MOVIE + 1,
                actor_id: (r % ACTOR_COUNT) + 1,
            })
            .collect();

        let movie_genres = (1..=MOVIE_COUNT * GENRES_PER_MOVIE)
            .map(|r| MovieGenre {
                movie_id: (r - 1) / GENRES_PER_MOVIE + 1,
                genre_id: (r % GENRE_COUNT) + 1,
            })
            .collect();

        Self {
            movies,
            actors,
            directors,
            genres,
            movie_actors,
            movie_genres,
        }
    }

    /// Actor → Movie pairs for `ACTED_IN`.
    pub fn acted_in_links(&self) -> Vec<Link> {
        self.movie_actors
            .iter()
            .map(|row| Link::new(row.actor_id, row.movie_id))
            .collect()
    }

    /// Director → Movie pairs for `DIRECTED`, one per movie.
    pub fn directed_links(&self) -> Vec<Link> {
        self.movies
            .iter()
            .map(|m| Link::new(m.director_id, m.movie_id))
            .collect()
    }

    /// Movie → Genre pairs for `IN_GENRE`.
    pub fn in_genre_links(&self) -> Vec<Link> {
        self.movie_genres
            .iter()
            .map(|row| Link::new(row.movie_id, row.genre_id))
            .collect()
    }

    pub fn expected_counts(&self) -> ExpectedCounts {
        ExpectedCounts {
            movies: self.movies.len(),
            actors: self.actors.len(),
            directors: self.directors.len(),
            genres: self.genres.len(),
            acted_in: self.movie_actors.len(),
            directed: self.movies.len(),
            in_genre: self.movie_genres.len(),
        }
    }
}

/// Director assigned to the movie with the given id.
pub fn director_for(movie_id: i64) -> i64 {
    (movie_id % DIRECTOR_COUNT) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_contiguous(ids: Vec<i64>) {
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(*id, i as i64 + 1);
        }
    }

    #[test]
    fn test_table_sizes() {
        let ds = SampleDataset::generate();
        assert_eq!(ds.movies.len(), 100);
        assert_eq!(ds.actors.len(), 100);
        assert_eq!(ds.directors.len(), 10);
        assert_eq!(ds.genres.len(), 10);
        assert_eq!(ds.movie_actors.len(), 300);
        assert_eq!(ds.movie_genres.len(), 200);
    }

    #[test]
    fn test_ids_unique_and_contiguous() {
        let ds = SampleDataset::generate();
        assert_contiguous(ds.movies.iter().map(|m| m.movie_id).collect());
        assert_contiguous(ds.actors.iter().map(|a| a.actor_id).collect());
        assert_contiguous(ds.directors.iter().map(|d| d.director_id).collect());
        assert_contiguous(ds.genres.iter().map(|g| g.genre_id).collect());
    }

    #[test]
    fn test_director_assignment() {
        let ds = SampleDataset::generate();
        for movie in &ds.movies {
            assert!((1..=10).contains(&movie.director_id));
            assert_eq!(movie.director_id, (movie.movie_id % 10) + 1);
        }
        assert_eq!(ds.movies[4].director_id, 6);
        assert_eq!(ds.movies[9].director_id, 1);
    }

    #[test]
    fn test_movie_values() {
        let ds = SampleDataset::generate();
        assert_eq!(ds.movies[0].title, "Movie 1");
        assert_eq!(ds.movies[0].year, 2001);
        assert_eq!(ds.movies[19].year, 2000);
        assert_eq!(ds.directors[9].name, "Director 10");
    }

    #[test]
    fn test_join_tables() {
        let ds = SampleDataset::generate();

        // First movie gets actors 2, 3, 4; the last actor row wraps to actor 1.
        let first: Vec<i64> = ds.movie_actors[..3].iter().map(|r| r.actor_id).collect();
        assert_eq!(first, vec![2, 3, 4]);
        assert_eq!(ds.movie_actors[299], MovieActor { movie_id: 100, actor_id: 1 });

        assert_eq!(ds.movie_genres[0], MovieGenre { movie_id: 1, genre_id: 2 });
        assert_eq!(ds.movie_genres[1], MovieGenre { movie_id: 1, genre_id: 3 });
        assert_eq!(ds.movie_genres[199], MovieGenre { movie_id: 100, genre_id: 1 });

        for row in &ds.movie_actors {
            assert!((1..=100).contains(&row.actor_id));
        }
        for row in &ds.movie_genres {
            assert!((1..=10).contains(&row.genre_id));
        }
    }

    #[test]
    fn test_links_have_no_duplicates() {
        let ds = SampleDataset::generate();
        for links in [ds.acted_in_links(), ds.directed_links(), ds.in_genre_links()] {
            let unique: HashSet<_> = links.iter().collect();
            assert_eq!(unique.len(), links.len());
        }
    }

    #[test]
    fn test_links_point_the_right_way() {
        let ds = SampleDataset::generate();
        assert_eq!(ds.acted_in_links()[0], Link::new(2, 1));
        assert_eq!(ds.directed_links()[4], Link::new(6, 5));
        assert_eq!(ds.in_genre_links()[0], Link::new(1, 2));
    }

    #[test]
    fn test_expected_counts() {
        let counts = SampleDataset::generate().expected_counts();
        assert_eq!(counts.nodes(), 220);
        assert_eq!(counts.acted_in, 300);
        assert_eq!(counts.directed, 100);
        assert_eq!(counts.in_genre, 200);
        assert_eq!(counts.relationships(), 600);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = SampleDataset::generate();
        let b = SampleDataset::generate();
        assert_eq!(a.movies, b.movies);
        assert_eq!(a.movie_actors, b.movie_actors);
    }
}
