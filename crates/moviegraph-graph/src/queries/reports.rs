//! The seven fixed viewer reports.
//!
//! Each report is one Cypher query whose result is flattened into a
//! [`Table`] of display strings, ordered by the primary entity's id or by
//! movie title so repeated runs print identical output.

use anyhow::{Context, Result};
use neo4rs::{DeError, Query, Row};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::GraphClient;

/// A fixed read report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Report {
    Movies,
    Actors,
    Directors,
    Genres,
    MovieActors,
    MovieGenres,
    MovieDirectors,
}

/// How a result column is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Int,
    Text,
    TextList,
}

impl Report {
    /// All reports, in display order.
    pub const ALL: [Report; 7] = [
        Report::Movies,
        Report::Actors,
        Report::Directors,
        Report::Genres,
        Report::MovieActors,
        Report::MovieGenres,
        Report::MovieDirectors,
    ];

    /// Section heading.
    pub fn title(&self) -> &'static str {
        match self {
            Report::Movies => "MOVIES",
            Report::Actors => "ACTORS",
            Report::Directors => "DIRECTORS",
            Report::Genres => "GENRES",
            Report::MovieActors => "MOVIE-ACTOR RELATIONSHIPS",
            Report::MovieGenres => "MOVIE-GENRE RELATIONSHIPS",
            Report::MovieDirectors => "MOVIE-DIRECTOR RELATIONSHIPS",
        }
    }

    /// Command-line name.
    pub fn name(&self) -> &'static str {
        match self {
            Report::Movies => "movies",
            Report::Actors => "actors",
            Report::Directors => "directors",
            Report::Genres => "genres",
            Report::MovieActors => "movie-actors",
            Report::MovieGenres => "movie-genres",
            Report::MovieDirectors => "movie-directors",
        }
    }

    pub fn cypher(&self) -> &'static str {
        match self {
            Report::Movies => {
                "MATCH (m:Movie)
                 RETURN m.movie_id AS ID, m.title AS Title, m.year AS Year
                 ORDER BY m.movie_id"
            }
            Report::Actors => {
                "MATCH (a:Actor)
                 RETURN a.actor_id AS ID, a.name AS Name
                 ORDER BY a.actor_id"
            }
            Report::Directors => {
                "MATCH (d:Director)
                 RETURN d.director_id AS ID, d.name AS Name
                 ORDER BY d.director_id"
            }
            Report::Genres => {
                "MATCH (g:Genre)
                 RETURN g.genre_id AS ID, g.name AS Name
                 ORDER BY g.genre_id"
            }
            Report::MovieActors => {
                "MATCH (a:Actor)-[:ACTED_IN]->(m:Movie)
                 WITH m, a ORDER BY a.actor_id
                 RETURN m.title AS Movie, collect(a.name) AS Actors
                 ORDER BY Movie"
            }
            Report::MovieGenres => {
                "MATCH (m:Movie)-[:IN_GENRE]->(g:Genre)
                 WITH m, g ORDER BY g.genre_id
                 RETURN m.title AS Movie, collect(g.name) AS Genres
                 ORDER BY Movie"
            }
            Report::MovieDirectors => {
                "MATCH (d:Director)-[:DIRECTED]->(m:Movie)
                 RETURN m.title AS Movie, d.name AS Director
                 ORDER BY Movie"
            }
        }
    }

    fn columns(&self) -> &'static [(&'static str, CellKind)] {
        match self {
            Report::Movies => &[("ID", CellKind::Int), ("Title", CellKind::Text), ("Year", CellKind::Int)],
            Report::Actors | Report::Directors | Report::Genres => {
                &[("ID", CellKind::Int), ("Name", CellKind::Text)]
            }
            Report::MovieActors => &[("Movie", CellKind::Text), ("Actors", CellKind::TextList)],
            Report::MovieGenres => &[("Movie", CellKind::Text), ("Genres", CellKind::TextList)],
            Report::MovieDirectors => &[("Movie", CellKind::Text), ("Director", CellKind::Text)],
        }
    }

    /// Column headers, in order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns().iter().map(|(name, _)| name.to_string()).collect()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A report name that matches none of [`Report::ALL`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown report: {0} (expected one of: movies, actors, directors, genres, movie-actors, movie-genres, movie-directors)")]
pub struct UnknownReport(pub String);

impl FromStr for Report {
    type Err = UnknownReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Report::ALL
            .into_iter()
            .find(|r| r.name() == normalized)
            .ok_or_else(|| UnknownReport(s.to_string()))
    }
}

/// A titled, row-oriented result set with named columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: impl Into<String>, columns: Vec<String>) -> Self {
        Self { title: title.into(), columns, rows: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Decode one cell. Nulls render as an empty string; a missing column or a
/// value of the wrong type is an error.
fn read_cell(row: &Row, column: &str, kind: CellKind) -> Result<String> {
    let decode_err = |e: DeError| anyhow::anyhow!("Failed to decode column '{}': {:?}", column, e);
    let cell = match kind {
        CellKind::Int => row
            .get::<Option<i64>>(column)
            .map_err(decode_err)?
            .map(|v| v.to_string())
            .unwrap_or_default(),
        CellKind::Text => row
            .get::<Option<String>>(column)
            .map_err(decode_err)?
            .unwrap_or_default(),
        CellKind::TextList => join_list(
            row.get::<Option<Vec<String>>>(column)
                .map_err(decode_err)?
                .unwrap_or_default(),
        ),
    };
    Ok(cell)
}

fn join_list(values: Vec<String>) -> String {
    values.join(", ")
}

/// Run one report and collect its rows.
pub async fn run_report(client: &GraphClient, report: Report) -> Result<Table> {
    let rows = client
        .query(Query::new(report.cypher().to_string()))
        .await
        .with_context(|| format!("Failed to run {} report", report))?;

    table_from_rows(report, &rows).with_context(|| format!("Failed to read {} report", report))
}

/// Flatten result rows into a [`Table`] with the report's columns.
pub fn table_from_rows(report: Report, rows: &[Row]) -> Result<Table> {
    let mut table = Table::new(report.title(), report.column_names());
    for (index, row) in rows.iter().enumerate() {
        let cells = report
            .columns()
            .iter()
            .map(|(column, kind)| read_cell(row, column, *kind))
            .collect::<Result<Vec<String>>>()
            .with_context(|| format!("Row {}", index + 1))?;
        table.rows.push(cells);
    }
    Ok(table)
}

/// Name of the director of a movie, if the movie and its `DIRECTED` edge exist.
pub async fn director_of(client: &GraphClient, movie_id: i64) -> Result<Option<String>> {
    let query = Query::new(
        "MATCH (d:Director)-[:DIRECTED]->(m:Movie {movie_id: $movie_id})
         RETURN d.name AS name
         LIMIT 1"
            .to_string(),
    )
    .param("movie_id", movie_id);

    client.query_scalar(query, "name").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo4rs::{BoltNull, BoltType};

    #[test]
    fn test_report_names_roundtrip() {
        for report in Report::ALL {
            assert_eq!(report.name().parse::<Report>().unwrap(), report);
        }
        assert_eq!("MOVIE_ACTORS".parse::<Report>().unwrap(), Report::MovieActors);
        assert_eq!("ratings".parse::<Report>(), Err(UnknownReport("ratings".to_string())));
    }

    #[test]
    fn test_columns_match_query_aliases() {
        for report in Report::ALL {
            for column in report.column_names() {
                assert!(
                    report.cypher().contains(&format!("AS {}", column)),
                    "{} is missing alias {}",
                    report,
                    column
                );
            }
        }
    }

    #[test]
    fn test_entity_reports_sort_by_id() {
        assert!(Report::Movies.cypher().ends_with("ORDER BY m.movie_id"));
        assert!(Report::Genres.cypher().ends_with("ORDER BY g.genre_id"));
        assert!(Report::MovieDirectors.cypher().ends_with("ORDER BY Movie"));
    }

    fn result_row(fields: &[(&str, BoltType)]) -> Row {
        let names: Vec<BoltType> = fields.iter().map(|(name, _)| BoltType::from(*name)).collect();
        let values: Vec<BoltType> = fields.iter().map(|(_, value)| value.clone()).collect();
        Row::new(names.into(), values.into())
    }

    #[test]
    fn test_table_from_rows() {
        let rows = vec![result_row(&[
            ("Movie", BoltType::from("Movie 1")),
            ("Actors", BoltType::from(vec!["Actor 2", "Actor 3"])),
        ])];
        let table = table_from_rows(Report::MovieActors, &rows).unwrap();
        assert_eq!(table.title, "MOVIE-ACTOR RELATIONSHIPS");
        assert_eq!(table.rows, vec![vec!["Movie 1".to_string(), "Actor 2, Actor 3".to_string()]]);
    }

    #[test]
    fn test_null_cells_render_empty() {
        let rows = vec![result_row(&[
            ("ID", BoltType::from(7_i64)),
            ("Title", BoltType::Null(BoltNull)),
            ("Year", BoltType::Null(BoltNull)),
        ])];
        let table = table_from_rows(Report::Movies, &rows).unwrap();
        assert_eq!(table.rows, vec![vec!["7".to_string(), String::new(), String::new()]]);
    }

    #[test]
    fn test_wrong_type_is_error() {
        let rows = vec![result_row(&[
            ("ID", BoltType::from("seven")),
            ("Name", BoltType::from("Genre 7")),
        ])];
        let err = table_from_rows(Report::Genres, &rows).unwrap_err();
        assert!(format!("{:#}", err).contains("'ID'"));
    }

    #[test]
    fn test_missing_column_is_error() {
        let rows = vec![result_row(&[("ID", BoltType::from(1_i64))])];
        assert!(table_from_rows(Report::Actors, &rows).is_err());
    }

    #[test]
    fn test_join_list() {
        assert_eq!(join_list(vec!["Actor 2".into(), "Actor 3".into()]), "Actor 2, Actor 3");
        assert_eq!(join_list(Vec::new()), "");
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new("GENRES", Report::Genres.column_names());
        assert!(table.is_empty());
        assert_eq!(table.columns, vec!["ID", "Name"]);
    }
}
