//! Per-label and per-type counts, and the post-load integrity check.

use anyhow::Result;
use moviegraph_core::dataset::model::ExpectedCounts;
use moviegraph_core::{EntityKind, RelationshipKind};
use neo4rs::Query;
use serde::Serialize;

use crate::{GraphClient, GraphCounts};

/// Counts of what is currently in the store.
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub totals: GraphCounts,
    pub nodes: Vec<(EntityKind, usize)>,
    pub relationships: Vec<(RelationshipKind, usize)>,
}

impl GraphStats {
    pub fn node_count(&self, kind: EntityKind) -> usize {
        self.nodes.iter().find(|(k, _)| *k == kind).map(|(_, n)| *n).unwrap_or(0)
    }

    pub fn relationship_count(&self, kind: RelationshipKind) -> usize {
        self.relationships.iter().find(|(k, _)| *k == kind).map(|(_, n)| *n).unwrap_or(0)
    }
}

/// One count that differs from what the dataset should have produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub subject: String,
    pub expected: usize,
    pub actual: usize,
}

/// Result of comparing the store against the expected counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    pub mismatches: Vec<Mismatch>,
}

impl IntegrityReport {
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Number of nodes with the label of `kind`.
pub async fn count_nodes(client: &GraphClient, kind: EntityKind) -> Result<usize> {
    let query = Query::new(format!("MATCH (n:{}) RETURN count(n) AS count", kind.label()));
    let count: i64 = client.query_scalar(query, "count").await?.unwrap_or(0);
    Ok(count as usize)
}

/// Number of relationships of type `kind`.
pub async fn count_relationships(client: &GraphClient, kind: RelationshipKind) -> Result<usize> {
    let query = Query::new(format!(
        "MATCH ()-[r:{}]->() RETURN count(r) AS count",
        kind.rel_type()
    ));
    let count: i64 = client.query_scalar(query, "count").await?.unwrap_or(0);
    Ok(count as usize)
}

pub async fn collect_stats(client: &GraphClient) -> Result<GraphStats> {
    let totals = client.get_counts().await?;

    let mut nodes = Vec::with_capacity(EntityKind::ALL.len());
    for kind in EntityKind::ALL {
        nodes.push((kind, count_nodes(client, kind).await?));
    }

    let mut relationships = Vec::with_capacity(RelationshipKind::ALL.len());
    for kind in RelationshipKind::ALL {
        relationships.push((kind, count_relationships(client, kind).await?));
    }

    Ok(GraphStats { totals, nodes, relationships })
}

/// Compare collected stats with the counts a full load must produce.
pub fn check_counts(stats: &GraphStats, expected: &ExpectedCounts) -> IntegrityReport {
    let wanted_nodes = [
        (EntityKind::Movie, expected.movies),
        (EntityKind::Actor, expected.actors),
        (EntityKind::Director, expected.directors),
        (EntityKind::Genre, expected.genres),
    ];
    let wanted_rels = [
        (RelationshipKind::ActedIn, expected.acted_in),
        (RelationshipKind::Directed, expected.directed),
        (RelationshipKind::InGenre, expected.in_genre),
    ];

    let mut report = IntegrityReport::default();
    for (kind, want) in wanted_nodes {
        let actual = stats.node_count(kind);
        if actual != want {
            report.mismatches.push(Mismatch {
                subject: format!("{} nodes", kind),
                expected: want,
                actual,
            });
        }
    }
    for (kind, want) in wanted_rels {
        let actual = stats.relationship_count(kind);
        if actual != want {
            report.mismatches.push(Mismatch {
                subject: format!("{} relationships", kind),
                expected: want,
                actual,
            });
        }
    }
    report
}

/// Collect stats from the store and check them against `expected`.
pub async fn verify(client: &GraphClient, expected: &ExpectedCounts) -> Result<IntegrityReport> {
    let stats = collect_stats(client).await?;
    Ok(check_counts(&stats, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviegraph_core::SampleDataset;

    fn stats_for(expected: &ExpectedCounts) -> GraphStats {
        GraphStats {
            totals: GraphCounts {
                nodes: expected.nodes(),
                relationships: expected.relationships(),
            },
            nodes: vec![
                (EntityKind::Movie, expected.movies),
                (EntityKind::Actor, expected.actors),
                (EntityKind::Director, expected.directors),
                (EntityKind::Genre, expected.genres),
            ],
            relationships: vec![
                (RelationshipKind::ActedIn, expected.acted_in),
                (RelationshipKind::Directed, expected.directed),
                (RelationshipKind::InGenre, expected.in_genre),
            ],
        }
    }

    #[test]
    fn test_full_load_passes() {
        let expected = SampleDataset::generate().expected_counts();
        assert!(check_counts(&stats_for(&expected), &expected).is_ok());
    }

    #[test]
    fn test_missing_edges_reported() {
        let expected = SampleDataset::generate().expected_counts();
        let mut stats = stats_for(&expected);
        stats.relationships[1].1 = 97;

        let report = check_counts(&stats, &expected);
        assert_eq!(
            report.mismatches,
            vec![Mismatch {
                subject: "DIRECTED relationships".to_string(),
                expected: 100,
                actual: 97,
            }]
        );
    }

    #[test]
    fn test_empty_store_fails_everything() {
        let expected = SampleDataset::generate().expected_counts();
        let empty = GraphStats {
            totals: GraphCounts { nodes: 0, relationships: 0 },
            nodes: Vec::new(),
            relationships: Vec::new(),
        };
        assert_eq!(check_counts(&empty, &expected).mismatches.len(), 7);
    }
}
