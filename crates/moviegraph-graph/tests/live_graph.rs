//! Tests against a running Neo4j.
//!
//! Ignored by default. Point `NEO4J_URI`, `NEO4J_USER` and `NEO4J_PASSWORD`
//! at a disposable database and run `cargo test -- --ignored --test-threads=1`.
//! Every test wipes the database.

use moviegraph_core::{ConfigOverrides, EntityKind, GraphConfig, Link, RelationshipKind, SampleDataset};
use moviegraph_graph::loader::{self, create_relationships};
use moviegraph_graph::queries::stats::{count_nodes, count_relationships};
use moviegraph_graph::{GraphClient, Report, director_of, run_report, schema, verify};

async fn connect() -> GraphClient {
    let config = GraphConfig::default().with_overrides(ConfigOverrides {
        address: std::env::var("NEO4J_URI").ok(),
        username: std::env::var("NEO4J_USER").ok(),
        password: std::env::var("NEO4J_PASSWORD").ok(),
        database: std::env::var("NEO4J_DATABASE").ok(),
        batch_size: None,
    });
    GraphClient::connect_with_timeout(&config).await.unwrap()
}

async fn load(client: &GraphClient) -> SampleDataset {
    let dataset = SampleDataset::generate();
    loader::load_dataset(client, &dataset, 64).await.unwrap();
    dataset
}

#[tokio::test]
#[ignore]
async fn test_full_load_counts() {
    let client = connect().await;
    let dataset = load(&client).await;

    assert_eq!(count_nodes(&client, EntityKind::Movie).await.unwrap(), 100);
    assert_eq!(count_nodes(&client, EntityKind::Actor).await.unwrap(), 100);
    assert_eq!(count_nodes(&client, EntityKind::Director).await.unwrap(), 10);
    assert_eq!(count_nodes(&client, EntityKind::Genre).await.unwrap(), 10);
    assert_eq!(count_relationships(&client, RelationshipKind::ActedIn).await.unwrap(), 300);
    assert_eq!(count_relationships(&client, RelationshipKind::Directed).await.unwrap(), 100);
    assert_eq!(count_relationships(&client, RelationshipKind::InGenre).await.unwrap(), 200);

    let report = verify(&client, &dataset.expected_counts()).await.unwrap();
    assert!(report.is_ok(), "{:?}", report.mismatches);
}

#[tokio::test]
#[ignore]
async fn test_load_then_clear_is_empty() {
    let client = connect().await;
    load(&client).await;

    loader::clear(&client).await.unwrap();
    let counts = client.get_counts().await.unwrap();
    assert_eq!(counts.nodes, 0);
    assert_eq!(counts.relationships, 0);
}

#[tokio::test]
#[ignore]
async fn test_reload_is_idempotent() {
    let client = connect().await;
    let dataset = load(&client).await;
    let summary = loader::load_dataset(&client, &dataset, 500).await.unwrap();

    assert_eq!(summary.unmatched(), 0);
    let counts = client.get_counts().await.unwrap();
    assert_eq!(counts.nodes, 220);
    assert_eq!(counts.relationships, 600);
}

#[tokio::test]
#[ignore]
async fn test_movies_report_sorted_by_id() {
    let client = connect().await;
    load(&client).await;

    let table = run_report(&client, Report::Movies).await.unwrap();
    let ids: Vec<i64> = table.rows.iter().map(|row| row[0].parse().unwrap()).collect();
    assert_eq!(ids, (1..=100).collect::<Vec<i64>>());
    assert_eq!(table.rows[0], vec!["1", "Movie 1", "2001"]);
}

#[tokio::test]
#[ignore]
async fn test_director_of_movie_five() {
    let client = connect().await;
    load(&client).await;

    assert_eq!(director_of(&client, 5).await.unwrap().as_deref(), Some("Director 6"));
}

#[tokio::test]
#[ignore]
async fn test_constraints_twice() {
    let client = connect().await;
    schema::create_constraints(&client).await.unwrap();
    schema::create_constraints(&client).await.unwrap();

    assert_eq!(schema::list_constraints(&client).await.unwrap().len(), 4);
}

#[tokio::test]
#[ignore]
async fn test_missing_endpoint_is_counted() {
    let client = connect().await;
    load(&client).await;

    let pairs = [Link::new(1, 1), Link::new(999, 1), Link::new(1, 999)];
    let result = create_relationships(&client, RelationshipKind::Directed, &pairs, 10)
        .await
        .unwrap();
    assert_eq!(result.unmatched, 2);
    assert_eq!(result.created, 1);
    assert_eq!(result.existing, 0);
}

#[tokio::test]
#[ignore]
async fn test_existing_edges_are_not_counted_as_created() {
    let client = connect().await;
    let dataset = load(&client).await;

    let result = create_relationships(&client, RelationshipKind::InGenre, &dataset.in_genre_links(), 500)
        .await
        .unwrap();
    assert_eq!(result.created, 0);
    assert_eq!(result.existing, 200);
    assert_eq!(result.unmatched, 0);
    assert_eq!(count_relationships(&client, RelationshipKind::InGenre).await.unwrap(), 200);
}

#[tokio::test]
#[ignore]
async fn test_empty_store_renders_no_rows() {
    let client = connect().await;
    loader::clear(&client).await.unwrap();

    let table = run_report(&client, Report::MovieGenres).await.unwrap();
    assert!(table.is_empty());
}
