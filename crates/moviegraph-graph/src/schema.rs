//! Neo4j schema initialization (uniqueness constraints).

use anyhow::{Context, Result};
use moviegraph_core::EntityKind;
use neo4rs::Query;
use tracing::info;

use crate::GraphClient;

/// Cypher for the uniqueness constraint on an entity's identifying key.
pub fn constraint_statement(kind: EntityKind) -> String {
    format!(
        "CREATE CONSTRAINT {name} IF NOT EXISTS FOR (n:{label}) REQUIRE n.{key} IS UNIQUE",
        name = kind.constraint_name(),
        label = kind.label(),
        key = kind.key(),
    )
}

/// Ensure a uniqueness constraint on every entity key.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn create_constraints(client: &GraphClient) -> Result<()> {
    info!("Initializing Neo4j constraints...");

    for kind in EntityKind::ALL {
        client
            .execute(Query::new(constraint_statement(kind)))
            .await
            .with_context(|| format!("Failed to create constraint for {}", kind))?;
    }

    info!("Neo4j constraints initialized ({} statements)", EntityKind::ALL.len());
    Ok(())
}

/// Names of the uniqueness constraints currently installed for our labels.
pub async fn list_constraints(client: &GraphClient) -> Result<Vec<String>> {
    let names: Vec<String> = EntityKind::ALL.iter().map(|k| k.constraint_name()).collect();
    let query = Query::new(
        "SHOW CONSTRAINTS YIELD name WHERE name IN $names RETURN name ORDER BY name".to_string(),
    )
    .param("names", names);

    let rows = client.query(query).await?;
    Ok(rows
        .into_iter()
        .filter_map(|row| row.get::<String>("name").ok())
        .collect())
}
