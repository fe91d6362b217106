//! Neo4j connection client.

use anyhow::{Context, Result};
use moviegraph_core::GraphConfig;
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Client for Neo4j Knowledge Graph operations.
///
/// Wraps the neo4rs connection pool. Every statement borrows a pooled
/// connection for its own duration and hands it back when it completes or
/// fails.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// Note: neo4rs uses a lazy pool, `Graph::connect` does not open a bolt
    /// connection by itself. A `RETURN 1` ping forces the handshake so that an
    /// unreachable server fails here and not on the first real statement.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.address)
            .user(&config.username)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .fetch_size(config.fetch_size)
            .build()
            .context("Failed to build Neo4j config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create Neo4j connection pool")?;

        graph.run(Query::new("RETURN 1".to_string())).await
            .with_context(|| format!("Neo4j at {} is not responding to queries", config.address))?;

        debug!(address = %config.address, database = %config.database, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Like [`GraphClient::connect`], bounded by `connect_timeout_secs`.
    pub async fn connect_with_timeout(config: &GraphConfig) -> Result<Self> {
        let limit = Duration::from_secs(config.connect_timeout_secs);
        tokio::time::timeout(limit, Self::connect(config))
            .await
            .with_context(|| {
                format!(
                    "Timed out after {}s connecting to Neo4j at {}",
                    config.connect_timeout_secs, config.address
                )
            })?
    }

    /// Execute a Cypher query that returns no results.
    pub async fn execute(&self, query: Query) -> Result<()> {
        self.graph.run(query).await.context("Neo4j query execution failed")?;
        Ok(())
    }

    /// Execute a Cypher query and return results as rows.
    pub async fn query(&self, query: Query) -> Result<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(query).await
            .context("Neo4j query failed")?;

        let mut rows = Vec::new();
        while let Some(row) = result.next().await.context("Failed to read Neo4j result row")? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a Cypher query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(&self, query: Query, field: &str) -> Result<Option<T>> {
        let rows = self.query(query).await?;
        if let Some(row) = rows.into_iter().next() {
            let val: T = row.get(field)
                .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", field, e))?;
            Ok(Some(val))
        } else {
            Ok(None)
        }
    }

    /// Get node and relationship totals.
    pub async fn get_counts(&self) -> Result<GraphCounts> {
        let node_query = Query::new("MATCH (n) RETURN count(n) as count".to_string());
        let rel_query = Query::new("MATCH ()-[r]->() RETURN count(r) as count".to_string());

        let node_count: i64 = self.query_scalar(node_query, "count").await?
            .unwrap_or(0);
        let rel_count: i64 = self.query_scalar(rel_query, "count").await?
            .unwrap_or(0);

        Ok(GraphCounts {
            nodes: node_count as usize,
            relationships: rel_count as usize,
        })
    }

    /// Release the connection pool.
    pub fn close(self) {
        debug!("Closing Neo4j connection pool");
        drop(self.graph);
    }
}

/// Node and relationship counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphCounts {
    pub nodes: usize,
    pub relationships: usize,
}
