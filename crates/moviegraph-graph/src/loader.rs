//! Wipe-and-reload of the sample dataset into Neo4j.
//!
//! Writes are batched: each chunk of at most `batch_size` rows becomes one
//! `UNWIND` statement, which Neo4j runs as a single auto-commit transaction.
//! A batch is therefore all-or-nothing, while the load as a whole is not.
//! Nodes are upserted with MERGE on their key and edges are MERGEd, so
//! re-running a load after a mid-way failure converges on the same graph.

use anyhow::{Context, Result};
use moviegraph_core::{EntityKind, GraphNode, Link, PropertyValue, RelationshipKind, SampleDataset};
use neo4rs::{BoltMap, BoltString, BoltType, Query, Row};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{schema, GraphClient};

/// Outcome of writing one node table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeResult {
    pub kind: EntityKind,
    pub written: usize,
    pub batches: usize,
}

/// Outcome of writing one relationship table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelationshipResult {
    pub kind: RelationshipKind,
    /// Edges that did not exist before this call.
    pub created: usize,
    /// Pairs whose edge was already present.
    pub existing: usize,
    /// Pairs where the source or the target node does not exist.
    pub unmatched: usize,
    pub batches: usize,
}

/// Counts returned by one relationship batch statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchCounts {
    pub total: usize,
    pub created: usize,
    pub unmatched: usize,
}

impl BatchCounts {
    pub fn existing(&self) -> usize {
        self.total.saturating_sub(self.created + self.unmatched)
    }
}

/// One step of the load pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStep {
    Clear,
    Constraints,
    Nodes(EntityKind),
    Relationships(RelationshipKind),
}

impl LoadStep {
    /// Human readable description for progress output.
    pub fn describe(&self) -> String {
        match self {
            LoadStep::Clear => "Clearing database".to_string(),
            LoadStep::Constraints => "Creating constraints".to_string(),
            LoadStep::Nodes(kind) => format!("Creating {} nodes", kind),
            LoadStep::Relationships(kind) => format!("Creating {} relationships", kind),
        }
    }
}

/// Steps of a full load: wipe, constraints, every node table, then every edge table.
pub fn plan() -> Vec<LoadStep> {
    let mut steps = vec![LoadStep::Clear, LoadStep::Constraints];
    steps.extend(EntityKind::ALL.into_iter().map(LoadStep::Nodes));
    steps.extend(RelationshipKind::ALL.into_iter().map(LoadStep::Relationships));
    steps
}

/// What a single step produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    Nodes(NodeResult),
    Relationships(RelationshipResult),
}

/// Totals of a full load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadSummary {
    pub nodes: Vec<NodeResult>,
    pub relationships: Vec<RelationshipResult>,
}

impl LoadSummary {
    pub fn record(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Done => {}
            StepOutcome::Nodes(r) => self.nodes.push(r),
            StepOutcome::Relationships(r) => self.relationships.push(r),
        }
    }

    pub fn nodes_written(&self) -> usize {
        self.nodes.iter().map(|r| r.written).sum()
    }

    pub fn relationships_created(&self) -> usize {
        self.relationships.iter().map(|r| r.created).sum()
    }

    pub fn unmatched(&self) -> usize {
        self.relationships.iter().map(|r| r.unmatched).sum()
    }
}

/// Delete every node and relationship.
pub async fn clear(client: &GraphClient) -> Result<()> {
    client
        .execute(Query::new("MATCH (n) DETACH DELETE n".to_string()))
        .await
        .context("Failed to clear database")?;
    info!("Database cleared");
    Ok(())
}

/// Cypher for one batch of nodes of `kind`.
pub fn node_statement(kind: EntityKind) -> String {
    format!(
        "UNWIND $rows AS row
         MERGE (n:{label} {{{key}: row.id}})
         SET n += row.props",
        label = kind.label(),
        key = kind.key(),
    )
}

/// Cypher for one batch of `kind` edges.
///
/// Returns a single row with `total`, `created` (edges that were absent) and
/// `unmatched` (pairs with a missing endpoint).
pub fn relationship_statement(kind: RelationshipKind) -> String {
    let from = kind.from_kind();
    let to = kind.to_kind();
    format!(
        "UNWIND $pairs AS pair
         OPTIONAL MATCH (a:{from_label} {{{from_key}: pair.from}})
         OPTIONAL MATCH (b:{to_label} {{{to_key}: pair.to}})
         OPTIONAL MATCH (a)-[existing:{rel_type}]->(b)
         WITH pair, a, b, existing IS NOT NULL AS present
         FOREACH (ignored IN CASE WHEN a IS NULL OR b IS NULL OR present THEN [] ELSE [1] END |
             MERGE (a)-[:{rel_type}]->(b))
         RETURN count(pair) AS total,
                sum(CASE WHEN a IS NULL OR b IS NULL THEN 1 ELSE 0 END) AS unmatched,
                sum(CASE WHEN a IS NOT NULL AND b IS NOT NULL AND NOT present THEN 1 ELSE 0 END) AS created",
        from_label = from.label(),
        from_key = from.key(),
        to_label = to.label(),
        to_key = to.key(),
        rel_type = kind.rel_type(),
    )
}

fn bolt_value(value: PropertyValue) -> BoltType {
    match value {
        PropertyValue::Int(v) => BoltType::from(v),
        PropertyValue::Text(v) => BoltType::from(v),
    }
}

fn node_param<N: GraphNode>(node: &N) -> BoltType {
    let mut props = BoltMap::new();
    for (name, value) in node.properties() {
        props.put(BoltString::from(name), bolt_value(value));
    }

    let mut row = BoltMap::new();
    row.put(BoltString::from("id"), BoltType::from(node.id()));
    row.put(BoltString::from("props"), BoltType::Map(props));
    BoltType::Map(row)
}

fn count_field(row: &Row, field: &str) -> Result<usize> {
    let value: i64 = row
        .get(field)
        .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", field, e))?;
    usize::try_from(value).with_context(|| format!("Field '{}' is negative: {}", field, value))
}

/// Decode the summary row of a relationship batch.
///
/// A missing row or an undecodable count is an error, never a zero.
pub fn batch_counts(rows: &[Row]) -> Result<BatchCounts> {
    let row = rows
        .first()
        .context("Relationship batch returned no summary row")?;
    Ok(BatchCounts {
        total: count_field(row, "total")?,
        created: count_field(row, "created")?,
        unmatched: count_field(row, "unmatched")?,
    })
}

fn link_param(link: &Link) -> BoltType {
    let mut pair = BoltMap::new();
    pair.put(BoltString::from("from"), BoltType::from(link.from_id));
    pair.put(BoltString::from("to"), BoltType::from(link.to_id));
    BoltType::Map(pair)
}

/// Write one node per row, labelled and keyed by the row type's entity kind.
pub async fn create_nodes<N: GraphNode>(
    client: &GraphClient,
    rows: &[N],
    batch_size: usize,
) -> Result<NodeResult> {
    let kind = N::KIND;
    let statement = node_statement(kind);
    let mut result = NodeResult { kind, written: 0, batches: 0 };

    for chunk in rows.chunks(batch_size.max(1)) {
        let params: Vec<BoltType> = chunk.iter().map(node_param).collect();
        let query = Query::new(statement.clone()).param("rows", params);

        client
            .execute(query)
            .await
            .with_context(|| format!("Failed to write {} nodes (batch {})", kind, result.batches + 1))?;

        result.written += chunk.len();
        result.batches += 1;
        debug!(label = kind.label(), rows = chunk.len(), batch = result.batches, "Wrote node batch");
    }

    info!(label = kind.label(), nodes = result.written, "Nodes written");
    Ok(result)
}

/// Match both endpoints of every pair by key and create a `kind` edge between them.
///
/// Pairs with a missing endpoint produce no edge; they are counted in
/// [`RelationshipResult::unmatched`] and logged as a warning.
pub async fn create_relationships(
    client: &GraphClient,
    kind: RelationshipKind,
    pairs: &[Link],
    batch_size: usize,
) -> Result<RelationshipResult> {
    let statement = relationship_statement(kind);
    let mut result = RelationshipResult { kind, created: 0, existing: 0, unmatched: 0, batches: 0 };

    for chunk in pairs.chunks(batch_size.max(1)) {
        let params: Vec<BoltType> = chunk.iter().map(link_param).collect();
        let query = Query::new(statement.clone()).param("pairs", params);

        let rows = client
            .query(query)
            .await
            .with_context(|| format!("Failed to write {} relationships (batch {})", kind, result.batches + 1))?;

        let counts = batch_counts(&rows)
            .with_context(|| format!("Bad summary for {} relationships (batch {})", kind, result.batches + 1))?;

        result.unmatched += counts.unmatched;
        result.created += counts.created;
        result.existing += counts.existing();
        result.batches += 1;
        debug!(
            rel_type = kind.rel_type(),
            pairs = chunk.len(),
            created = counts.created,
            unmatched = counts.unmatched,
            "Wrote relationship batch"
        );
    }

    if result.unmatched > 0 {
        warn!(
            rel_type = kind.rel_type(),
            unmatched = result.unmatched,
            "Some relationship pairs reference missing nodes; no edge was created for them"
        );
    }
    info!(
        rel_type = kind.rel_type(),
        created = result.created,
        existing = result.existing,
        "Relationships written"
    );
    Ok(result)
}

/// Run a single step of the pipeline.
pub async fn run_step(
    client: &GraphClient,
    dataset: &SampleDataset,
    step: LoadStep,
    batch_size: usize,
) -> Result<StepOutcome> {
    let outcome = match step {
        LoadStep::Clear => {
            clear(client).await?;
            StepOutcome::Done
        }
        LoadStep::Constraints => {
            schema::create_constraints(client).await?;
            StepOutcome::Done
        }
        LoadStep::Nodes(kind) => {
            let result = match kind {
                EntityKind::Movie => create_nodes(client, &dataset.movies, batch_size).await?,
                EntityKind::Actor => create_nodes(client, &dataset.actors, batch_size).await?,
                EntityKind::Director => create_nodes(client, &dataset.directors, batch_size).await?,
                EntityKind::Genre => create_nodes(client, &dataset.genres, batch_size).await?,
            };
            StepOutcome::Nodes(result)
        }
        LoadStep::Relationships(kind) => {
            let pairs = match kind {
                RelationshipKind::ActedIn => dataset.acted_in_links(),
                RelationshipKind::Directed => dataset.directed_links(),
                RelationshipKind::InGenre => dataset.in_genre_links(),
            };
            StepOutcome::Relationships(create_relationships(client, kind, &pairs, batch_size).await?)
        }
    };
    Ok(outcome)
}

/// Wipe the store and write the whole dataset.
pub async fn load_dataset(
    client: &GraphClient,
    dataset: &SampleDataset,
    batch_size: usize,
) -> Result<LoadSummary> {
    info!(batch_size, "Starting full graph load");

    let mut summary = LoadSummary::default();
    for step in plan() {
        let outcome = run_step(client, dataset, step, batch_size)
            .await
            .with_context(|| format!("{} failed", step.describe()))?;
        summary.record(outcome);
    }

    info!(
        nodes = summary.nodes_written(),
        relationships = summary.relationships_created(),
        unmatched = summary.unmatched(),
        "Full load complete"
    );
    Ok(summary)
}
