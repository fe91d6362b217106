//! # MovieGraph Graph
//!
//! Neo4j integration for MovieGraph.
//!
//! Loads the sample dataset as nodes and relationships, installs the
//! uniqueness constraints, and runs the fixed viewer reports.

pub mod client;
pub mod loader;
pub mod queries;
pub mod schema;

pub use client::{GraphClient, GraphCounts};
pub use loader::{LoadStep, LoadSummary, NodeResult, RelationshipResult, StepOutcome, load_dataset};
pub use queries::reports::{Report, Table, UnknownReport, director_of, run_report};
pub use queries::stats::{GraphStats, IntegrityReport, collect_stats, verify};
