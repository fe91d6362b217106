//! MovieGraph Core Library
//!
//! Domain model, deterministic sample dataset and configuration for the
//! movie knowledge graph.

pub mod config;
pub mod dataset;
pub mod entity;
pub mod error;

pub use config::{ConfigOverrides, GraphConfig};
pub use dataset::SampleDataset;
pub use entity::{EntityKind, GraphNode, Link, PropertyValue, RelationshipKind};
pub use error::{MovieGraphError, MovieGraphResult};
