//! Read queries against the movie graph.

pub mod reports;
pub mod stats;
