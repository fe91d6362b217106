//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use moviegraph_core::{ConfigOverrides, GraphConfig};
use moviegraph_graph::GraphClient;
use std::path::PathBuf;

pub mod clear;
pub mod load;
pub mod status;
pub mod view;

/// MovieGraph - movie knowledge graph loader and viewer
#[derive(Parser)]
#[command(name = "moviegraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long, global = true, env = "MOVIEGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Neo4j bolt address
    #[arg(long, global = true, env = "NEO4J_URI")]
    pub address: Option<String>,

    /// Neo4j username
    #[arg(long, global = true, env = "NEO4J_USER")]
    pub username: Option<String>,

    /// Neo4j password
    #[arg(long, global = true, env = "NEO4J_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Neo4j database name
    #[arg(long, global = true, env = "NEO4J_DATABASE")]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Wipe the database and load the sample dataset
    Load(load::LoadArgs),

    /// Print the movie, actor, director and genre reports
    View(view::ViewArgs),

    /// Show node and relationship counts
    Status,

    /// Check the database against the sample dataset
    Verify,

    /// Delete every node and relationship
    Clear(clear::ClearArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let batch_size = match &self.command {
            Commands::Load(args) => args.batch_size,
            _ => None,
        };
        let overrides = ConfigOverrides {
            address: self.address,
            username: self.username,
            password: self.password,
            database: self.database,
            batch_size,
        };
        let config = GraphConfig::load(self.config.as_deref(), overrides)
            .context("Failed to load configuration")?;
        tracing::debug!(?config, "Configuration resolved");

        match self.command {
            Commands::Load(_) => load::execute(&config).await,
            Commands::View(args) => view::execute(args, &config).await,
            Commands::Status => status::execute_status(&config).await,
            Commands::Verify => status::execute_verify(&config).await,
            Commands::Clear(args) => clear::execute(args, &config).await,
        }
    }
}

/// Open the connection every command works through.
///
/// A failure here aborts the command before any statement is issued.
pub(crate) async fn connect(config: &GraphConfig) -> Result<GraphClient> {
    GraphClient::connect_with_timeout(config)
        .await
        .context("Connection failed")
}
