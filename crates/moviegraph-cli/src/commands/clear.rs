//! `clear`: delete every node and relationship.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::Confirm;
use moviegraph_core::GraphConfig;
use moviegraph_graph::loader;

#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn execute(args: ClearArgs, config: &GraphConfig) -> Result<()> {
    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete ALL nodes and relationships in '{}'?", config.database))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("{}", "Aborted.".yellow());
            return Ok(());
        }
    }

    let client = super::connect(config).await?;
    let result = loader::clear(&client).await;
    client.close();
    result?;

    println!("{}", "Database cleared.".green().bold());
    Ok(())
}
