//! `load`: wipe the database and write the sample dataset.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use moviegraph_core::{GraphConfig, SampleDataset};
use moviegraph_graph::loader::{self, LoadSummary};
use moviegraph_graph::queries::stats;
use moviegraph_graph::{GraphClient, IntegrityReport};

use crate::output;

#[derive(Args)]
pub struct LoadArgs {
    /// Rows per write statement (overrides the config file)
    #[arg(long)]
    pub batch_size: Option<usize>,
}

pub async fn execute(config: &GraphConfig) -> Result<()> {
    let dataset = SampleDataset::generate();
    let client = super::connect(config).await?;

    let result = run(&client, &dataset, config.batch_size).await;
    client.close();
    let (summary, integrity) = result?;

    println!("\n{}", output::load_headline(&summary, &integrity));
    output::print_load_summary(&summary);
    output::print_integrity(&integrity);
    Ok(())
}

async fn run(
    client: &GraphClient,
    dataset: &SampleDataset,
    batch_size: usize,
) -> Result<(LoadSummary, IntegrityReport)> {
    let steps = loader::plan();
    let progress = ProgressBar::new(steps.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress template")?
            .progress_chars("=> "),
    );

    let mut summary = LoadSummary::default();
    for step in steps {
        progress.set_message(step.describe());
        let outcome = match loader::run_step(client, dataset, step, batch_size).await {
            Ok(outcome) => outcome,
            Err(e) => {
                progress.abandon_with_message(format!("{} failed", step.describe()));
                return Err(e);
            }
        };
        summary.record(outcome);
        progress.inc(1);
    }
    progress.finish_with_message("Load complete");

    let integrity = stats::verify(client, &dataset.expected_counts()).await?;
    Ok((summary, integrity))
}
