//! `status` and `verify`: inspect what is currently stored.

use anyhow::{bail, Result};
use colored::Colorize;
use moviegraph_core::dataset::director_for;
use moviegraph_core::{GraphConfig, SampleDataset};
use moviegraph_graph::queries::stats;
use moviegraph_graph::{GraphClient, director_of};

use crate::output;

/// Movie whose director `verify` spot-checks.
const SAMPLE_MOVIE: i64 = 5;

pub async fn execute_status(config: &GraphConfig) -> Result<()> {
    let client = super::connect(config).await?;
    let result = stats::collect_stats(&client).await;
    client.close();

    output::print_stats(&result?);
    Ok(())
}

pub async fn execute_verify(config: &GraphConfig) -> Result<()> {
    let client = super::connect(config).await?;
    let result = run_verify(&client).await;
    client.close();

    let (integrity, director_ok) = result?;
    output::print_integrity(&integrity);
    if !integrity.is_ok() || !director_ok {
        bail!("Graph does not match the sample dataset");
    }
    println!("{}", "Graph matches the sample dataset.".green().bold());
    Ok(())
}

async fn run_verify(client: &GraphClient) -> Result<(stats::IntegrityReport, bool)> {
    let expected = SampleDataset::generate().expected_counts();
    let integrity = stats::verify(client, &expected).await?;

    let want = format!("Director {}", director_for(SAMPLE_MOVIE));
    let found = director_of(client, SAMPLE_MOVIE).await?;
    let director_ok = found.as_deref() == Some(want.as_str());
    if director_ok {
        println!("  {} Movie {} is directed by {}", "✓".green(), SAMPLE_MOVIE, want);
    } else {
        println!(
            "  {} Movie {} should be directed by {}, found {}",
            "✗".red(),
            SAMPLE_MOVIE,
            want,
            found.as_deref().unwrap_or("nothing")
        );
    }
    Ok((integrity, director_ok))
}
