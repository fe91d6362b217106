//! `view`: print the fixed reports.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use moviegraph_core::GraphConfig;
use moviegraph_graph::{GraphClient, Report, Table, run_report};

use crate::output;

#[derive(Args)]
pub struct ViewArgs {
    /// Only print these reports (repeatable); defaults to all seven
    #[arg(short, long = "report", value_name = "NAME")]
    pub reports: Vec<Report>,

    /// Print the tables as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: ViewArgs, config: &GraphConfig) -> Result<()> {
    let reports = if args.reports.is_empty() {
        Report::ALL.to_vec()
    } else {
        args.reports
    };

    let client = super::connect(config).await?;
    if !args.json {
        println!("{}", "Connected to MovieDB successfully!".green());
    }

    let result = collect(&client, &reports, args.json).await;
    client.close();
    let tables = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tables).context("Failed to encode reports")?);
    }
    Ok(())
}

/// Run each report in order; text mode prints as it goes.
async fn collect(client: &GraphClient, reports: &[Report], json: bool) -> Result<Vec<Table>> {
    let mut tables = Vec::with_capacity(reports.len());
    for report in reports {
        let table = run_report(client, *report).await?;
        if !json {
            output::print_table_section(&table);
        }
        tables.push(table);
    }
    Ok(tables)
}
