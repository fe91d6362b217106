//! MovieGraph CLI
//!
//! Loads the sample movie dataset into Neo4j and prints reports from it.

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

/// Initialize tracing with optional file logging.
///
/// Console logs go to stderr so that report tables on stdout stay clean.
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing(log_file: Option<&std::path::Path>, verbose: bool) -> Option<WorkerGuard> {
    let default_filter = if verbose {
        "moviegraph=debug,moviegraph_graph=debug,moviegraph_core=debug"
    } else {
        "moviegraph=info,moviegraph_graph=info,moviegraph_core=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if let Some(path) = log_file {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let file_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "moviegraph.log".into());

        let appender = tracing_appender::rolling::never(dir, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        None
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = init_tracing(cli.log_file.as_deref(), cli.verbose);

    cli.execute().await
}
