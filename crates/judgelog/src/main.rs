use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use judgelog::runtime::{boot, run};

/// Convert judge submission logs into structured JSON results.
#[derive(Debug, Parser)]
#[command(name = "judgelog", version, about)]
struct Cli {
    /// Config file (TOML); defaults to $JUDGELOG_CONFIG_FILE or ./judgelog.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print JSON reports
    #[arg(long)]
    pretty: bool,

    /// Log files or directories of log files
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    boot::init_logging();

    let (parser, config) = boot::boot(cli.config.as_deref())?;
    let pretty = cli.pretty || config.pretty;

    let all_parsed = run::run(&parser, &cli.paths, config.concurrency, pretty).await?;
    Ok(if all_parsed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
