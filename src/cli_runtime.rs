use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bites::config::ApiConfig;

use crate::cli_subcommands::Commands;

#[derive(Parser)]
#[command(name = "bites")]
#[command(about = "Campus food discovery client", long_about = None)]
pub(crate) struct Cli {
    /// Backend base URL (overrides BITES_API_URL and the config file)
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    // Quiet by default; RUST_LOG opts in. Logs go to stderr so they never
    // interleave with CLI output or the TUI screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = ApiConfig::resolve(cli.api_url.as_deref())?;

    match cli.command {
        None => bites::tui_shell::run(api),
        Some(command) => {
            // One logical thread of control; network calls are the only
            // suspension points.
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("build tokio runtime")?;
            runtime.block_on(crate::cli_exec::handle_command(api, command))
        }
    }
}
