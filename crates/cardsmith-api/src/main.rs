//! Cardsmith CLI entry point.
//!
//! Binary name: `cardsmith`
//!
//! Parses CLI arguments, sets up tracing, then dispatches to the command
//! handler.

mod cli;

use clap::Parser;
use clap_complete::generate;

use cardsmith_observe::tracing_setup::{
    init_tracing, otel_enabled, otel_requested, shutdown_tracing, verbosity_directive,
};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The OTel exporter writes to stdout, which --json reserves.
    init_tracing(verbosity_directive(cli.verbose, cli.quiet), otel_enabled(cli.json))
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    if cli.json && otel_requested() {
        tracing::warn!("OTel stdout export is disabled while --json output is active");
    }

    let result = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "cardsmith", &mut std::io::stdout());
            Ok(())
        }
        Commands::Chat(args) => cli::chat::loop_runner::run_chat(args, cli.json).await,
    };

    shutdown_tracing();
    result
}
