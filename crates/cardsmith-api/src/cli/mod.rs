//! CLI command definitions for the `cardsmith` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use cardsmith_types::config::ProviderKind;

/// Design bespoke greeting, invitation and business cards by chatting.
#[derive(Parser)]
#[command(name = "cardsmith", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat to collect requirements and design a card.
    Chat(ChatArgs),

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ChatArgs {
    /// LLM provider (overrides CARD_CREW_PROVIDER).
    #[arg(long)]
    pub provider: Option<ProviderKind>,

    /// Model name (overrides CARD_CREW_MODEL).
    #[arg(long)]
    pub model: Option<String>,

    /// Generate the blueprint without asking for confirmation.
    #[arg(short, long)]
    pub yes: bool,

    /// Skip the Pexels background inspiration search.
    #[arg(long)]
    pub no_inspiration: bool,

    /// Write the card HTML (final render if available, else the preview) to PATH.
    #[arg(long, value_name = "PATH")]
    pub html_out: Option<PathBuf>,

    /// Ask the LLM to turn the blueprint into a finished HTML card.
    #[arg(long)]
    pub render_html: bool,
}
