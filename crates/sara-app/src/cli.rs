use std::path::PathBuf;

use clap::Parser;

/// Sara, a conversational English tutor backed by a local llama.cpp server.
#[derive(Parser, Debug, Default)]
#[command(name = "sara", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Inference server URL (overrides `backend.url`).
    #[arg(long)]
    pub url: Option<String>,

    /// Model name sent to the server (overrides `backend.model`).
    #[arg(long)]
    pub model: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Wait for whole replies instead of streaming them.
    #[arg(long)]
    pub no_stream: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
