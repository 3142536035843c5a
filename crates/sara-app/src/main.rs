mod cli;
mod console;
mod controller;
mod interface;
mod setup;

use std::sync::Arc;

use sara_ai::{LlamaCppBackend, SessionManager};
use sara_common::SaraError;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::console::ConsoleInterface;
use crate::controller::ChatController;

/// `RUST_LOG` plus one directive; an unparsable directive falls back to `warn`.
fn env_filter(directive: &str) -> EnvFilter {
    let directive = directive
        .parse()
        .unwrap_or_else(|_| LevelFilter::WARN.into());
    EnvFilter::from_default_env().add_directive(directive)
}

/// Logs go to stderr so the conversation on stdout stays clean.
fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: cli::Args) -> Result<(), SaraError> {
    // Config loading logs before the real level is known.
    let startup = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&setup::log_directive(&args, None)))
        .with_writer(std::io::stderr)
        .finish();
    let loaded = tracing::subscriber::with_default(startup, || setup::load_config(&args));

    init_logging(&setup::log_directive(&args, loaded.as_ref().ok()));
    let config = loaded?;

    tracing::info!("Sara v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(config = ?config.backend, "backend settings");

    let backend = LlamaCppBackend::new(setup::backend_config(&config))
        .map_err(|e| SaraError::Backend(e.to_string()))?;
    let backend = Arc::new(backend);

    let system_instruction = setup::system_instruction(&config);
    let budget = setup::memory_budget(&config, &system_instruction);
    tracing::debug!(budget, "history token budget");
    let session =
        SessionManager::new(backend.clone(), system_instruction).with_summary_memory(budget);

    let history = match sara_common::paths::input_history_file() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!("input history disabled: {e}");
            None
        }
    };
    let mut ui = ConsoleInterface::new(history)?;

    ChatController::new(&config.persona.name, &config.export.default_file_name)
        .run(&session, &mut ui)
        .await;

    let usage = backend.usage();
    tracing::info!(
        requests = usage.call_count(),
        tokens = usage.total_tokens(),
        "shutdown complete"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = cli::parse();
    if let Err(e) = run(args).await {
        eprintln!("sara: {e}");
        std::process::exit(1);
    }
}
