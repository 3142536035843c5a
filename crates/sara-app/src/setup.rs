//! Startup wiring: config resolution, CLI overrides, backend settings.

use std::time::Duration;

use sara_ai::memory::estimate_tokens;
use sara_ai::{LlamaCppConfig, SYSTEM_INSTRUCTION};
use sara_common::ConfigError;
use sara_config::SaraConfig;

use crate::cli::Args;

/// Load the config named by `--config` (or the platform default), apply
/// CLI overrides on top and validate the result.
pub fn load_config(args: &Args) -> Result<SaraConfig, ConfigError> {
    let mut config = match args.config {
        Some(ref path) => sara_config::load_from_path(path)?,
        None => sara_config::load_config()?,
    };
    apply_cli_overrides(&mut config, args);
    sara_config::validation::validate(&config)?;
    Ok(config)
}

pub fn apply_cli_overrides(config: &mut SaraConfig, args: &Args) {
    if let Some(ref url) = args.url {
        config.backend.url = url.clone();
    }
    if let Some(ref model) = args.model {
        config.backend.model = model.clone();
    }
    if args.no_stream {
        config.backend.stream = false;
    }
}

/// Filter directive: `--log-level` wins over the config file.
pub fn log_directive(args: &Args, config: Option<&SaraConfig>) -> String {
    match (&args.log_level, config) {
        (Some(level), _) => level.clone(),
        (None, Some(config)) => config.logging.level.as_directive().to_string(),
        (None, None) => "warn".to_string(),
    }
}

pub fn backend_config(config: &SaraConfig) -> LlamaCppConfig {
    let backend = &config.backend;
    let generation = &config.generation;

    let mut llama = LlamaCppConfig::new(&backend.url)
        .with_model(&backend.model)
        .with_max_tokens(generation.max_tokens)
        .with_temperature(generation.temperature)
        .with_top_p(generation.top_p)
        .with_stream(backend.stream)
        .with_timeouts(
            Duration::from_secs(u64::from(backend.connect_timeout_secs)),
            Duration::from_secs(u64::from(backend.request_timeout_secs)),
        );
    if let Some(ref key) = backend.api_key {
        llama = llama.with_api_key(key);
    }
    llama
}

/// The persona override from the config, or the built-in tutor persona.
pub fn system_instruction(config: &SaraConfig) -> String {
    config
        .persona
        .system_prompt
        .as_deref()
        .map(str::trim)
        .filter(|prompt| !prompt.is_empty())
        .unwrap_or(SYSTEM_INSTRUCTION)
        .to_string()
}

/// Token budget for the history (summary included) sent with each request.
///
/// `memory.summary_token_limit` when set. Otherwise three quarters of what
/// the context window leaves after the reply and the system instruction;
/// the rest covers the new message, chat-template tokens and the slack in
/// the chars/4 estimate.
pub fn memory_budget(config: &SaraConfig, system_instruction: &str) -> usize {
    if let Some(limit) = config.memory.summary_token_limit {
        return limit as usize;
    }
    let generation = &config.generation;
    let available = (generation.context_window as usize)
        .saturating_sub(generation.max_tokens as usize)
        .saturating_sub(estimate_tokens(system_instruction));
    available * 3 / 4
}
