//! Full configuration validation.
//!
//! Validates numeric ranges and cross-field limits, collecting every
//! error into a single `ConfigError`.

mod helpers;


use crate::schema::SaraConfig;
use helpers::{validate_range, validate_range_f64};
use sara_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SaraConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_backend(&mut errors, config);
    validate_generation(&mut errors, config);
    validate_memory(&mut errors, config);

    if config.persona.name.trim().is_empty() {
        errors.push("persona.name must not be empty".into());
    }
    if config.export.default_file_name.trim().is_empty() {
        errors.push("export.default_file_name must not be empty".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_backend(errors: &mut Vec<String>, config: &SaraConfig) {
    let backend = &config.backend;
    if !(backend.url.starts_with("http://") || backend.url.starts_with("https://")) {
        errors.push(format!(
            "backend.url = {:?} must start with http:// or https://",
            backend.url
        ));
    }
    if backend.model.trim().is_empty() {
        errors.push("backend.model must not be empty".into());
    }
    validate_range(errors, "backend.connect_timeout_secs", backend.connect_timeout_secs, 1, 120);
    validate_range(errors, "backend.request_timeout_secs", backend.request_timeout_secs, 1, 3600);
}

fn validate_generation(errors: &mut Vec<String>, config: &SaraConfig) {
    let generation = &config.generation;
    validate_range(errors, "generation.context_window", generation.context_window, 512, 131_072);
    validate_range(
        errors,
        "generation.max_tokens",
        generation.max_tokens,
        1,
        generation.context_window,
    );
    validate_range_f64(errors, "generation.temperature", generation.temperature, 0.0, 2.0);
    validate_range_f64(errors, "generation.top_p", generation.top_p, 0.0, 1.0);
}

fn validate_memory(errors: &mut Vec<String>, config: &SaraConfig) {
    if let Some(limit) = config.memory.summary_token_limit {
        validate_range(
            errors,
            "memory.summary_token_limit",
            limit,
            64,
            config.generation.context_window,
        );
    }
}
