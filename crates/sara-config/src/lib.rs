//! Sara configuration system.
//!
//! TOML-based configuration for the inference backend, generation
//! parameters, persona, memory and export. All sections use sensible
//! defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sara_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("talking to {}", config.backend.url);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::SaraConfig;
pub use toml_loader::{default_config_path, load_default, load_from_path};

use sara_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a commented default `config.toml` if none exists.
pub fn load_config() -> Result<SaraConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}
