//! Configuration schema types for Sara.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod backend;
mod generation;
mod persona;
mod system;

pub use backend::BackendConfig;
pub use generation::GenerationConfig;
pub use persona::{MemoryConfig, PersonaConfig};
pub use system::{ExportConfig, LogLevel, LoggingConfig};

use serde::Deserialize;

/// Environment variable consulted when `backend.api_key` is unset.
pub const API_KEY_ENV: &str = "SARA_API_KEY";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SaraConfig {
    pub backend: BackendConfig,
    pub generation: GenerationConfig,
    pub persona: PersonaConfig,
    pub memory: MemoryConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

impl SaraConfig {
    /// Fill unset values from the process environment.
    pub fn apply_env_overrides(&mut self) {
        if self.backend.api_key.is_none() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                if !key.trim().is_empty() {
                    self.backend.api_key = Some(key);
                }
            }
        }
    }
}
