//! Persona and conversational memory settings.

use serde::Deserialize;

/// Who the assistant is.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// Display name used in the console banner.
    pub name: String,
    /// Replaces the built-in tutoring instruction when set.
    pub system_prompt: Option<String>,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: "Sara".into(),
            system_prompt: None,
        }
    }
}

/// Summary-buffer memory. Absent limit means the full history is sent.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct MemoryConfig {
    /// Estimated token budget for prior history (64-context_window). When
    /// unset the app derives one from the generation settings.
    pub summary_token_limit: Option<u32>,
}
