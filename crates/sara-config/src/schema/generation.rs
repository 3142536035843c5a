use serde::Deserialize;

/// Sampling and context parameters handed to the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Context size of the loaded model, in tokens (valid range: 512-131072).
    pub context_window: u32,
    /// Upper bound on generated tokens per reply (1-context_window).
    pub max_tokens: u32,
    /// Sampling temperature (0.0-2.0).
    pub temperature: f64,
    /// Nucleus-sampling threshold (0.0-1.0).
    pub top_p: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            context_window: 4096,
            max_tokens: 1024,
            temperature: 0.5,
            top_p: 0.75,
        }
    }
}
