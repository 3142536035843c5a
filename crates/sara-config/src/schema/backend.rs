//! Inference backend connection settings.

use std::fmt;

use serde::Deserialize;

/// Where and how to reach the chat-completion server.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of a llama.cpp (or OpenAI-compatible) server.
    pub url: String,
    /// Model name sent with each request.
    pub model: String,
    /// Bearer token, if the server requires one.
    pub api_key: Option<String>,
    /// Request token-by-token streaming from the server.
    pub stream: bool,
    /// Connect timeout in seconds (valid range: 1-120).
    pub connect_timeout_secs: u32,
    /// Whole-request timeout in seconds (valid range: 1-3600).
    pub request_timeout_secs: u32,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("stream", &self.stream)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080".into(),
            model: "llama-2-7b-chat".into(),
            api_key: None,
            stream: true,
            connect_timeout_secs: 10,
            request_timeout_secs: 300,
        }
    }
}
