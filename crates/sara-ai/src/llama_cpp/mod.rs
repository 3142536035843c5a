//! llama.cpp server backend.
//!
//! Implements `InferenceBackend` against the OpenAI-compatible
//! `/v1/chat/completions` endpoint that `llama-server` exposes. Any other
//! server speaking the same protocol works too.

mod api;
mod client;
mod config;

pub use client::LlamaCppBackend;
pub use config::LlamaCppConfig;
