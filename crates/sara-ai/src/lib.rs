//! Conversation engine for Sara.
//!
//! Provides:
//! - the `Message`/`Transcript` data model
//! - the `InferenceBackend` boundary and its `BackendError` taxonomy
//! - the `SessionManager`, which owns the transcript and mediates every
//!   request/response cycle with the backend
//! - plain-text transcript export
//! - an optional summary-buffer memory that keeps prompts within the
//!   model's context window
//! - a llama.cpp (OpenAI-compatible) HTTP backend with SSE streaming

pub mod export;
pub mod llama_cpp;
pub mod memory;
pub mod prompt;
pub mod session;
pub mod streaming;
pub mod token_tracker;
pub mod transcript;

use async_trait::async_trait;

pub use export::{parse_transcript, render_transcript, ExportError};
pub use llama_cpp::{LlamaCppBackend, LlamaCppConfig};
pub use memory::{PreparedHistory, SummaryMemory};
pub use prompt::SYSTEM_INSTRUCTION;
pub use session::{ExportOutcome, SessionManager, SessionState, Submission, FALLBACK_RESPONSE};
pub use token_tracker::{TokenTracker, TokenUsage};
pub use transcript::{Message, Role, Transcript};

/// Anything that turns a conversation plus an instruction into one reply.
///
/// Implementations own every transport and response-shape concern; the
/// session only ever sees a plain string or a `BackendError`.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn complete(
        &self,
        system_instruction: &str,
        history: &[Message],
        new_message: &str,
    ) -> Result<String, BackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Timeout")]
    Timeout,
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Backend returned an empty response")]
    EmptyResponse,
}
