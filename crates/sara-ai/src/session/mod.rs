//! Conversation session management.
//!
//! A `SessionManager` holds the transcript, builds each backend request,
//! records the replies and exports the conversation on demand.

mod chat;
mod export;
mod manager;
mod types;


pub use manager::SessionManager;
pub use types::{ExportOutcome, SessionState, Submission, FALLBACK_RESPONSE};
