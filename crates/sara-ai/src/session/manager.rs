//! SessionManager struct and transcript access.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sara_common::SessionId;
use tracing::info;

use crate::memory::SummaryMemory;
use crate::{InferenceBackend, Transcript};

use super::types::SessionState;

/// Owns one conversation and mediates every exchange with the backend.
///
/// Constructed explicitly and shared by reference with whatever drives
/// the UI; nothing here touches the interface directly.
pub struct SessionManager {
    pub(super) id: SessionId,
    pub(super) backend: Arc<dyn InferenceBackend>,
    /// Held only for short synchronous sections, never across an await.
    pub(super) transcript: Mutex<Transcript>,
    /// Only locked while the busy flag is held.
    pub(super) memory: Option<tokio::sync::Mutex<SummaryMemory>>,
    pub(super) busy: AtomicBool,
}

impl SessionManager {
    pub fn new(backend: Arc<dyn InferenceBackend>, system_instruction: impl Into<String>) -> Self {
        let id = SessionId::new();
        info!(session = %id.short(), "session started");
        Self {
            id,
            backend,
            transcript: Mutex::new(Transcript::new(system_instruction)),
            memory: None,
            busy: AtomicBool::new(false),
        }
    }

    /// Summarize older turns once the prior history exceeds `token_limit`.
    pub fn with_summary_memory(mut self, token_limit: usize) -> Self {
        self.memory = Some(tokio::sync::Mutex::new(SummaryMemory::new(token_limit)));
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        if self.busy.load(Ordering::Acquire) {
            SessionState::AwaitingBackend
        } else {
            SessionState::Idle
        }
    }

    /// A snapshot of the transcript as it stands.
    pub fn transcript(&self) -> Transcript {
        self.lock_transcript().clone()
    }

    /// Number of conversational turns recorded so far.
    pub fn turn_count(&self) -> usize {
        self.lock_transcript().len()
    }

    pub(super) fn lock_transcript(&self) -> MutexGuard<'_, Transcript> {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
