//! Session result types and the single-flight guard.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ExportError;

/// Shown to the user whenever the backend fails.
pub const FALLBACK_RESPONSE: &str = "Sorry, I had trouble processing that request.";

/// What became of one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Input was empty after trimming; nothing happened.
    Ignored,
    /// The backend answered; the reply is now in the transcript.
    Replied(String),
    /// The backend failed; only the user turn was recorded.
    Fallback,
    /// Another submission was still awaiting the backend.
    Busy,
}

impl Submission {
    /// The text to show the user, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Replied(text) => Some(text),
            Self::Fallback => Some(FALLBACK_RESPONSE),
            Self::Ignored | Self::Busy => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingBackend,
}

/// Result of `export_transcript`.
#[derive(Debug)]
pub enum ExportOutcome {
    /// No destination was chosen.
    Skipped,
    Saved(PathBuf),
    Failed(ExportError),
}

impl ExportOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Guard that clears the `busy` flag on drop, ensuring it is always released
/// even if the future is cancelled or an early return occurs.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to acquire the busy flag. Returns `None` if already held.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
