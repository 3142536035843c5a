//! The request/response cycle: `submit`.

use tracing::{debug, error, warn};

use crate::Message;

use super::manager::SessionManager;
use super::types::{BusyGuard, Submission};

impl SessionManager {
    /// Record a user turn, ask the backend for a reply and record that too.
    ///
    /// Never fails: backend errors are logged and turned into
    /// `Submission::Fallback`, and the failed exchange leaves only the user
    /// turn behind. Overlapping calls are refused with `Submission::Busy`.
    pub async fn submit(&self, user_text: &str) -> Submission {
        if user_text.trim().is_empty() {
            debug!(session = %self.id.short(), "ignoring empty input");
            return Submission::Ignored;
        }

        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            warn!(session = %self.id.short(), "submit while awaiting backend, rejected");
            return Submission::Busy;
        };

        let (base_instruction, prior) = {
            let mut transcript = self.lock_transcript();
            let prior = transcript.history().to_vec();
            transcript.push(Message::user(user_text));
            (transcript.system_instruction().to_string(), prior)
        };

        let (system_instruction, history) = match self.memory {
            Some(ref memory) => {
                let prepared = memory
                    .lock()
                    .await
                    .prepare(self.backend.as_ref(), &prior)
                    .await;
                debug!(
                    session = %self.id.short(),
                    estimated_tokens = prepared.estimated_tokens(),
                    "history prepared"
                );
                (prepared.system_instruction(&base_instruction), prepared.history)
            }
            None => (base_instruction, prior),
        };

        debug!(
            session = %self.id.short(),
            history = history.len(),
            "sending request to backend"
        );

        match self
            .backend
            .complete(&system_instruction, &history, user_text)
            .await
        {
            Ok(reply) => {
                self.lock_transcript().push(Message::assistant(reply.clone()));
                Submission::Replied(reply)
            }
            Err(e) => {
                error!(session = %self.id.short(), error = %e, "error generating response");
                Submission::Fallback
            }
        }
    }
}
