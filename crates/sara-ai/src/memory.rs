//! Summary-buffer memory.
//!
//! Keeps the history handed to the backend under a token budget by
//! folding the oldest turns into a running summary written by the model
//! itself. The transcript is never touched: only the request shrinks.

use tracing::{debug, warn};

use crate::export::{ASSISTANT_PREFIX, USER_PREFIX};
use crate::prompt::{SUMMARY_INSTRUCTION, SUMMARY_PREFIX};
use crate::{InferenceBackend, Message, Role};

/// Rough token estimate: one token per four characters, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

fn estimate_messages(messages: &[Message]) -> usize {
    messages.iter().map(|m| estimate_tokens(m.content())).sum()
}

/// What to send for one request once the memory has done its work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedHistory {
    /// Running summary of the turns no longer sent verbatim.
    pub summary: Option<String>,
    /// The turns sent verbatim, oldest first.
    pub history: Vec<Message>,
}

impl PreparedHistory {
    /// The system instruction with the running summary appended.
    pub fn system_instruction(&self, base: &str) -> String {
        match self.summary {
            Some(ref summary) => format!("{base}{}", summary_block(summary)),
            None => base.to_string(),
        }
    }

    /// Estimated cost of the summary block plus the verbatim turns.
    pub fn estimated_tokens(&self) -> usize {
        summary_cost(self.summary.as_deref()) + estimate_messages(&self.history)
    }
}

fn summary_block(summary: &str) -> String {
    format!("\n\n{SUMMARY_PREFIX}{summary}")
}

fn summary_cost(summary: Option<&str>) -> usize {
    summary.map_or(0, |s| estimate_tokens(&summary_block(s)))
}

#[derive(Debug, Clone)]
pub struct SummaryMemory {
    token_limit: usize,
    summary: Option<String>,
    /// How many leading history messages the summary already covers.
    folded: usize,
}

impl SummaryMemory {
    pub fn new(token_limit: usize) -> Self {
        Self {
            token_limit,
            summary: None,
            folded: 0,
        }
    }

    pub fn token_limit(&self) -> usize {
        self.token_limit
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn folded(&self) -> usize {
        self.folded
    }

    /// Build what to send for the next request.
    ///
    /// `history` is the full prior conversation (no system instruction).
    /// Messages already folded into the summary are replaced by it. While
    /// the summary plus the rest exceeds the budget, the oldest exchanges
    /// are folded in, one summarization call per pass. Only the newest
    /// exchange is never folded, so it alone may still exceed the budget.
    pub async fn prepare(
        &mut self,
        backend: &dyn InferenceBackend,
        history: &[Message],
    ) -> PreparedHistory {
        loop {
            let start = self.folded.min(history.len());
            let recent = &history[start..];

            if self.summary_cost() + estimate_messages(recent) <= self.token_limit {
                return self.compose(recent);
            }

            let cut = self.fold_point(recent);
            if cut == 0 {
                debug!(
                    limit = self.token_limit,
                    "nothing left to fold, request stays over budget"
                );
                return self.compose(recent);
            }

            let input = summarization_input(self.summary.as_deref(), &recent[..cut]);
            debug!(messages = cut, "summarizing older conversation turns");

            match backend.complete(SUMMARY_INSTRUCTION, &[], &input).await {
                Ok(summary) if !summary.trim().is_empty() => {
                    self.summary = Some(summary.trim().to_string());
                    self.folded = start + cut;
                }
                Ok(_) => {
                    warn!("summarization returned nothing, sending unsummarized history");
                    return self.compose(recent);
                }
                Err(e) => {
                    warn!(error = %e, "summarization failed, sending unsummarized history");
                    return self.compose(recent);
                }
            }
        }
    }

    fn summary_cost(&self) -> usize {
        summary_cost(self.summary.as_deref())
    }

    /// How many leading messages of `recent` to fold.
    ///
    /// Cuts only land on a user message, so an exchange is never split and
    /// the kept history always opens with the user. Picks the first cut
    /// whose remainder fits beside the current summary, and never cuts past
    /// the newest user message.
    fn fold_point(&self, recent: &[Message]) -> usize {
        let Some(newest_user) = recent.iter().rposition(|m| m.role() == Role::User) else {
            return 0;
        };
        let budget = self.token_limit.saturating_sub(self.summary_cost());

        let mut cut = 0;
        for (i, message) in recent.iter().enumerate().take(newest_user + 1).skip(1) {
            if message.role() != Role::User {
                continue;
            }
            cut = i;
            if estimate_messages(&recent[i..]) <= budget {
                break;
            }
        }
        cut
    }

    fn compose(&self, recent: &[Message]) -> PreparedHistory {
        PreparedHistory {
            summary: self.summary.clone(),
            history: recent.to_vec(),
        }
    }
}

fn summarization_input(previous: Option<&str>, lines: &[Message]) -> String {
    let mut input = String::from("Current summary:\n");
    input.push_str(previous.unwrap_or("(none)"));
    input.push_str("\n\nNew lines of conversation:\n");
    for message in lines {
        let prefix = match message.role() {
            Role::User => USER_PREFIX,
            Role::Assistant => ASSISTANT_PREFIX,
            Role::System => continue,
        };
        input.push_str(prefix);
        input.push_str(message.content());
        input.push('\n');
    }
    input.push_str("\nNew summary:");
    input
}
