//! Token usage tracking for a backend.

/// Token counts reported for one completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}

/// Tracks cumulative token usage across completions.
#[derive(Debug, Clone, Default)]
pub struct TokenTracker {
    total: TokenUsage,
    /// Number of completions recorded.
    call_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record token usage from one completion.
    pub fn record(&mut self, usage: &TokenUsage) {
        self.total.prompt_tokens = self.total.prompt_tokens.saturating_add(usage.prompt_tokens);
        self.total.completion_tokens = self
            .total
            .completion_tokens
            .saturating_add(usage.completion_tokens);
        self.call_count += 1;
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    pub fn total_tokens(&self) -> u64 {
        self.total.total_tokens()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_accumulate() {
        let mut tracker = TokenTracker::new();
        tracker.record(&TokenUsage {
            prompt_tokens: 100,
            completion_tokens: 20,
        });
        tracker.record(&TokenUsage {
            prompt_tokens: 150,
            completion_tokens: 30,
        });
        assert_eq!(tracker.call_count(), 2);
        assert_eq!(tracker.total().prompt_tokens, 250);
        assert_eq!(tracker.total().completion_tokens, 50);
        assert_eq!(tracker.total_tokens(), 300);
    }

    #[test]
    fn reset_clears_everything() {
        let mut tracker = TokenTracker::new();
        tracker.record(&TokenUsage {
            prompt_tokens: 1,
            completion_tokens: 1,
        });
        tracker.reset();
        assert_eq!(tracker.call_count(), 0);
        assert_eq!(tracker.total_tokens(), 0);
    }

    #[test]
    fn total_saturates() {
        let usage = TokenUsage {
            prompt_tokens: u64::MAX,
            completion_tokens: 1,
        };
        assert_eq!(usage.total_tokens(), u64::MAX);
    }
}
