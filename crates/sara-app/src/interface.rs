//! The seam between the chat controller and whatever shows the conversation.

use std::path::PathBuf;

/// Who a displayed line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
    /// Status lines from the app itself (help, save results, errors).
    Notice,
}

/// A line-oriented chat surface.
///
/// Calls may block on the user; the controller runs them off the async
/// worker.
pub trait TextInterface {
    /// Next line of user input, or `None` once input is closed.
    fn read_input(&mut self) -> Option<String>;

    fn display_message(&mut self, text: &str, speaker: Speaker);

    /// Ask where to save the conversation. `None` cancels.
    fn prompt_save_destination(&mut self, default_name: &str) -> Option<PathBuf>;
}
