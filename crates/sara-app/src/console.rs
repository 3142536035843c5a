//! Terminal implementation of `TextInterface`.

use std::path::PathBuf;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sara_common::PlatformError;
use tracing::{debug, warn};

use crate::interface::{Speaker, TextInterface};

/// `#007ACC`
const USER_COLOR: (u8, u8, u8) = (0, 122, 204);
/// `#00CC00`
const ASSISTANT_COLOR: (u8, u8, u8) = (0, 204, 0);

/// Line-editor input with colored transcript output on stdout.
pub struct ConsoleInterface {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    /// The last line typed, which the editor has already put on screen.
    echoed: Option<String>,
}

impl ConsoleInterface {
    pub fn new(history_path: Option<PathBuf>) -> Result<Self, PlatformError> {
        let mut editor =
            DefaultEditor::new().map_err(|e| PlatformError::ConsoleError(e.to_string()))?;

        if let Some(ref path) = history_path {
            if let Err(e) = editor.load_history(path) {
                debug!(path = %path.display(), error = %e, "no input history loaded");
            }
        }

        Ok(Self {
            editor,
            history_path,
            echoed: None,
        })
    }

    fn user_label() -> String {
        let (r, g, b) = USER_COLOR;
        "You:".truecolor(r, g, b).bold().to_string()
    }

    fn assistant_label() -> String {
        let (r, g, b) = ASSISTANT_COLOR;
        "Chatbot:".truecolor(r, g, b).bold().to_string()
    }
}

impl TextInterface for ConsoleInterface {
    fn read_input(&mut self) -> Option<String> {
        let prompt = format!("{} ", Self::user_label());
        match self.editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                self.echoed = Some(line.clone());
                Some(line)
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                warn!(error = %e, "console read failed");
                None
            }
        }
    }

    fn display_message(&mut self, text: &str, speaker: Speaker) {
        match speaker {
            Speaker::User => {
                if self.echoed.take().as_deref() == Some(text) {
                    return;
                }
                println!("{} {text}", Self::user_label());
            }
            Speaker::Assistant => {
                println!("{} {text}\n", Self::assistant_label());
            }
            Speaker::Notice => println!("{}", text.dimmed()),
        }
    }

    fn prompt_save_destination(&mut self, default_name: &str) -> Option<PathBuf> {
        // Pre-filled with the default; clearing the line cancels.
        let answer = self
            .editor
            .readline_with_initial("Save conversation as: ", (default_name, ""));
        match answer {
            Ok(line) if !line.trim().is_empty() => Some(PathBuf::from(line.trim())),
            Ok(_) | Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                warn!(error = %e, "save prompt failed");
                None
            }
        }
    }
}

impl Drop for ConsoleInterface {
    fn drop(&mut self) {
        let Some(ref path) = self.history_path else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = self.editor.save_history(path) {
            warn!(path = %path.display(), error = %e, "failed to save input history");
        }
    }
}
