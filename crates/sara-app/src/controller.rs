//! Drives a `SessionManager` from a `TextInterface`.

use std::path::PathBuf;

use sara_ai::{ExportOutcome, SessionManager, Submission};
use tracing::info;

use crate::interface::{Speaker, TextInterface};

const HELP: &str = "Commands:
  /save [path]  save the conversation (asks where when no path is given)
  /help         show this help
  /quit, /exit  leave";

const BUSY_NOTICE: &str = "Still waiting for the previous reply.";

/// One line of user input, classified.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Chat(&'a str),
    Save(Option<PathBuf>),
    Help,
    Quit,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        let (word, rest) = trimmed
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((trimmed, ""));

        match word {
            "/quit" | "/exit" => Self::Quit,
            "/help" => Self::Help,
            "/save" if rest.is_empty() => Self::Save(None),
            "/save" => Self::Save(Some(PathBuf::from(rest))),
            _ => Self::Chat(line),
        }
    }
}

pub struct ChatController {
    persona_name: String,
    default_file_name: String,
}

impl ChatController {
    pub fn new(persona_name: impl Into<String>, default_file_name: impl Into<String>) -> Self {
        Self {
            persona_name: persona_name.into(),
            default_file_name: default_file_name.into(),
        }
    }

    pub fn greeting(&self) -> String {
        format!(
            "{}, your English learning assistant. Type your message below.",
            self.persona_name
        )
    }

    /// Run until the user quits or input closes.
    ///
    /// Blocking interface calls go through `block_in_place`, so this needs
    /// the multi-threaded runtime.
    pub async fn run<U: TextInterface>(&self, session: &SessionManager, ui: &mut U) {
        ui.display_message(&self.greeting(), Speaker::Notice);
        ui.display_message("Type /help for commands.", Speaker::Notice);

        while let Some(line) = tokio::task::block_in_place(|| ui.read_input()) {
            match Command::parse(&line) {
                Command::Quit => break,
                Command::Help => ui.display_message(HELP, Speaker::Notice),
                Command::Save(path) => self.save(session, ui, path),
                Command::Chat(text) => {
                    if text.trim().is_empty() {
                        continue;
                    }
                    ui.display_message(text, Speaker::User);
                    let result = session.submit(text).await;
                    match result {
                        Submission::Busy => ui.display_message(BUSY_NOTICE, Speaker::Notice),
                        _ => {
                            if let Some(reply) = result.text() {
                                ui.display_message(reply, Speaker::Assistant);
                            }
                        }
                    }
                }
            }
        }

        info!(
            session = %session.id().short(),
            turns = session.turn_count(),
            "chat ended"
        );
    }

    fn save<U: TextInterface>(&self, session: &SessionManager, ui: &mut U, path: Option<PathBuf>) {
        let destination = match path {
            Some(path) => Some(path),
            None => {
                tokio::task::block_in_place(|| ui.prompt_save_destination(&self.default_file_name))
            }
        };

        let notice = match session.export_transcript(destination.as_deref()) {
            ExportOutcome::Saved(path) => format!("Conversation saved to {}", path.display()),
            ExportOutcome::Skipped => "Save cancelled.".to_string(),
            ExportOutcome::Failed(e) => format!("Could not save the conversation: {e}"),
        };
        ui.display_message(&notice, Speaker::Notice);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use async_trait::async_trait;
    use sara_ai::{BackendError, InferenceBackend, Message, FALLBACK_RESPONSE};

    use super::*;

    #[derive(Default)]
    struct ScriptedUi {
        inputs: VecDeque<String>,
        shown: Vec<(String, Speaker)>,
        save_answer: Option<PathBuf>,
        save_prompts: Vec<String>,
    }

    impl ScriptedUi {
        fn new(inputs: &[&str]) -> Self {
            Self {
                inputs: inputs.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }

        fn lines(&self, speaker: Speaker) -> Vec<&str> {
            self.shown
                .iter()
                .filter(|(_, s)| *s == speaker)
                .map(|(t, _)| t.as_str())
                .collect()
        }
    }

    impl TextInterface for ScriptedUi {
        fn read_input(&mut self) -> Option<String> {
            self.inputs.pop_front()
        }

        fn display_message(&mut self, text: &str, speaker: Speaker) {
            self.shown.push((text.to_string(), speaker));
        }

        fn prompt_save_destination(&mut self, default_name: &str) -> Option<PathBuf> {
            self.save_prompts.push(default_name.to_string());
            self.save_answer.clone()
        }
    }

    /// Replies "ok: <input>", except for "fail".
    struct Echo;

    #[async_trait]
    impl InferenceBackend for Echo {
        async fn complete(
            &self,
            _system_instruction: &str,
            _history: &[Message],
            new_message: &str,
        ) -> Result<String, BackendError> {
            if new_message == "fail" {
                Err(BackendError::Timeout)
            } else {
                Ok(format!("ok: {new_message}"))
            }
        }
    }

    fn session() -> SessionManager {
        SessionManager::new(Arc::new(Echo), "SYSTEM")
    }

    fn controller() -> ChatController {
        ChatController::new("Sara", "conversation.txt")
    }

    #[test]
    fn command_parsing() {
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse("  /exit  "), Command::Quit);
        assert_eq!(Command::parse("/help"), Command::Help);
        assert_eq!(Command::parse("/save"), Command::Save(None));
        assert_eq!(
            Command::parse("/save  notes/today.txt "),
            Command::Save(Some(PathBuf::from("notes/today.txt")))
        );
        assert_eq!(Command::parse("hello /quit"), Command::Chat("hello /quit"));
        assert_eq!(Command::parse("/quitting"), Command::Chat("/quitting"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn greets_then_relays_each_exchange() {
        let session = session();
        let mut ui = ScriptedUi::new(&["hi", "fail", "bye"]);

        controller().run(&session, &mut ui).await;

        assert_eq!(
            ui.shown[0].0,
            "Sara, your English learning assistant. Type your message below."
        );
        assert_eq!(ui.lines(Speaker::User), ["hi", "fail", "bye"]);
        assert_eq!(
            ui.lines(Speaker::Assistant),
            ["ok: hi", FALLBACK_RESPONSE, "ok: bye"]
        );
        assert_eq!(session.turn_count(), 5);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn blank_lines_are_not_sent() {
        let session = session();
        let mut ui = ScriptedUi::new(&["", "   ", "hello"]);

        controller().run(&session, &mut ui).await;

        assert_eq!(ui.lines(Speaker::User), ["hello"]);
        assert_eq!(session.turn_count(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn quit_stops_reading() {
        let session = session();
        let mut ui = ScriptedUi::new(&["one", "/quit", "never sent"]);

        controller().run(&session, &mut ui).await;

        assert_eq!(ui.lines(Speaker::User), ["one"]);
        assert_eq!(ui.inputs.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn help_is_a_notice() {
        let session = session();
        let mut ui = ScriptedUi::new(&["/help"]);

        controller().run(&session, &mut ui).await;

        assert!(ui.lines(Speaker::Notice).contains(&HELP));
        assert_eq!(session.turn_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn save_with_path_skips_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.txt");
        let session = session();
        let save = format!("/save {}", path.display());
        let mut ui = ScriptedUi::new(&["hi", save.as_str()]);

        controller().run(&session, &mut ui).await;

        assert!(ui.save_prompts.is_empty());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("You: hi\n"));
        assert!(text.contains("Chatbot: ok: hi\n"));
        assert!(ui
            .lines(Speaker::Notice)
            .iter()
            .any(|n| n.starts_with("Conversation saved to")));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn save_prompts_with_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picked.txt");
        let session = session();
        let mut ui = ScriptedUi::new(&["hi", "/save"]);
        ui.save_answer = Some(path.clone());

        controller().run(&session, &mut ui).await;

        assert_eq!(ui.save_prompts, ["conversation.txt"]);
        assert!(path.exists());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn cancelled_save_writes_nothing() {
        let session = session();
        let mut ui = ScriptedUi::new(&["/save"]);

        controller().run(&session, &mut ui).await;

        assert_eq!(ui.lines(Speaker::Notice).last(), Some(&"Save cancelled."));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_save_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chat.txt");
        let session = session();
        let save = format!("/save {}", path.display());
        let mut ui = ScriptedUi::new(&[save.as_str()]);

        controller().run(&session, &mut ui).await;

        let last = ui.lines(Speaker::Notice).last().copied().unwrap();
        assert!(last.starts_with("Could not save the conversation"));
        assert!(!path.exists());
    }
}
