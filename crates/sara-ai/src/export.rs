//! Human-readable transcript rendering.
//!
//! ```text
//! SaraSuS - Conversation History
//! ========================================
//! You: hi
//!
//! Chatbot: Hello!
//!
//! ========================================
//! End of conversation.
//! ```

use std::path::PathBuf;

use crate::{Message, Role};

pub const EXPORT_HEADER: &str = "SaraSuS - Conversation History";
pub const EXPORT_FOOTER: &str = "End of conversation.";
pub const USER_PREFIX: &str = "You: ";
pub const ASSISTANT_PREFIX: &str = "Chatbot: ";

const RULE_WIDTH: usize = 40;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write transcript to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed transcript: {0}")]
    Malformed(String),
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Render messages in the export format. System messages are skipped.
pub fn render_transcript(messages: &[Message]) -> String {
    let mut out = String::new();
    out.push_str(EXPORT_HEADER);
    out.push('\n');
    out.push_str(&rule());
    out.push('\n');

    for message in messages {
        let prefix = match message.role() {
            Role::User => USER_PREFIX,
            Role::Assistant => ASSISTANT_PREFIX,
            Role::System => continue,
        };
        out.push_str(prefix);
        out.push_str(message.content());
        out.push_str("\n\n");
    }

    out.push_str(&rule());
    out.push('\n');
    out.push_str(EXPORT_FOOTER);
    out.push('\n');
    out
}

/// Read an exported transcript back into messages.
///
/// Lines that do not start a new entry belong to the entry above them,
/// so multi-line contents survive. The closing rule is taken from the end
/// of the file, so a content line made of `=` signs is still content. A
/// content line that itself begins with `You: ` or `Chatbot: ` cannot be
/// told apart from a new entry.
pub fn parse_transcript(text: &str) -> Result<Vec<Message>, ExportError> {
    let rule = rule();
    let lines: Vec<&str> = text.lines().collect();

    if lines.first() != Some(&EXPORT_HEADER) {
        return Err(ExportError::Malformed("missing header".into()));
    }
    if lines.get(1) != Some(&rule.as_str()) {
        return Err(ExportError::Malformed("missing opening rule".into()));
    }
    let closing = lines.len().saturating_sub(2);
    if lines.len() < 4
        || lines[closing] != rule
        || lines[closing + 1] != EXPORT_FOOTER
    {
        return Err(ExportError::Malformed("missing footer".into()));
    }
    let body = &lines[2..closing];

    let mut messages = Vec::new();
    let mut current: Option<(Role, Vec<&str>)> = None;
    for &line in body {
        let started = if let Some(rest) = line.strip_prefix(USER_PREFIX) {
            Some((Role::User, rest))
        } else {
            line.strip_prefix(ASSISTANT_PREFIX)
                .map(|rest| (Role::Assistant, rest))
        };

        if let Some((role, rest)) = started {
            if let Some(done) = current.take() {
                messages.push(finish_entry(done));
            }
            current = Some((role, vec![rest]));
        } else if let Some((_, content)) = current.as_mut() {
            content.push(line);
        } else if !line.is_empty() {
            return Err(ExportError::Malformed(format!(
                "line outside any entry: {line:?}"
            )));
        }
    }
    if let Some(done) = current.take() {
        messages.push(finish_entry(done));
    }

    Ok(messages)
}

/// Each entry is followed by exactly one blank separator line.
fn finish_entry((role, mut lines): (Role, Vec<&str>)) -> Message {
    if lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }
    Message::new(role, lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_exact_format() {
        let messages = [Message::user("hi"), Message::assistant("Hello!")];
        let expected = format!(
            "SaraSuS - Conversation History\n{r}\nYou: hi\n\nChatbot: Hello!\n\n{r}\nEnd of conversation.\n",
            r = "=".repeat(40)
        );
        assert_eq!(render_transcript(&messages), expected);
    }

    #[test]
    fn system_messages_are_not_rendered() {
        let messages = [Message::system("secret persona"), Message::user("hi")];
        let out = render_transcript(&messages);
        assert!(!out.contains("secret persona"));
        assert!(out.contains("You: hi\n\n"));
    }

    #[test]
    fn empty_transcript_has_header_and_footer() {
        let out = render_transcript(&[]);
        assert!(out.starts_with(EXPORT_HEADER));
        assert!(out.trim_end().ends_with(EXPORT_FOOTER));
        assert!(parse_transcript(&out).unwrap().is_empty());
    }

    #[test]
    fn parse_reads_back_rendered_conversation() {
        let messages = vec![
            Message::user("I has a apple"),
            Message::assistant("You have an apple! What kind is it?"),
            Message::user("first line\nsecond line\n\nafter a gap"),
            Message::assistant("Nice."),
        ];
        let parsed = parse_transcript(&render_transcript(&messages)).unwrap();
        assert_eq!(parsed, messages);
    }

    #[test]
    fn rule_lines_inside_content_survive() {
        let rule = "=".repeat(40);
        let messages = vec![
            Message::user(format!("Is this a heading?\n{rule}")),
            Message::assistant(rule.clone()),
            Message::user("ok"),
        ];
        let parsed = parse_transcript(&render_transcript(&messages)).unwrap();
        assert_eq!(parsed, messages);
    }

    #[test]
    fn parse_rejects_text_after_footer() {
        let text = format!("{}trailing\n", render_transcript(&[Message::user("hi")]));
        assert!(matches!(
            parse_transcript(&text),
            Err(ExportError::Malformed(_))
        ));
    }

    #[test]
    fn parse_rejects_missing_header() {
        let err = parse_transcript("You: hi\n").unwrap_err();
        assert!(matches!(err, ExportError::Malformed(_)));
    }

    #[test]
    fn parse_rejects_truncated_file() {
        let full = render_transcript(&[Message::user("hi")]);
        let truncated = &full[..full.len() - EXPORT_FOOTER.len() - 1];
        assert!(parse_transcript(truncated).is_err());
    }
}
