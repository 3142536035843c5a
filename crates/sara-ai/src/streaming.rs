//! Server-Sent Events (SSE) streaming parser.
//!
//! llama.cpp and OpenAI-compatible servers stream completions as SSE
//! `data:` lines terminated by `data: [DONE]`. `SseParser` is the pure
//! line-level state machine; `parse_sse_stream` drives it from a reqwest
//! response body.

use futures_util::StreamExt;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use crate::BackendError;

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// The `event:` field, if the server sent one.
    pub event: Option<String>,
    /// The event data (usually a JSON string).
    pub data: String,
}

/// Incremental SSE line parser.
#[derive(Debug, Default)]
pub struct SseParser {
    current_event: Option<String>,
    current_data: String,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line (without its newline). Returns an event when a blank
    /// line completes one.
    pub fn feed_line(&mut self, line: &str) -> Option<SseEvent> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            let event = self.current_event.take();
            if self.current_data.is_empty() {
                return None;
            }
            return Some(SseEvent {
                event,
                data: std::mem::take(&mut self.current_data),
            });
        }

        if let Some(event_type) = field_value(line, "event") {
            self.current_event = Some(event_type.to_string());
        } else if let Some(data) = field_value(line, "data") {
            if !self.current_data.is_empty() {
                self.current_data.push('\n');
            }
            self.current_data.push_str(data);
        }
        // id:, retry: and `:` comments carry nothing we use.
        None
    }

    /// Flush an event left open when the stream ended without a blank line.
    pub fn finish(self) -> Option<SseEvent> {
        if self.current_data.is_empty() {
            None
        } else {
            Some(SseEvent {
                event: self.current_event,
                data: self.current_data,
            })
        }
    }
}

fn field_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?.strip_prefix(':')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// Parse an SSE stream from a reqwest response, calling `on_event` for each event.
pub async fn parse_sse_stream(
    response: reqwest::Response,
    mut on_event: impl FnMut(SseEvent),
) -> Result<(), BackendError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    let mut lines = reader.lines();
    let mut parser = SseParser::new();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| BackendError::Network(e.to_string()))?
    {
        if let Some(event) = parser.feed_line(&line) {
            on_event(event);
        }
    }

    if let Some(event) = parser.finish() {
        on_event(event);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<SseEvent> {
        let mut parser = SseParser::new();
        let mut events: Vec<SseEvent> = input.lines().filter_map(|l| parser.feed_line(l)).collect();
        events.extend(parser.finish());
        events
    }

    #[test]
    fn parses_data_only_events() {
        let events = collect("data: {\"a\":1}\n\ndata: [DONE]\n\n");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].data, "{\"a\":1}");
        assert_eq!(events[0].event, None);
        assert_eq!(events[1].data, "[DONE]");
    }

    #[test]
    fn joins_multi_line_data() {
        let events = collect("event: message\ndata: one\ndata: two\n\n");
        assert_eq!(
            events,
            vec![SseEvent {
                event: Some("message".into()),
                data: "one\ntwo".into(),
            }]
        );
    }

    #[test]
    fn ignores_comments_and_crlf() {
        let events = collect(": keep-alive\r\ndata:{\"x\":true}\r\n\r\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "{\"x\":true}");
    }

    #[test]
    fn flushes_unterminated_event() {
        let events = collect("data: tail");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "tail");
    }

    #[test]
    fn blank_lines_alone_produce_nothing() {
        assert!(collect("\n\n\n").is_empty());
    }
}
