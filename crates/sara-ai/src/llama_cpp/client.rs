//! llama.cpp backend struct, request building, and response parsing.

use std::sync::{Mutex, PoisonError};

use serde_json::{json, Value};

use crate::{BackendError, Message, TokenTracker, TokenUsage};

use super::config::LlamaCppConfig;

/// HTTP backend for a llama.cpp server.
pub struct LlamaCppBackend {
    pub(crate) config: LlamaCppConfig,
    pub(crate) http: reqwest::Client,
    pub(crate) url: String,
    tracker: Mutex<TokenTracker>,
}

impl LlamaCppBackend {
    pub fn new(config: LlamaCppConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BackendError::Unavailable(format!("failed to build HTTP client: {e}")))?;
        let url = config.completions_url();
        Ok(Self {
            config,
            http,
            url,
            tracker: Mutex::new(TokenTracker::new()),
        })
    }

    pub fn config(&self) -> &LlamaCppConfig {
        &self.config
    }

    /// Cumulative token usage reported by the server so far.
    pub fn usage(&self) -> TokenTracker {
        self.tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn record_usage(&self, usage: &TokenUsage) {
        self.tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(usage);
    }

    /// Build the JSON body for `/v1/chat/completions`.
    pub(crate) fn build_request_body(
        &self,
        system_instruction: &str,
        history: &[Message],
        new_message: &str,
        stream: bool,
    ) -> Value {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(json!({ "role": "system", "content": system_instruction }));
        for msg in history {
            messages.push(json!({
                "role": msg.role().as_str(),
                "content": msg.content(),
            }));
        }
        messages.push(json!({ "role": "user", "content": new_message }));

        json!({
            "model": self.config.model,
            "messages": messages,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "top_p": self.config.top_p,
            "stream": stream,
        })
    }

    pub(crate) fn request(&self, body: &Value) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .post(&self.url)
            .header("content-type", "application/json")
            .json(body);
        match self.config.api_key {
            Some(ref key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

/// Pull the reply text and usage out of a non-streaming response.
pub(crate) fn parse_response(json: &Value) -> Result<(String, Option<TokenUsage>), BackendError> {
    let choice = json["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .ok_or_else(|| BackendError::Parse("response has no choices".into()))?;

    let content = normalize_content(&choice["message"]["content"]);
    if content.trim().is_empty() {
        return Err(BackendError::EmptyResponse);
    }

    Ok((content, parse_usage(json)))
}

pub(crate) fn parse_usage(json: &Value) -> Option<TokenUsage> {
    let usage = json.get("usage").filter(|u| u.is_object())?;
    Some(TokenUsage {
        prompt_tokens: usage["prompt_tokens"].as_u64().unwrap_or(0),
        completion_tokens: usage["completion_tokens"].as_u64().unwrap_or(0),
    })
}

/// Message content is either a plain string or an array of typed parts.
pub(crate) fn normalize_content(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| match part {
                Value::String(s) => Some(s.as_str()),
                Value::Object(_) if part["type"] == "text" => part["text"].as_str(),
                _ => None,
            })
            .collect(),
        _ => String::new(),
    }
}

/// Classify a reqwest failure.
pub(crate) fn transport_error(e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout
    } else if e.is_connect() {
        BackendError::Unavailable(e.to_string())
    } else {
        BackendError::Network(e.to_string())
    }
}

/// Turn a non-success status into the matching error.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(BackendError::RateLimited);
    }
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let text = text.chars().take(200).collect::<String>();
        return Err(BackendError::Api(format!("HTTP {status}: {text}")));
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> LlamaCppBackend {
        LlamaCppBackend::new(LlamaCppConfig::default().with_model("test-model")).unwrap()
    }

    #[test]
    fn request_body_orders_system_history_then_new_message() {
        let history = vec![Message::user("hi"), Message::assistant("Hello!")];
        let body = backend().build_request_body("be nice", &history, "how are you", false);

        assert_eq!(body["model"], "test-model");
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["top_p"], 0.75);
        assert_eq!(body["stream"], false);

        let messages = body["messages"].as_array().unwrap();
        let pairs: Vec<(&str, &str)> = messages
            .iter()
            .map(|m| (m["role"].as_str().unwrap(), m["content"].as_str().unwrap()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("system", "be nice"),
                ("user", "hi"),
                ("assistant", "Hello!"),
                ("user", "how are you"),
            ]
        );
    }

    #[test]
    fn parse_plain_string_content() {
        let json = json!({
            "choices": [{ "message": { "role": "assistant", "content": "Hi there" } }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 3 }
        });
        let (content, usage) = parse_response(&json).unwrap();
        assert_eq!(content, "Hi there");
        assert_eq!(
            usage,
            Some(TokenUsage {
                prompt_tokens: 12,
                completion_tokens: 3,
            })
        );
    }

    #[test]
    fn parse_array_content_joins_text_parts() {
        let json = json!({
            "choices": [{ "message": { "content": [
                { "type": "text", "text": "Hello, " },
                { "type": "image_url", "image_url": "ignored" },
                { "type": "text", "text": "friend." }
            ] } }]
        });
        let (content, usage) = parse_response(&json).unwrap();
        assert_eq!(content, "Hello, friend.");
        assert!(usage.is_none());
    }

    #[test]
    fn blank_or_missing_content_is_empty_response() {
        for json in [
            json!({ "choices": [{ "message": { "content": "   " } }] }),
            json!({ "choices": [{ "message": { "content": null } }] }),
            json!({ "choices": [{ "message": {} }] }),
        ] {
            assert!(matches!(parse_response(&json), Err(BackendError::EmptyResponse)));
        }
    }

    #[test]
    fn missing_choices_is_parse_error() {
        assert!(matches!(
            parse_response(&json!({ "choices": [] })),
            Err(BackendError::Parse(_))
        ));
        assert!(matches!(
            parse_response(&json!({ "error": "nope" })),
            Err(BackendError::Parse(_))
        ));
    }

    #[test]
    fn usage_starts_empty() {
        let backend = backend();
        assert_eq!(backend.usage().call_count(), 0);
        backend.record_usage(&TokenUsage {
            prompt_tokens: 5,
            completion_tokens: 7,
        });
        assert_eq!(backend.usage().total_tokens(), 12);
    }
}
