//! InferenceBackend implementation for LlamaCppBackend (plain + streaming).

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::streaming::{parse_sse_stream, SseEvent};
use crate::{BackendError, InferenceBackend, Message, TokenUsage};

use super::client::{
    check_status, parse_response, parse_usage, transport_error, LlamaCppBackend,
};

const DONE_MARKER: &str = "[DONE]";

impl LlamaCppBackend {
    async fn complete_once(&self, body: serde_json::Value) -> Result<String, BackendError> {
        let response = self.request(&body).send().await.map_err(transport_error)?;
        let response = check_status(response).await?;

        let json: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout
            } else {
                BackendError::Parse(e.to_string())
            }
        })?;

        let (content, usage) = parse_response(&json)?;
        match usage {
            Some(usage) => self.record_usage(&usage),
            None => debug!("no usage data in response"),
        }
        Ok(content)
    }

    async fn complete_streaming(&self, body: serde_json::Value) -> Result<String, BackendError> {
        let response = self.request(&body).send().await.map_err(transport_error)?;
        let response = check_status(response).await?;

        let mut content = String::new();
        let mut usage: Option<TokenUsage> = None;
        let mut done = false;
        let mut stream_error: Option<String> = None;

        parse_sse_stream(response, |event: SseEvent| {
            if done {
                return;
            }
            if event.data.trim() == DONE_MARKER {
                done = true;
                return;
            }

            let data = match serde_json::from_str::<serde_json::Value>(&event.data) {
                Ok(data) => data,
                Err(e) => {
                    warn!(error = %e, "skipping malformed stream chunk");
                    return;
                }
            };

            if let Some(err) = data.get("error") {
                let message = err["message"].as_str().map(String::from);
                stream_error = Some(message.unwrap_or_else(|| err.to_string()));
                return;
            }

            if let Some(piece) = data["choices"][0]["delta"]["content"].as_str() {
                content.push_str(piece);
            }
            if let Some(u) = parse_usage(&data) {
                usage = Some(u);
            }
        })
        .await?;

        if let Some(message) = stream_error {
            return Err(BackendError::Api(message));
        }
        if !done {
            debug!("stream ended without a [DONE] marker");
        }
        if content.trim().is_empty() {
            return Err(BackendError::EmptyResponse);
        }

        match usage {
            Some(usage) => self.record_usage(&usage),
            None => debug!("no usage data in streaming response"),
        }
        Ok(content)
    }
}

#[async_trait]
impl InferenceBackend for LlamaCppBackend {
    async fn complete(
        &self,
        system_instruction: &str,
        history: &[Message],
        new_message: &str,
    ) -> Result<String, BackendError> {
        let stream = self.config.stream;
        let body = self.build_request_body(system_instruction, history, new_message, stream);

        debug!(
            url = %self.url,
            model = %self.config.model,
            history = history.len(),
            stream,
            "llama.cpp request"
        );

        if stream {
            self.complete_streaming(body).await
        } else {
            self.complete_once(body).await
        }
    }
}
