//! REST API client for the hosted flow's `run` endpoint.
//!
//! Wraps `POST /lf/{langflow_id}/api/v1/run/{flow_id}` using [`reqwest`].
//! There is no retry; failures are returned to the caller as-is.

use serde::Serialize;

use crate::config::LangflowConfig;

/// HTTP client for a single hosted flow.
pub struct LangflowApi {
    client: reqwest::Client,
    config: LangflowConfig,
}

/// Request body accepted by the `run` endpoint.
#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    input_value: &'a str,
    output_type: &'static str,
    input_type: &'static str,
    tweaks: &'a serde_json::Value,
}

/// Errors from the flow REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum LangflowApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The flow returned a non-2xx status code.
    #[error("Langflow API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("Malformed Langflow response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LangflowApi {
    /// Create a new API client for a hosted flow.
    pub fn new(config: LangflowConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful to share a connection pool or set a timeout).
    pub fn with_client(client: reqwest::Client, config: LangflowConfig) -> Self {
        Self { client, config }
    }

    /// Run the flow with a chat message.
    ///
    /// Returns the raw run response; use
    /// [`extract_message`](crate::response::extract_message) to pull out the
    /// answer text.
    pub async fn run_flow(&self, message: &str) -> Result<serde_json::Value, LangflowApiError> {
        let body = RunRequest {
            input_value: message,
            output_type: "chat",
            input_type: "chat",
            tweaks: &self.config.tweaks,
        };

        tracing::debug!(flow_id = %self.config.flow_id, "Running Langflow flow");

        let response = self
            .client
            .post(self.config.run_url())
            .bearer_auth(&self.config.application_token)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`LangflowApiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, LangflowApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LangflowApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body.
    async fn parse_response(
        response: reqwest::Response,
    ) -> Result<serde_json::Value, LangflowApiError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
