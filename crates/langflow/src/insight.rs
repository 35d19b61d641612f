//! High-level "ask the flow a question" client.
//!
//! [`InsightClient`] is constructed even when credentials are missing so
//! the server can still start; every request then fails with
//! [`InsightError::Config`] instead of crashing.

use crate::api::{LangflowApi, LangflowApiError};
use crate::config::{ConfigError, LangflowConfig};
use crate::response::extract_message;

/// An answer produced by the flow.
#[derive(Debug, Clone)]
pub struct Insight {
    /// The extracted answer text.
    pub message: String,
    /// The full run response, kept for debugging and API consumers.
    pub raw: serde_json::Value,
}

/// Why an insight could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    /// Credentials are missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The flow call failed.
    #[error("API Error: {0}")]
    Api(#[from] LangflowApiError),

    /// The flow answered, but the response held no message or a blank one.
    #[error("The flow response did not contain a message")]
    EmptyResponse,
}

pub struct InsightClient {
    api: Result<LangflowApi, ConfigError>,
}

impl InsightClient {
    /// Build a client from a configuration load result.
    pub fn new(config: Result<LangflowConfig, ConfigError>, http: reqwest::Client) -> Self {
        Self {
            api: config.map(|c| LangflowApi::with_client(http, c)),
        }
    }

    /// Load credentials from the environment.
    pub fn from_env(http: reqwest::Client) -> Self {
        Self::new(LangflowConfig::from_env(), http)
    }

    /// The configuration problem, if credentials could not be loaded.
    pub fn config_error(&self) -> Option<&ConfigError> {
        self.api.as_ref().err()
    }

    /// Send `message` to the flow and extract the answer.
    pub async fn ask(&self, message: &str) -> Result<Insight, InsightError> {
        let api = self.api.as_ref().map_err(|e| e.clone())?;

        let raw = api.run_flow(message).await.inspect_err(|e| {
            tracing::error!(error = %e, "Langflow run failed");
        })?;

        match extract_message(&raw) {
            Some(message) if !message.trim().is_empty() => Ok(Insight { message, raw }),
            _ => {
                tracing::warn!("Langflow response contained no message");
                Err(InsightError::EmptyResponse)
            }
        }
    }
}
