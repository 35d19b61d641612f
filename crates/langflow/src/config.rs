//! Credentials and endpoint settings for the hosted flow.

use std::fmt;

/// Required environment variables, in the order they are reported.
pub const REQUIRED_VARS: [&str; 4] = ["BASE_API_URL", "LANGFLOW_ID", "FLOW_ID", "APPLICATION_TOKEN"];

/// Optional JSON object of component overrides forwarded with every run.
pub const TWEAKS_VAR: &str = "DEFAULT_TWEAKS";

/// Errors raised while loading [`LangflowConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// One or more required variables are unset or blank.
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    /// `DEFAULT_TWEAKS` is set but is not a JSON object.
    #[error("DEFAULT_TWEAKS must be a JSON object: {0}")]
    InvalidTweaks(String),
}

/// Connection settings for one hosted flow.
#[derive(Clone)]
pub struct LangflowConfig {
    /// e.g. `https://api.langflow.astra.datastax.com`
    pub base_api_url: String,
    pub langflow_id: String,
    pub flow_id: String,
    pub application_token: String,
    /// Always a JSON object.
    pub tweaks: serde_json::Value,
}

impl fmt::Debug for LangflowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LangflowConfig")
            .field("base_api_url", &self.base_api_url)
            .field("langflow_id", &self.langflow_id)
            .field("flow_id", &self.flow_id)
            .field("application_token", &"<redacted>")
            .field("tweaks", &self.tweaks)
            .finish()
    }
}

impl LangflowConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var             | Required | Default |
    /// |---------------------|----------|---------|
    /// | `BASE_API_URL`      | yes      | --      |
    /// | `LANGFLOW_ID`       | yes      | --      |
    /// | `FLOW_ID`           | yes      | --      |
    /// | `APPLICATION_TOKEN` | yes      | --      |
    /// | `DEFAULT_TWEAKS`    | no       | `{}`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Every missing required variable is reported at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let values: Vec<Option<String>> = REQUIRED_VARS.iter().map(|&name| read(name)).collect();
        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let mut values = values.into_iter().flatten();
        let mut next = || values.next().unwrap_or_default();
        let base_api_url = next().trim_end_matches('/').to_string();
        let langflow_id = next();
        let flow_id = next();
        let application_token = next();

        let tweaks = match read(TWEAKS_VAR) {
            None => serde_json::Value::Object(serde_json::Map::new()),
            Some(raw) => parse_tweaks(&raw)?,
        };

        Ok(Self {
            base_api_url,
            langflow_id,
            flow_id,
            application_token,
            tweaks,
        })
    }

    /// Full URL of the flow's run endpoint.
    pub fn run_url(&self) -> String {
        format!(
            "{}/lf/{}/api/v1/run/{}",
            self.base_api_url, self.langflow_id, self.flow_id
        )
    }
}

fn parse_tweaks(raw: &str) -> Result<serde_json::Value, ConfigError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| ConfigError::InvalidTweaks(e.to_string()))?;
    if !value.is_object() {
        return Err(ConfigError::InvalidTweaks(format!(
            "expected an object, got {value}"
        )));
    }
    Ok(value)
}
