/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. Workflow
/// credentials are loaded separately by
/// [`LangflowConfig`](sociallens_langflow::config::LangflowConfig) so that
/// their absence never stops the server from starting.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`). Flow runs are slow.
    pub request_timeout_secs: u64,
    /// Generate mock engagement data at startup when the store is empty.
    pub seed_on_start: bool,
    /// Number of records generated by seeding (default: `60`).
    pub seed_record_count: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                       |
    /// | `SEED_ON_START`        | `true`                     |
    /// | `SEED_RECORD_COUNT`    | `60`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let seed_on_start = std::env::var("SEED_ON_START")
            .map(|v| parse_bool(&v).expect("SEED_ON_START must be true or false"))
            .unwrap_or(true);

        let seed_record_count: usize = std::env::var("SEED_RECORD_COUNT")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("SEED_RECORD_COUNT must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            seed_on_start,
            seed_record_count,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
