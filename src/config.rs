use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Connection settings for the remote budget backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Forwarded as a bearer token when set.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".into(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api: ApiConfig,
    pub preferences_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = ApiConfig::default();
        let api = ApiConfig {
            base_url: env::var("EASY_BUDGET_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            token: env::var("EASY_BUDGET_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            timeout: env::var("EASY_BUDGET_API_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        };

        Self {
            host: env::var("EASY_BUDGET_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("EASY_BUDGET_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(7080),
            api,
            preferences_path: env::var("EASY_BUDGET_PREFERENCES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/preferences.json")),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
