use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::domain::recency::DEFAULT_WINDOW_DAYS;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub recent: RecentConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_store_provider")]
    pub provider: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecentConfig {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_store_provider(),
            base_url: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

impl StoreConfig {
    pub fn memory() -> Self {
        Self {
            provider: "memory".to_string(),
            ..Self::default()
        }
    }

    pub fn http(base_url: impl Into<String>) -> Self {
        Self {
            provider: "http".to_string(),
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("EXPENSES").separator("__"));
        let cfg = builder.build()?;
        let mut config: Config = cfg.try_deserialize()?;

        let base_url_missing = config
            .store
            .base_url
            .as_deref()
            .map_or(true, |url| url.trim().is_empty());

        if config.store.provider == "http" && base_url_missing {
            let base_url = match env::var("EXPENSES__STORE__BASE_URL") {
                Ok(url) if !url.trim().is_empty() => url,
                _ => match env::var("API_URL") {
                    Ok(url) if !url.trim().is_empty() => url,
                    _ => {
                        return Err(config::ConfigError::Message(
                            "Missing store URL. Set EXPENSES__STORE__BASE_URL or API_URL.".into(),
                        ));
                    }
                },
            };

            config.store.base_url = Some(base_url);
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_store_provider() -> String {
    "http".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

#[cfg(test)]
mod tests {
    use super::Config;
    use config::ConfigError;
    use serial_test::serial;
    use std::env;

    fn clear_env_vars() {
        env::remove_var("EXPENSES__STORE__BASE_URL");
        env::remove_var("EXPENSES__STORE__PROVIDER");
        env::remove_var("EXPENSES__RECENT__WINDOW_DAYS");
        env::remove_var("API_URL");
    }

    #[test]
    #[serial]
    fn uses_prefixed_store_url() {
        clear_env_vars();
        env::set_var(
            "EXPENSES__STORE__BASE_URL",
            "https://expenses.example.test/db",
        );

        let config = Config::from_env().expect("expected configuration to load");

        assert_eq!(
            config.store.base_url.as_deref(),
            Some("https://expenses.example.test/db")
        );
        assert_eq!(config.store.provider, "http");
        assert_eq!(config.recent.window_days, 7);

        clear_env_vars();
    }

    #[test]
    #[serial]
    fn falls_back_to_api_url_when_prefixed_missing() {
        clear_env_vars();
        env::set_var("API_URL", "https://fallback.example.test");

        let config = Config::from_env().expect("expected configuration to load");

        assert_eq!(
            config.store.base_url.as_deref(),
            Some("https://fallback.example.test")
        );

        clear_env_vars();
    }

    #[test]
    #[serial]
    fn memory_provider_needs_no_url() {
        clear_env_vars();
        env::set_var("EXPENSES__STORE__PROVIDER", "memory");
        env::set_var("EXPENSES__RECENT__WINDOW_DAYS", "30");

        let config = Config::from_env().expect("expected configuration to load");

        assert_eq!(config.store.provider, "memory");
        assert_eq!(config.store.base_url, None);
        assert_eq!(config.recent.window_days, 30);

        clear_env_vars();
    }

    #[test]
    #[serial]
    fn errors_when_no_store_url_available() {
        clear_env_vars();

        let error = Config::from_env().expect_err("expected configuration to fail");

        match error {
            ConfigError::Message(message) => assert_eq!(
                message,
                "Missing store URL. Set EXPENSES__STORE__BASE_URL or API_URL.".to_string()
            ),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
