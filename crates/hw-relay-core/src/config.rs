//! Runtime configuration.
//!
//! Secrets come from the environment; everything else has a default that
//! the daemon's CLI can override.

use std::time::Duration;

use crate::error::ConfigError;

/// Status API endpoint polled by default.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Pause between two polls.
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);

pub const API_TOKEN_VAR: &str = "API_TOKEN";
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "CHAT_ID";

/// Relay configuration, built once at startup and passed down explicitly.
#[derive(Clone)]
pub struct Config {
    /// OAuth token for the status API
    pub api_token: String,
    /// Telegram bot token
    pub bot_token: String,
    /// Destination chat
    pub chat_id: String,
    /// Status API endpoint
    pub endpoint: String,
    /// Telegram Bot API base URL
    pub telegram_api_url: String,
    /// Sleep between iterations
    pub retry_period: Duration,
}

impl Config {
    /// Read the required values from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values count as missing. Every missing name
    /// is reported, not just the first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_token = read(API_TOKEN_VAR);
        let bot_token = read(BOT_TOKEN_VAR);
        let chat_id = read(CHAT_ID_VAR);

        match (api_token, bot_token, chat_id) {
            (Some(api_token), Some(bot_token), Some(chat_id)) => {
                Ok(Self::new(api_token, bot_token, chat_id))
            }
            (api_token, bot_token, chat_id) => {
                let names = [
                    (API_TOKEN_VAR, api_token.is_none()),
                    (BOT_TOKEN_VAR, bot_token.is_none()),
                    (CHAT_ID_VAR, chat_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                Err(ConfigError::Missing { names })
            }
        }
    }

    /// Config with the three required values and default endpoints.
    pub fn new(
        api_token: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Config {
            api_token: api_token.into(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            retry_period: DEFAULT_RETRY_PERIOD,
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_telegram_api_url(mut self, url: &str) -> Self {
        self.telegram_api_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry_period(mut self, retry_period: Duration) -> Self {
        self.retry_period = retry_period;
        self
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"<redacted>")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period", &self.retry_period)
            .finish()
    }
}
