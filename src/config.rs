//! Runtime configuration read from the process environment

use crate::error::OrchestrationError;
use crate::Result;
use std::env;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_NEWS_FEED_URL: &str = "https://news.google.com/rss/search";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout: Duration,
    pub port: u16,
    /// Bound applied to every weather and news request
    pub http_timeout: Duration,
    pub geocoding_url: String,
    pub forecast_url: String,
    pub news_feed_url: String,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// `GEMINI_API_KEY` is mandatory; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                OrchestrationError::ConfigError(
                    "GEMINI_API_KEY not found in environment variables".to_string(),
                )
            })?;

        let port = match env::var("PORT").or_else(|_| env::var("API_PORT")) {
            Ok(raw) => raw.parse().map_err(|_| {
                OrchestrationError::ConfigError(format!("Invalid port: {}", raw))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            gemini_api_key,
            gemini_model: var_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_base_url: var_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            gemini_timeout: secs_var("GEMINI_TIMEOUT_SECS", DEFAULT_GEMINI_TIMEOUT_SECS)?,
            port,
            http_timeout: secs_var("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
            geocoding_url: var_or("GEOCODING_URL", DEFAULT_GEOCODING_URL),
            forecast_url: var_or("FORECAST_URL", DEFAULT_FORECAST_URL),
            news_feed_url: var_or("NEWS_FEED_URL", DEFAULT_NEWS_FEED_URL),
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|| default.to_string())
}

fn secs_var(name: &str, default: u64) -> Result<Duration> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| OrchestrationError::ConfigError(format!("Invalid {}: {}", name, raw))),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}
