//! Lookup tools
//!
//! Each tool performs one external lookup and returns its record type.
//! The set of tools is closed (`ToolKind`); the executor holds one of each.

use crate::config::AppConfig;
use crate::models::{PlanParameters, ToolKind};
use crate::Result;
use reqwest::Client;
use std::time::Duration;

pub mod news;
pub mod weather;

pub use news::NewsTool;
pub use weather::{describe_weather_code, WeatherTool, WMO_CODES};

/// Capability shared by the weather and news lookups
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    type Record: Send;

    fn kind(&self) -> ToolKind;

    /// Run the lookup using this tool's input from the plan parameters
    async fn lookup(&self, parameters: &PlanParameters) -> Result<Self::Record>;
}

/// HTTP client shared by the lookup tools, bounded by `timeout`
pub(crate) fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .pool_idle_timeout(Duration::from_secs(60))
        .pool_max_idle_per_host(8)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Build both production tools from configuration
pub fn create_default_tools(config: &AppConfig) -> Result<(WeatherTool, NewsTool)> {
    let client = build_http_client(config.http_timeout)?;

    let weather = WeatherTool::new(
        client.clone(),
        config.geocoding_url.clone(),
        config.forecast_url.clone(),
    );
    let news = NewsTool::new(client, config.news_feed_url.clone());

    Ok((weather, news))
}
