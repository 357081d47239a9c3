//! Verification and formatting of the final response
//!
//! Turns execution results into the response returned to the caller.
//! Never fails: summary generation falls back to a fixed sentence.

use crate::llm::TextGenerator;
use crate::models::{ExecutionResult, FinalResponse, Headline, WeatherRecord, MAX_ARTICLES};
use chrono::Utc;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{info, warn};

pub const WEATHER_UNAVAILABLE: &str = "Weather data unavailable";

/// Number of headline titles passed to the summary prompt
const SUMMARY_TITLES: usize = 3;

pub struct Verifier {
    generator: Arc<dyn TextGenerator>,
}

fn or_na<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Measured quantity, always with a fractional part (`31.0`, not `31`)
fn decimal_or_na(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:?}", v))
        .unwrap_or_else(|| "N/A".to_string())
}

/// One-line weather description, or `WEATHER_UNAVAILABLE`
pub fn format_weather(weather: Option<&WeatherRecord>) -> String {
    match weather.and_then(WeatherRecord::report) {
        Some(report) => format!(
            "{}, {}°C, Humidity: {}%, Wind: {} km/h",
            report.description,
            decimal_or_na(report.temperature),
            or_na(report.humidity),
            decimal_or_na(report.windspeed),
        ),
        None => WEATHER_UNAVAILABLE.to_string(),
    }
}

impl Verifier {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn verify_and_format(&self, task: &str, results: &ExecutionResult) -> FinalResponse {
        let weather_data = results.weather_data.as_ref();
        let articles = results
            .news_data
            .as_ref()
            .map(|news| news.articles())
            .unwrap_or_default();

        let city = weather_data
            .map(|w| w.city().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let weather = format_weather(weather_data);

        let top_headlines: Vec<Headline> = articles
            .iter()
            .take(MAX_ARTICLES)
            .map(Headline::from)
            .collect();

        let titles: Vec<&str> = articles
            .iter()
            .take(SUMMARY_TITLES)
            .map(|a| a.title.as_str())
            .collect();

        let summary = self
            .summarize(task, &weather, &titles, weather_data.map(WeatherRecord::city))
            .await;

        info!(
            city = %city,
            headlines = top_headlines.len(),
            error_count = results.errors.len(),
            "Response assembled"
        );

        FinalResponse {
            city,
            weather,
            top_headlines,
            summary,
            timestamp: Utc::now().to_rfc3339(),
            errors: results.errors.clone(),
        }
    }

    async fn summarize(
        &self,
        task: &str,
        weather: &str,
        titles: &[&str],
        city: Option<&str>,
    ) -> String {
        let headlines = if titles.is_empty() {
            "None available".to_string()
        } else {
            titles.join(", ")
        };

        let prompt = format!(
            "Create a brief summary (2-3 sentences) for this task:\n\n\
             Task: {}\n\
             Weather: {}\n\
             Top headlines: {}\n\n\
             Provide a natural language summary.",
            task, weather, headlines
        );

        match self.generator.generate_text(&prompt, None).await {
            Ok(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
            outcome => {
                if let Err(e) = outcome {
                    warn!(error = %e, "Summary generation failed, using fallback");
                }
                fallback_summary(city, titles.len())
            }
        }
    }
}

fn fallback_summary(city: Option<&str>, news_count: usize) -> String {
    format!(
        "Retrieved weather information for {} and {} top news headlines.",
        city.unwrap_or("the location"),
        news_count
    )
}
