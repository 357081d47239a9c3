//! Common test utilities for integration tests.

use ops_assistant::{
    agent::Orchestrator, execution::ExecutionEngine, gemini::GeminiClient, planner::LlmPlanner,
    tools::{NewsTool, WeatherTool}, verification::Verifier,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Gemini `generateContent` reply carrying `text`.
pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}

/// RSS document with `count` items.
pub fn rss_feed(count: usize) -> String {
    let items: String = (1..=count)
        .map(|i| {
            format!(
                "<item><title>Story {i}</title><link>https://news.example.com/{i}</link>\
                 <pubDate>Tue, 02 Jan 2024 10:00:00 GMT</pubDate>\
                 <source url=\"https://paper.example.com\">Paper {i}</source></item>"
            )
        })
        .collect();
    format!("<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>feed</title>{items}</channel></rss>")
}

/// Orchestrator wired to a single mock server for every outbound call.
pub fn test_orchestrator(server: &MockServer) -> Orchestrator {
    let generator = Arc::new(
        GeminiClient::new("test-key", "test-model", server.uri(), Duration::from_secs(5)).unwrap(),
    );
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let weather = WeatherTool::new(
        client.clone(),
        format!("{}/v1/search", server.uri()),
        format!("{}/v1/forecast", server.uri()),
    );
    let news = NewsTool::new(client, format!("{}/rss/search", server.uri()));

    Orchestrator::new(
        Box::new(LlmPlanner::new(generator.clone())),
        ExecutionEngine::new(Arc::new(weather), Arc::new(news)),
        Verifier::new(generator),
    )
}
