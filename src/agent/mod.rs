//! Main orchestrator - runs the pipeline for one task
//!
//! INPUT → PLAN → EXECUTE → VERIFY/FORMAT → COMPLETE

use crate::error::OrchestrationError;
use crate::execution::ExecutionEngine;
use crate::models::FinalResponse;
use crate::planner::Planner;
use crate::verification::Verifier;
use crate::Result;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Coordinates planner, executor and verifier. Holds no per-request state.
pub struct Orchestrator {
    planner: Box<dyn Planner>,
    execution_engine: ExecutionEngine,
    verifier: Verifier,
}

impl Orchestrator {
    pub fn new(
        planner: Box<dyn Planner>,
        execution_engine: ExecutionEngine,
        verifier: Verifier,
    ) -> Self {
        Self {
            planner,
            execution_engine,
            verifier,
        }
    }

    /// Process a natural-language task end to end.
    ///
    /// Only a planning failure aborts the request; tool failures are
    /// reported inside the response.
    pub async fn process_task(&self, task: &str) -> Result<FinalResponse> {
        let request_id = Uuid::new_v4();
        let span = info_span!("process_task", %request_id);

        self.run(task).instrument(span).await
    }

    async fn run(&self, task: &str) -> Result<FinalResponse> {
        let start_time = Instant::now();

        info!(task = %task, "Orchestrator: starting");

        // === PLAN ===
        let outcome = self.planner.create_plan(task).await;
        if !outcome.success {
            let reason = outcome
                .error
                .unwrap_or_else(|| "unknown planning error".to_string());
            warn!(error = %reason, "Aborting: no plan");
            return Err(OrchestrationError::PlanningError(reason));
        }
        let plan = outcome.plan;

        debug!(tools = ?plan.tools_needed, "Plan accepted");

        // === EXECUTE ===
        let results = self.execution_engine.execute_plan(&plan).await;

        // === VERIFY/FORMAT ===
        let response = self.verifier.verify_and_format(task, &results).await;

        info!(
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            error_count = response.errors.len(),
            "Orchestrator: complete"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::LlmPlanner;
    use crate::test_support::{weather_report, FakeGenerator, FakeNews, FakeWeather};
    use crate::verification::{format_weather, WEATHER_UNAVAILABLE};
    use crate::models::WeatherRecord;
    use std::sync::Arc;

    const MUMBAI_PLAN: &str = r#"{
        "task": "What's the weather in Mumbai and news about it?",
        "tools_needed": ["weather", "news"],
        "parameters": { "city": "Mumbai" },
        "plan_summary": "Weather and news for Mumbai"
    }"#;

    fn orchestrator(
        plan_reply: FakeGenerator,
        weather: FakeWeather,
        news: FakeNews,
    ) -> Orchestrator {
        Orchestrator::new(
            Box::new(LlmPlanner::new(Arc::new(plan_reply))),
            ExecutionEngine::new(Arc::new(weather), Arc::new(news)),
            Verifier::new(Arc::new(FakeGenerator::replying(
                "Mumbai is partly cloudy with several local stories in the news.",
            ))),
        )
    }

    #[tokio::test]
    async fn test_weather_and_news_scenario() {
        let news = FakeNews::headlines(7);
        let news_calls = news.calls.clone();

        let response = orchestrator(
            FakeGenerator::replying(MUMBAI_PLAN),
            FakeWeather::report(weather_report("Mumbai")),
            news,
        )
        .process_task("What's the weather in Mumbai and news about it?")
        .await
        .unwrap();

        let expected_weather =
            format_weather(Some(&WeatherRecord::Report(weather_report("Mumbai"))));

        assert_eq!(response.city, "Mumbai");
        assert_eq!(response.weather, expected_weather);
        assert!(response.top_headlines.len() <= 5);
        assert!(response.errors.is_empty());
        assert_eq!(*news_calls.lock().unwrap(), vec!["Mumbai".to_string()]);

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_geocoding_miss_scenario() {
        let reply = r#"{"tools_needed": ["weather"], "parameters": {"city": "Zzzzyx"}}"#;

        let response = orchestrator(
            FakeGenerator::replying(reply),
            FakeWeather::unavailable("Zzzzyx"),
            FakeNews::headlines(1),
        )
        .process_task("Weather in Zzzzyx?")
        .await
        .unwrap();

        assert_eq!(response.city, "Zzzzyx");
        assert_eq!(response.weather, WEATHER_UNAVAILABLE);
        assert!(response.errors.is_empty());
    }

    #[tokio::test]
    async fn test_raised_weather_failure_is_reported_not_fatal() {
        let reply = r#"{"tools_needed": ["weather", "news"], "parameters": {"city": "Pune"}}"#;

        let response = orchestrator(
            FakeGenerator::replying(reply),
            FakeWeather::failing("connection refused"),
            FakeNews::headlines(2),
        )
        .process_task("Pune weather and news")
        .await
        .unwrap();

        assert_eq!(response.city, "Unknown");
        assert_eq!(response.weather, WEATHER_UNAVAILABLE);
        assert_eq!(response.top_headlines.len(), 2);
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].starts_with("Weather fetch failed:"));
    }

    #[tokio::test]
    async fn test_planning_failure_aborts_without_execution() {
        let weather = FakeWeather::report(weather_report("Delhi"));
        let weather_calls = weather.calls.clone();

        let result = orchestrator(
            FakeGenerator::failing("model overloaded"),
            weather,
            FakeNews::headlines(1),
        )
        .process_task("Weather in Delhi")
        .await;

        let err = tokio_test::assert_err!(result);
        assert!(matches!(err, OrchestrationError::PlanningError(_)));
        assert!(err.to_string().starts_with("Planning failed:"));
        assert!(err.to_string().contains("model overloaded"));
        assert!(weather_calls.lock().unwrap().is_empty());
    }
}
