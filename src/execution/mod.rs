//! Execution engine
//!
//! Runs the lookups a plan asks for. Each lookup is isolated: a failure is
//! recorded in `errors` and never prevents the other lookup from running.
//! LLM is NOT allowed here.

use crate::models::{ExecutionResult, NewsRecord, Plan, ToolKind, WeatherRecord};
use crate::tools::Tool;
use crate::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

pub type WeatherLookup = Arc<dyn Tool<Record = WeatherRecord>>;
pub type NewsLookup = Arc<dyn Tool<Record = NewsRecord>>;

pub struct ExecutionEngine {
    weather: WeatherLookup,
    news: NewsLookup,
}

impl ExecutionEngine {
    pub fn new(weather: WeatherLookup, news: NewsLookup) -> Self {
        Self { weather, news }
    }

    /// Execute every tool the plan names.
    ///
    /// Both lookups are dispatched concurrently; outcomes are recorded
    /// weather first so `errors` ordering is stable.
    pub async fn execute_plan(&self, plan: &Plan) -> ExecutionResult {
        let mut results = ExecutionResult::default();

        debug!(tools = ?plan.tools_needed, "Starting plan execution");

        let (weather, news) = tokio::join!(
            invoke(self.weather.as_ref(), plan),
            invoke(self.news.as_ref(), plan),
        );

        results.weather_data = record_outcome(ToolKind::Weather, weather, &mut results.errors);
        results.news_data = record_outcome(ToolKind::News, news, &mut results.errors);

        debug!(
            weather = results.weather_data.is_some(),
            news = results.news_data.is_some(),
            error_count = results.errors.len(),
            "Plan execution completed"
        );

        results
    }
}

/// Run `tool` if the plan requires it. `None` means not requested.
async fn invoke<R: Send>(tool: &dyn Tool<Record = R>, plan: &Plan) -> Option<Result<R>> {
    if !plan.requires(tool.kind()) {
        return None;
    }

    let start = Instant::now();
    let outcome = tool.lookup(&plan.parameters).await;

    debug!(
        tool = %tool.kind(),
        ok = outcome.is_ok(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Tool finished"
    );

    Some(outcome)
}

fn record_outcome<R>(
    kind: ToolKind,
    outcome: Option<Result<R>>,
    errors: &mut Vec<String>,
) -> Option<R> {
    match outcome? {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(tool = %kind, error = %e, "Tool execution failed");
            errors.push(format!("{}: {}", kind.failure_label(), e));
            None
        }
    }
}
