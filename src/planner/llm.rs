//! LLM-powered planner
//!
//! One JSON generation call per task, normalized into a `Plan`.

use crate::llm::TextGenerator;
use crate::models::{Plan, PlanOutcome, PlanParameters, ToolKind};
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

const PLAN_FORMAT: &str = r#"Return a JSON object with this structure:
{
    "task": "original task",
    "tools_needed": ["tool1", "tool2"],
    "parameters": {
        "city": "extracted city name",
        "news_query": "extracted news query or location"
    },
    "plan_summary": "brief description of execution approach"
}"#;

/// System instruction listing every selectable tool
fn planner_instruction() -> String {
    let tools: String = ToolKind::ALL
        .iter()
        .map(|kind| format!("- {}: {}\n", kind, kind.description()))
        .collect();

    format!(
        "You are a planning agent. Analyze the user's task and create an execution plan.\n\n\
         Available tools:\n{}\n{}",
        tools, PLAN_FORMAT
    )
}

pub struct LlmPlanner {
    generator: Arc<dyn TextGenerator>,
}

/// Plan as written by the model, before normalization
#[derive(Debug, Deserialize)]
struct RawPlan {
    #[serde(default)]
    tools_needed: Vec<String>,
    #[serde(default)]
    parameters: Option<RawParameters>,
    #[serde(default)]
    plan_summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawParameters {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    news_query: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl LlmPlanner {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    fn build_prompt(task: &str) -> String {
        format!("User task: {}\n\nCreate an execution plan.", task)
    }

    async fn plan(&self, task: &str) -> Result<Plan> {
        let response = self
            .generator
            .generate_json(&Self::build_prompt(task), Some(&planner_instruction()))
            .await?;

        parse_plan_response(task, response)
    }
}

#[async_trait]
impl crate::planner::Planner for LlmPlanner {
    async fn create_plan(&self, task: &str) -> PlanOutcome {
        match self.plan(task).await {
            Ok(plan) => {
                info!(
                    tools = ?plan.tools_needed,
                    summary = %plan.plan_summary,
                    "Plan created"
                );
                PlanOutcome::planned(plan)
            }
            Err(e) => {
                warn!(error = %e, "Planning failed");
                PlanOutcome::failed(task, e.to_string())
            }
        }
    }
}

/// Normalize the model's JSON into a `Plan`.
///
/// Unknown tool names are dropped, duplicates removed, blank parameters
/// treated as absent. `task` always comes from the caller.
fn parse_plan_response(task: &str, response: Value) -> Result<Plan> {
    let raw: RawPlan = serde_json::from_value(response)?;

    let mut tools_needed = Vec::with_capacity(ToolKind::ALL.len());
    for name in &raw.tools_needed {
        match ToolKind::parse(name) {
            Some(kind) if !tools_needed.contains(&kind) => tools_needed.push(kind),
            Some(_) => {}
            None => debug!(tool = %name, "Ignoring unknown tool"),
        }
    }

    let parameters = raw.parameters.unwrap_or_default();

    Ok(Plan {
        task: task.to_string(),
        tools_needed,
        parameters: PlanParameters {
            city: non_blank(parameters.city),
            news_query: non_blank(parameters.news_query),
        },
        plan_summary: raw.plan_summary.unwrap_or_default(),
    })
}
