//! Planner trait and implementations
//!
//! The Planner uses the LLM to decide which lookups a task needs.

use crate::models::PlanOutcome;
use async_trait::async_trait;

pub mod llm;
pub use llm::LlmPlanner;

/// Trait for plan generation (LLM controlled)
#[async_trait]
pub trait Planner: Send + Sync {
    /// Create a plan for a task. Never fails: a failed attempt is reported
    /// through `PlanOutcome::success` with a plan that runs nothing.
    async fn create_plan(&self, task: &str) -> PlanOutcome;
}
