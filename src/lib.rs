//! Operations Assistant
//!
//! A small agent pipeline that:
//! - Plans which lookups a natural-language task needs (LLM)
//! - Fetches current weather and news headlines (Open-Meteo, Google News RSS)
//! - Isolates tool failures so partial results still reach the caller
//! - Summarizes the outcome (LLM, with a deterministic fallback)
//!
//! PIPELINE:
//! TASK → PLAN → EXECUTE → VERIFY/FORMAT → RESPONSE

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod execution;
pub mod gemini;
pub mod llm;
pub mod models;
pub mod planner;
pub mod tools;
pub mod verification;

#[cfg(test)]
mod test_support;

pub use error::Result;

// Re-export common types
pub use models::*;
