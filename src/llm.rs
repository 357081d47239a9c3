//! Text/JSON generation contract
//!
//! Planner and verifier depend on this trait rather than on a concrete
//! backend, so the Gemini client can be swapped for a fake in tests.

use crate::error::OrchestrationError;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

const JSON_ONLY_INSTRUCTION: &str =
    "Return your response as valid JSON only, no additional text.";

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate free text for a prompt, with an optional system instruction
    async fn generate_text(&self, prompt: &str, system_instruction: Option<&str>)
        -> Result<String>;

    /// Generate a JSON value. The reply may be wrapped in a fenced code block.
    async fn generate_json(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<Value> {
        let prompt = format!("{}\n\n{}", prompt, JSON_ONLY_INSTRUCTION);
        let raw = self.generate_text(&prompt, system_instruction).await?;
        parse_json_response(&raw)
    }
}

/// Strip a surrounding ``` / ```json fence and surrounding whitespace
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let body = body
        .strip_prefix("json")
        .or_else(|| body.strip_prefix("JSON"))
        .unwrap_or(body);

    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse an LLM reply as JSON.
///
/// Tries the fence-stripped text first, then the outermost `{ ... }` slice.
pub fn parse_json_response(raw: &str) -> Result<Value> {
    let cleaned = strip_code_fence(raw);

    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => Ok(value),
        Err(first_error) => {
            let embedded = match (cleaned.find('{'), cleaned.rfind('}')) {
                (Some(start), Some(end)) if start < end => {
                    serde_json::from_str::<Value>(&cleaned[start..=end]).ok()
                }
                _ => None,
            };

            embedded.ok_or_else(|| {
                OrchestrationError::LlmError(format!(
                    "Failed to parse JSON response: {} | raw={}",
                    first_error, raw
                ))
            })
        }
    }
}
