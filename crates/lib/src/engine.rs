//! # Question-answering delegates
//!
//! Two delegate styles sit between a question and the vendor model:
//!
//! - [`ToolAgent`]: the asynchronous style. It asks the model for a JSON
//!   object with an `output` field and parses the completion into an
//!   [`AgentOutcome`].
//! - [`QueryEngine`]: the synchronous style. It performs a single blocking
//!   round trip and hands back an [`EngineResponse`] whose `Display` is the
//!   model's answer text. Callers on an async runtime must run
//!   [`QueryEngine::query`] on the blocking pool.
//!
//! Both delegates are bound at construction to one rendered frame and share
//! the fixed analyst instruction preamble.

use crate::constants::ANALYST_INSTRUCTION;
use crate::errors::ChatError;
use crate::frame::TabularFrame;
use crate::providers::llm::LlmClient;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Structured result of a [`ToolAgent`] invocation.
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub output: Option<String>,
}

/// Result of a [`QueryEngine`] query; its string form is the answer.
#[derive(Debug, Clone)]
pub struct EngineResponse(String);

impl fmt::Display for EngineResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn build_user_prompt(schema: &str, table: &str, question: &str) -> String {
    format!("# Table schema\n{schema}\n\n# Table data\n{table}\n# Question\n{question}")
}

// --- Tool agent ---

/// The asynchronous delegate.
#[derive(Debug, Clone)]
pub struct ToolAgent {
    llm: Box<dyn LlmClient>,
    schema: String,
    table: String,
}

impl ToolAgent {
    pub fn new(llm: Box<dyn LlmClient>, frame: &TabularFrame) -> Self {
        Self {
            llm,
            schema: frame.schema_summary(),
            table: frame.render_for_prompt(),
        }
    }

    /// Sends the question to the model and parses the structured outcome.
    pub async fn invoke(&self, question: &str) -> Result<AgentOutcome, ChatError> {
        let system_prompt = format!(
            "{ANALYST_INSTRUCTION} Respond with a single JSON object of the form {{\"output\": \"<your answer>\"}} and nothing else."
        );
        let user_prompt = build_user_prompt(&self.schema, &self.table, question);

        let raw = self.llm.complete(&system_prompt, &user_prompt).await?;
        debug!("<-- Raw agent completion: {raw}");

        Ok(parse_outcome(&raw)?)
    }
}

/// Parses a completion into an [`AgentOutcome`].
///
/// Models often wrap JSON in markdown fences, so those are stripped first.
/// A JSON object yields its `output` field (absent field stays `None`); a
/// completion that is not a JSON object is treated as the answer itself.
fn parse_outcome(raw: &str) -> Result<AgentOutcome, ChatError> {
    let re = Regex::new(r"```(?:json)?\n?([\s\S]*?)```")?;
    let body = re
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| raw.trim().to_string());

    let output = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => map.get("output").map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }),
        _ if body.is_empty() => None,
        _ => Some(body),
    };

    Ok(AgentOutcome { output })
}

// --- Query engine ---

/// The synchronous delegate.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    llm: Box<dyn LlmClient>,
    schema: String,
    table: String,
}

impl QueryEngine {
    pub fn new(llm: Box<dyn LlmClient>, frame: &TabularFrame) -> Self {
        Self {
            llm,
            schema: frame.schema_summary(),
            table: frame.render_for_prompt(),
        }
    }

    /// Performs one blocking round trip to the model.
    ///
    /// Blocking call; run it via `tokio::task::spawn_blocking` from async
    /// contexts.
    pub fn query(&self, question: &str) -> Result<EngineResponse, ChatError> {
        let user_prompt = build_user_prompt(&self.schema, &self.table, question);
        let answer = self
            .llm
            .complete_blocking(ANALYST_INSTRUCTION, &user_prompt)?;
        Ok(EngineResponse(answer.trim().to_string()))
    }
}
