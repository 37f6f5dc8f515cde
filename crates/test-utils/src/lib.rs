//! Shared test doubles for the tablechat workspace.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tablechat::errors::ChatError;
use tablechat::providers::llm::LlmClient;

/// A mock language-model client with pre-programmed responses.
///
/// Responses are keyed by a substring of the user prompt; calls are recorded
/// for assertion. A prompt with no programmed response yields an error,
/// which is how tests exercise the fallback path.
#[derive(Clone, Debug)]
pub struct MockLlmClient {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for any user prompt containing `key`.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded (system, user) prompt pairs.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn lookup(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ChatError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if user_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(ChatError::DelegateStatus(format!(
            "MockLlmClient: no response programmed for user prompt. Got: '{user_prompt}'"
        )))
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ChatError> {
        self.lookup(system_prompt, user_prompt)
    }

    fn complete_blocking(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ChatError> {
        self.lookup(system_prompt, user_prompt)
    }
}
