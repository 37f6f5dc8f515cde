use crate::{errors::ChatError, providers::llm::LlmClient};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

// --- OpenAI chat-completions request and response structures ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    messages: Vec<ChatMessage>,
    model: &'a str,
    temperature: f32,
    stream: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

fn build_messages(system_prompt: &str, user_prompt: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: system_prompt.to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: user_prompt.to_string(),
        },
    ]
}

fn extract_content(response: ChatCompletionResponse) -> String {
    response
        .choices
        .first()
        .map(|c| c.message.content.clone())
        .unwrap_or_default()
}

// --- OpenAI client implementation ---

/// A client for the OpenAI chat-completions API.
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a new `OpenAiClient`.
    pub fn new(api_url: String, api_key: String, model: String) -> Result<Self, ChatError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(ChatError::ClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ChatError> {
        let request_body = ChatCompletionRequest {
            messages: build_messages(system_prompt, user_prompt),
            model: &self.model,
            temperature: 0.0,
            stream: false,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(ChatError::DelegateRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChatError::DelegateStatus(error_text));
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(ChatError::DelegateBody)?;

        Ok(extract_content(completion))
    }

    fn complete_blocking(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ChatError> {
        let request_body = ChatCompletionRequest {
            messages: build_messages(system_prompt, user_prompt),
            model: &self.model,
            temperature: 0.0,
            stream: false,
        };

        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(ChatError::ClientBuild)?;
        let response = client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .map_err(ChatError::DelegateRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().unwrap_or_default();
            return Err(ChatError::DelegateStatus(error_text));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(
            &response.text().map_err(ChatError::DelegateRequest)?,
        )?;

        Ok(extract_content(completion))
    }
}
