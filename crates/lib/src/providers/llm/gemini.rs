use crate::{errors::ChatError, providers::llm::LlmClient};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

// --- Gemini-specific request and response structures ---

#[derive(Serialize)]
struct GeminiRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Deserialize, Debug)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize, Debug)]
struct PartResponse {
    text: String,
}

fn build_request(system_prompt: &str, user_prompt: &str) -> GeminiRequest {
    GeminiRequest {
        system_instruction: Content {
            parts: vec![Part {
                text: system_prompt.to_string(),
            }],
        },
        contents: vec![Content {
            parts: vec![Part {
                text: user_prompt.to_string(),
            }],
        }],
    }
}

fn extract_text(response: GeminiResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.clone())
        .unwrap_or_default()
}

// --- Gemini client implementation ---

/// A client for the Google Gemini generateContent API.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Creates a new `GeminiClient`.
    pub fn new(api_url: String, api_key: String) -> Result<Self, ChatError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(ChatError::ClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ChatError> {
        let request_body = build_request(system_prompt, user_prompt);

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(ChatError::DelegateRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChatError::DelegateStatus(error_text));
        }

        let gemini_response: GeminiResponse =
            response.json().await.map_err(ChatError::DelegateBody)?;

        Ok(extract_text(gemini_response))
    }

    fn complete_blocking(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ChatError> {
        let request_body = build_request(system_prompt, user_prompt);

        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(ChatError::ClientBuild)?;
        let response = client
            .post(&self.api_url)
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .map_err(ChatError::DelegateRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().unwrap_or_default();
            return Err(ChatError::DelegateStatus(error_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response.text().map_err(ChatError::DelegateRequest)?)?;

        Ok(extract_text(gemini_response))
    }
}
