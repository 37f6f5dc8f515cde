//! # Provider/engine adapter
//!
//! [`TableChat`] is the one object the UI shell talks to. It is built once
//! per (provider, engine style, frame, key) binding via [`TableChatBuilder`]
//! and owns exactly one vendor client wrapped in exactly one delegate.
//! Construction validates the configuration and performs no network calls.
//! [`TableChat::answer`] never fails: every delegate error is converted to
//! the fixed fallback answer.

use crate::constants::{
    FALLBACK_ANSWER, GEMINI_API_URL, GEMINI_MODEL, NO_OUTPUT_ANSWER, OPENAI_API_URL, OPENAI_MODEL,
};
use crate::engine::{QueryEngine, ToolAgent};
use crate::errors::ChatError;
use crate::frame::TabularFrame;
use crate::providers::llm::{gemini::GeminiClient, openai::OpenAiClient, LlmClient};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, info};

/// The vendor whose hosted model answers the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "OPENAI")]
    OpenAi,
    #[serde(rename = "GEMINI")]
    Gemini,
}

impl Provider {
    /// The fixed model identifier bound to this vendor.
    pub fn model(&self) -> &'static str {
        match self {
            Provider::OpenAi => OPENAI_MODEL,
            Provider::Gemini => GEMINI_MODEL,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "OPENAI"),
            Provider::Gemini => write!(f, "GEMINI"),
        }
    }
}

impl FromStr for Provider {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OPENAI" => Ok(Provider::OpenAi),
            "GEMINI" => Ok(Provider::Gemini),
            other => Err(ChatError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// The delegate style mediating between the question and the vendor model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineStyle {
    /// Asynchronous invocation with a structured `output` outcome.
    ToolAgent,
    /// Synchronous single-shot query, stringified via `Display`.
    QueryEngine,
}

impl fmt::Display for EngineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineStyle::ToolAgent => write!(f, "tool-agent"),
            EngineStyle::QueryEngine => write!(f, "query-engine"),
        }
    }
}

impl FromStr for EngineStyle {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tool-agent" => Ok(EngineStyle::ToolAgent),
            "query-engine" => Ok(EngineStyle::QueryEngine),
            other => Err(ChatError::UnsupportedEngine(other.to_string())),
        }
    }
}

/// The one delegate a `TableChat` owns.
#[derive(Debug, Clone)]
enum Delegate {
    Agent(ToolAgent),
    Engine(Arc<QueryEngine>),
}

/// A chat adapter bound to one (provider, engine style, frame) triple.
#[derive(Debug, Clone)]
pub struct TableChat {
    provider: Provider,
    engine: EngineStyle,
    delegate: Delegate,
}

impl TableChat {
    pub fn builder() -> TableChatBuilder {
        TableChatBuilder::default()
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn engine(&self) -> EngineStyle {
        self.engine
    }

    /// Answers a question about the bound frame.
    ///
    /// Never fails: the engine style alone selects the invocation path, the
    /// heterogeneous delegate results are normalized to a plain string, and
    /// any delegate error is logged and replaced by the fixed fallback
    /// answer. No retries are performed.
    pub async fn answer(&self, question: &str) -> String {
        info!("Received question: {question}");
        let result = match &self.delegate {
            Delegate::Agent(agent) => agent
                .invoke(question)
                .await
                .map(|outcome| outcome.output.unwrap_or_else(|| NO_OUTPUT_ANSWER.to_string())),
            Delegate::Engine(engine) => {
                let engine = Arc::clone(engine);
                let question = question.to_string();
                tokio::task::spawn_blocking(move || engine.query(&question))
                    .await
                    .map_err(ChatError::from)
                    .and_then(|res| res.map(|response| response.to_string()))
            }
        };

        match result {
            Ok(answer) => {
                debug!("Response: {answer}");
                answer
            }
            Err(e) => {
                error!("Delegate call failed: {e}");
                FALLBACK_ANSWER.to_string()
            }
        }
    }
}

/// A builder for creating [`TableChat`] instances.
#[derive(Default)]
pub struct TableChatBuilder {
    api_key: String,
    frame: Option<Arc<TabularFrame>>,
    provider: Option<Provider>,
    engine: Option<EngineStyle>,
    openai_api_url: Option<String>,
    gemini_api_url: Option<String>,
    llm_client: Option<Box<dyn LlmClient>>,
}

impl TableChatBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key for the selected provider.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Sets the frame the adapter is bound to.
    pub fn frame(mut self, frame: Arc<TabularFrame>) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn engine(mut self, engine: EngineStyle) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Overrides the OpenAI endpoint URL (used by tests).
    pub fn openai_api_url(mut self, url: impl Into<String>) -> Self {
        self.openai_api_url = Some(url.into());
        self
    }

    /// Overrides the Gemini endpoint URL (used by tests).
    pub fn gemini_api_url(mut self, url: impl Into<String>) -> Self {
        self.gemini_api_url = Some(url.into());
        self
    }

    /// Injects a pre-built client instead of constructing a vendor one.
    pub fn llm_client(mut self, client: Box<dyn LlmClient>) -> Self {
        self.llm_client = Some(client);
        self
    }

    /// Builds the `TableChat`.
    ///
    /// Fails when the frame is missing, or when no client was injected and
    /// the API key is empty. No network calls are made here.
    pub fn build(self) -> Result<TableChat, ChatError> {
        let frame = self.frame.ok_or(ChatError::NoDataset)?;
        let provider = self.provider.unwrap_or(Provider::Gemini);
        let engine = self.engine.unwrap_or(EngineStyle::QueryEngine);

        let llm: Box<dyn LlmClient> = match self.llm_client {
            Some(client) => client,
            None => {
                if self.api_key.trim().is_empty() {
                    return Err(ChatError::MissingApiKey);
                }
                match provider {
                    Provider::OpenAi => Box::new(OpenAiClient::new(
                        self.openai_api_url
                            .unwrap_or_else(|| OPENAI_API_URL.to_string()),
                        self.api_key,
                        provider.model().to_string(),
                    )?),
                    Provider::Gemini => Box::new(GeminiClient::new(
                        self.gemini_api_url
                            .unwrap_or_else(|| GEMINI_API_URL.to_string()),
                        self.api_key,
                    )?),
                }
            }
        };

        let delegate = match engine {
            EngineStyle::ToolAgent => Delegate::Agent(ToolAgent::new(llm, &frame)),
            EngineStyle::QueryEngine => Delegate::Engine(Arc::new(QueryEngine::new(llm, &frame))),
        };

        Ok(TableChat {
            provider,
            engine,
            delegate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing_is_case_insensitive() {
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!(" GEMINI ".parse::<Provider>().unwrap(), Provider::Gemini);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let err = "ANTHROPIC".parse::<Provider>().unwrap_err();
        assert!(matches!(err, ChatError::UnsupportedProvider(_)));
    }

    #[test]
    fn test_unknown_engine_is_rejected() {
        let err = "agentic-mesh".parse::<EngineStyle>().unwrap_err();
        assert!(matches!(err, ChatError::UnsupportedEngine(_)));
    }

    #[test]
    fn test_enum_round_trip_through_display() {
        for provider in [Provider::OpenAi, Provider::Gemini] {
            assert_eq!(provider.to_string().parse::<Provider>().unwrap(), provider);
        }
        for engine in [EngineStyle::ToolAgent, EngineStyle::QueryEngine] {
            assert_eq!(engine.to_string().parse::<EngineStyle>().unwrap(), engine);
        }
    }
}
