pub mod gemini;
pub mod openai;

use crate::errors::ChatError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a hosted language model.
///
/// This trait defines a common interface for answering a prompt pair with
/// different vendors (OpenAI, Gemini). Each implementation also exposes a
/// blocking variant used by the synchronous query-engine delegate.
#[async_trait]
pub trait LlmClient: Send + Sync + Debug + DynClone {
    /// Generates a completion from a given system and user prompt.
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, ChatError>;

    /// Blocking counterpart of [`LlmClient::complete`].
    ///
    /// Must only be called from a thread that is allowed to block, such as
    /// the tokio blocking pool.
    fn complete_blocking(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, ChatError>;
}

dyn_clone::clone_trait_object!(LlmClient);
