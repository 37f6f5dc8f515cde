//! # Dispatch Normalization Tests
//!
//! Exercises `TableChat::answer` with a mock client: the structured
//! tool-agent outcome and the Display-based engine response must both
//! normalize to the same plain string, and every delegate failure must be
//! swallowed into the fixed fallback answer.

use std::sync::Arc;
use tablechat::constants::{FALLBACK_ANSWER, NO_OUTPUT_ANSWER};
use tablechat::{EngineStyle, Provider, TableChat, TabularFrame};
use tablechat_test_utils::MockLlmClient;

fn test_frame() -> Arc<TabularFrame> {
    let csv = "item,price\napple,2\nbanana,1\n";
    Arc::new(TabularFrame::from_bytes(csv.as_bytes()).unwrap())
}

fn chat_with(engine: EngineStyle, client: MockLlmClient) -> TableChat {
    TableChat::builder()
        .frame(test_frame())
        .provider(Provider::OpenAi)
        .engine(engine)
        .llm_client(Box::new(client))
        .build()
        .unwrap()
}

/// A tool-agent completion of `{"output": "42"}` normalizes to `42`.
#[tokio::test]
async fn test_tool_agent_output_field_is_extracted() {
    let client = MockLlmClient::new();
    client.add_response("how many items", r#"{"output": "42"}"#);
    let chat = chat_with(EngineStyle::ToolAgent, client);

    assert_eq!(chat.answer("how many items are there?").await, "42");
}

/// An engine response whose string form is `42` also normalizes to `42`.
#[tokio::test]
async fn test_query_engine_response_is_stringified() {
    let client = MockLlmClient::new();
    client.add_response("how many items", "42");
    let chat = chat_with(EngineStyle::QueryEngine, client);

    assert_eq!(chat.answer("how many items are there?").await, "42");
}

/// A structured outcome without an `output` field falls back to the
/// "I don't know" default rather than an error.
#[tokio::test]
async fn test_tool_agent_missing_output_defaults() {
    let client = MockLlmClient::new();
    client.add_response("total price", r#"{"result": "3"}"#);
    let chat = chat_with(EngineStyle::ToolAgent, client);

    assert_eq!(chat.answer("what is the total price?").await, NO_OUTPUT_ANSWER);
}

/// A failing delegate yields exactly the fallback string on both paths.
#[tokio::test]
async fn test_delegate_failure_becomes_fallback() {
    for engine in [EngineStyle::ToolAgent, EngineStyle::QueryEngine] {
        // No responses programmed, so every call errors.
        let chat = chat_with(engine, MockLlmClient::new());
        assert_eq!(chat.answer("anything at all").await, FALLBACK_ANSWER);
    }
}

/// The prompt sent to the model carries the frame schema and data, so the
/// delegate genuinely answers from the bound dataset.
#[tokio::test]
async fn test_prompt_carries_the_bound_frame() {
    let client = MockLlmClient::new();
    client.add_response("cheapest", r#"{"output": "banana"}"#);
    let chat = chat_with(EngineStyle::ToolAgent, client.clone());

    chat.answer("which is the cheapest item?").await;

    let calls = client.get_calls();
    assert_eq!(calls.len(), 1);
    let (_, user_prompt) = &calls[0];
    assert!(user_prompt.contains("item text, price integer"));
    assert!(user_prompt.contains("banana,1"));
}
