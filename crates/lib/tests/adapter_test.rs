//! # Adapter Construction Tests
//!
//! Validates that `TableChatBuilder` accepts exactly the supported
//! provider/engine combinations, rejects everything else at construction
//! time, and never requires network access to do so.

use std::str::FromStr;
use std::sync::Arc;
use tablechat::{ChatError, EngineStyle, Provider, TableChat, TabularFrame};

fn test_frame() -> Arc<TabularFrame> {
    let csv = "city,population\nlisbon,545000\nporto,230000\n";
    Arc::new(TabularFrame::from_bytes(csv.as_bytes()).unwrap())
}

/// All four (provider, engine) combinations build successfully.
#[test]
fn test_all_four_combinations_build() {
    for provider in [Provider::OpenAi, Provider::Gemini] {
        for engine in [EngineStyle::ToolAgent, EngineStyle::QueryEngine] {
            let chat = TableChat::builder()
                .api_key("test-key")
                .frame(test_frame())
                .provider(provider)
                .engine(engine)
                .build()
                .expect("valid combination must build");
            assert_eq!(chat.provider(), provider);
            assert_eq!(chat.engine(), engine);
        }
    }
}

/// Strings outside the closed enums are rejected before any client exists.
#[test]
fn test_unsupported_values_fail_parsing() {
    for bad in ["COHERE", "azure", ""] {
        assert!(matches!(
            Provider::from_str(bad),
            Err(ChatError::UnsupportedProvider(_))
        ));
    }
    for bad in ["langgraph", "agents", ""] {
        assert!(matches!(
            EngineStyle::from_str(bad),
            Err(ChatError::UnsupportedEngine(_))
        ));
    }
}

/// An empty API key is a construction-time failure.
#[test]
fn test_empty_api_key_is_rejected() {
    let err = TableChat::builder()
        .api_key("   ")
        .frame(test_frame())
        .provider(Provider::OpenAi)
        .engine(EngineStyle::ToolAgent)
        .build()
        .unwrap_err();
    assert!(matches!(err, ChatError::MissingApiKey));
}

/// A missing frame is a construction-time failure.
#[test]
fn test_missing_frame_is_rejected() {
    let err = TableChat::builder()
        .api_key("test-key")
        .provider(Provider::Gemini)
        .engine(EngineStyle::QueryEngine)
        .build()
        .unwrap_err();
    assert!(matches!(err, ChatError::NoDataset));
}
