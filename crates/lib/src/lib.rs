//! # Tablechat
//!
//! This crate provides the core of a chat service that answers natural
//! language questions about an uploaded CSV file by delegating to a hosted
//! language model. A [`TableChat`] adapter binds one vendor ([`Provider`])
//! and one delegate style ([`EngineStyle`]) to one in-memory
//! [`TabularFrame`]; its `answer` method normalizes every delegate result
//! into a plain string and never fails.

pub mod adapter;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod frame;
pub mod greeting;
pub mod providers;
pub mod samples;

pub use adapter::{EngineStyle, Provider, TableChat, TableChatBuilder};
pub use errors::ChatError;
pub use frame::TabularFrame;
pub use samples::SampleQuery;
