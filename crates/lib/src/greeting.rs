//! # Greeting short-circuit
//!
//! Greetings never reach a delegate. The incoming text is normalized
//! (punctuation stripped, lowercased, trimmed) and checked for exact
//! membership in a fixed phrase table; a hit returns the canned reply
//! immediately. No partial matching.

use regex::Regex;
use std::sync::OnceLock;

const GREETINGS: &[(&str, &str)] = &[
    ("hi", "Hello! How can I assist you today?"),
    ("hello", "Hello! What can I do for you?"),
    ("hey", "Hey there! How can I help?"),
    ("good morning", "Good morning! What can I assist you with?"),
    ("good afternoon", "Good afternoon! How can I help you today?"),
    ("good evening", "Good evening! How may I assist you?"),
];

fn punctuation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("valid punctuation pattern"))
}

/// Strips punctuation, lowercases, and trims the input.
pub fn normalize(text: &str) -> String {
    punctuation_regex()
        .replace_all(text, "")
        .to_lowercase()
        .trim()
        .to_string()
}

/// Returns the canned reply for a greeting, or `None` for anything else.
pub fn reply(text: &str) -> Option<&'static str> {
    let normalized = normalize(text);
    GREETINGS
        .iter()
        .find(|(phrase, _)| *phrase == normalized)
        .map(|(_, reply)| *reply)
}
