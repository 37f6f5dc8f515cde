//! # Application State
//!
//! The shared [`AppState`] holds the configuration, the sample queries
//! loaded at startup, and the session registry. Each browser session owns a
//! [`Session`]: its frame, provider selection, per-provider API keys,
//! message history, and the cached chat adapter with the fingerprint it was
//! bound to. Nothing is shared across sessions.

use crate::config::AppConfig;
use serde::Serialize;
use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};
use tablechat::{samples, EngineStyle, Provider, SampleQuery, TableChat, TabularFrame};
use tracing::{info, warn};
use uuid::Uuid;

/// One chat message, rendered in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// The session bootstrap state reported to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapState {
    NoFile,
    FileUploaded,
    KeySet,
    BotReady,
}

/// The exact binding a cached adapter was constructed for.
///
/// The frame component is the session's upload generation counter: every
/// successful upload increments it, so re-uploading always invalidates the
/// cache even for byte-identical files. A counter never repeats within a
/// session, unlike a heap address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotFingerprint {
    pub frame_generation: u64,
    pub provider: Provider,
    pub api_key: String,
    pub engine: EngineStyle,
}

impl BotFingerprint {
    pub fn new(
        frame_generation: u64,
        provider: Provider,
        api_key: &str,
        engine: EngineStyle,
    ) -> Self {
        Self {
            frame_generation,
            provider,
            api_key: api_key.to_string(),
            engine,
        }
    }
}

/// A cached adapter together with the binding it answers for.
#[derive(Clone)]
pub struct CachedBot {
    pub fingerprint: BotFingerprint,
    pub chat: Arc<TableChat>,
}

/// Per-session state; created by `POST /session`, discarded with the process.
pub struct Session {
    pub provider: Provider,
    pub engine: EngineStyle,
    pub api_keys: HashMap<Provider, String>,
    pub frame: Option<Arc<TabularFrame>>,
    pub frame_generation: u64,
    pub file_name: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub bot: Option<CachedBot>,
}

impl Session {
    pub fn new(provider: Provider, engine: EngineStyle) -> Self {
        Self {
            provider,
            engine,
            api_keys: HashMap::new(),
            frame: None,
            frame_generation: 0,
            file_name: None,
            messages: Vec::new(),
            bot: None,
        }
    }

    /// Installs a freshly parsed frame, advancing the generation counter so
    /// any cached adapter fingerprint stops matching.
    pub fn set_frame(&mut self, frame: Arc<TabularFrame>, file_name: String) {
        self.frame = Some(frame);
        self.frame_generation += 1;
        self.file_name = Some(file_name);
    }

    /// The API key set for the currently selected provider, if any.
    pub fn current_key(&self) -> Option<&str> {
        self.api_keys
            .get(&self.provider)
            .map(String::as_str)
            .filter(|k| !k.is_empty())
    }

    /// Derives the bootstrap state from the session contents.
    pub fn bootstrap_state(&self) -> BootstrapState {
        if self.frame.is_none() {
            return BootstrapState::NoFile;
        }
        let Some(key) = self.current_key() else {
            return BootstrapState::FileUploaded;
        };
        let current =
            BotFingerprint::new(self.frame_generation, self.provider, key, self.engine);
        match &self.bot {
            Some(bot) if bot.fingerprint == current => BootstrapState::BotReady,
            _ => BootstrapState::KeySet,
        }
    }
}

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// Sample queries loaded once at startup.
    pub samples: Arc<Vec<SampleQuery>>,
    /// Defaults applied to new sessions, parsed out of the configuration.
    pub default_provider: Provider,
    pub default_engine: EngineStyle,
    /// All live sessions, keyed by the id minted at `POST /session`.
    pub sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

/// Builds the shared application state from the configuration.
///
/// Fails fast on an unparseable default provider or engine; a missing or
/// malformed samples file degrades to an empty list with a warning.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let default_provider: Provider = config.default_provider.parse()?;
    let default_engine: EngineStyle = config.default_engine.parse()?;

    let samples_path = Path::new(&config.samples_path);
    let samples = match samples::load_samples(samples_path) {
        Ok(samples) => {
            info!(count = samples.len(), "Loaded sample queries.");
            samples
        }
        Err(e) => {
            warn!(path = %config.samples_path, "Could not load sample queries: {e}");
            Vec::new()
        }
    };

    Ok(AppState {
        config: Arc::new(config),
        samples: Arc::new(samples),
        default_provider,
        default_engine,
        sessions: Arc::new(RwLock::new(HashMap::new())),
    })
}
