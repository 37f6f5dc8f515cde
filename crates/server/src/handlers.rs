//! # Route Handlers
//!
//! All Axum handlers for `tablechat-server`: the static chat page, session
//! bootstrap (create/config/key/upload), the chat endpoint with its greeting
//! short-circuit and adapter cache, and the static reference tabs (FAQs,
//! sample queries, contact).

use crate::{
    errors::AppError,
    state::{AppState, BootstrapState, BotFingerprint, CachedBot, ChatMessage, Role, Session},
};
use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    response::Html,
    Json,
};
use axum_extra::extract::Multipart;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tablechat::{greeting, ChatError, EngineStyle, Provider, SampleQuery, TableChat, TabularFrame};
use tracing::{info, warn};
use uuid::Uuid;

/// The session id carried in the `X-Session-Id` header.
pub struct SessionId(pub Uuid);

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("x-session-id")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::MissingSession)?;
        let id = Uuid::parse_str(raw).map_err(|_| AppError::MissingSession)?;
        Ok(SessionId(id))
    }
}

// --- API Payloads ---

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
}

#[derive(Serialize)]
pub struct StateResponse {
    pub state: BootstrapState,
    pub provider: Provider,
    pub engine: EngineStyle,
    pub file_name: Option<String>,
    pub messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
pub struct ConfigRequest {
    pub provider: Option<String>,
    pub engine: Option<String>,
}

#[derive(Deserialize)]
pub struct KeyRequest {
    pub provider: String,
    pub api_key: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub file_name: String,
    pub rows: usize,
    pub columns: usize,
    pub state: BootstrapState,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub state: BootstrapState,
}

// --- General handlers ---

/// Serves the single-page chat UI.
pub async fn root() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

/// The health check handler.
pub async fn health_check() -> &'static str {
    "OK"
}

// --- Session bootstrap handlers ---

/// Mints a new session with the configured defaults.
pub async fn create_session_handler(
    State(app_state): State<AppState>,
) -> Result<Json<SessionResponse>, AppError> {
    let id = Uuid::new_v4();
    let session = Session::new(app_state.default_provider, app_state.default_engine);
    let mut sessions = app_state
        .sessions
        .write()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to acquire session lock")))?;
    sessions.insert(id, session);
    info!(session_id = %id, "Created new session.");
    Ok(Json(SessionResponse { session_id: id }))
}

/// Reports the bootstrap state and the message history for the UI.
pub async fn state_handler(
    State(app_state): State<AppState>,
    session_id: SessionId,
) -> Result<Json<StateResponse>, AppError> {
    let sessions = app_state
        .sessions
        .read()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to acquire session lock")))?;
    let session = sessions.get(&session_id.0).ok_or(AppError::SessionNotFound)?;
    Ok(Json(StateResponse {
        state: session.bootstrap_state(),
        provider: session.provider,
        engine: session.engine,
        file_name: session.file_name.clone(),
        messages: session.messages.clone(),
    }))
}

/// Changes the selected provider and/or engine style.
///
/// A stale cached adapter is not torn down here; the fingerprint comparison
/// in the chat handler replaces it on the next question.
pub async fn config_handler(
    State(app_state): State<AppState>,
    session_id: SessionId,
    Json(payload): Json<ConfigRequest>,
) -> Result<Json<StateResponse>, AppError> {
    let provider = payload
        .provider
        .as_deref()
        .map(str::parse::<Provider>)
        .transpose()?;
    let engine = payload
        .engine
        .as_deref()
        .map(str::parse::<EngineStyle>)
        .transpose()?;

    let mut sessions = app_state
        .sessions
        .write()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to acquire session lock")))?;
    let session = sessions
        .get_mut(&session_id.0)
        .ok_or(AppError::SessionNotFound)?;
    if let Some(provider) = provider {
        session.provider = provider;
        info!("Selected provider: {provider}");
    }
    if let Some(engine) = engine {
        session.engine = engine;
        info!("Selected engine style: {engine}");
    }
    Ok(Json(StateResponse {
        state: session.bootstrap_state(),
        provider: session.provider,
        engine: session.engine,
        file_name: session.file_name.clone(),
        messages: session.messages.clone(),
    }))
}

/// Stores an API key for a provider. Empty keys are rejected.
pub async fn key_handler(
    State(app_state): State<AppState>,
    session_id: SessionId,
    Json(payload): Json<KeyRequest>,
) -> Result<Json<Value>, AppError> {
    let provider: Provider = payload.provider.parse()?;
    if payload.api_key.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Please enter a valid API Key.".to_string(),
        ));
    }

    let mut sessions = app_state
        .sessions
        .write()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to acquire session lock")))?;
    let session = sessions
        .get_mut(&session_id.0)
        .ok_or(AppError::SessionNotFound)?;
    session
        .api_keys
        .insert(provider, payload.api_key.trim().to_string());
    info!("{provider} API Key set successfully.");
    Ok(Json(json!({ "message": format!("{provider} API Key has been set.") })))
}

/// Accepts a CSV upload and parses it into the session's frame.
///
/// A parse failure leaves the previous frame (and state) untouched.
pub async fn upload_handler(
    State(app_state): State<AppState>,
    session_id: SessionId,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut csv_data: Option<Vec<u8>> = None;
    let mut file_name = "uploaded.csv".to_string();

    while let Some(field) = multipart.next_field().await.map_err(anyhow::Error::from)? {
        if field.name() == Some("file") {
            if let Some(name) = field.file_name() {
                file_name = name.to_string();
            }
            csv_data = Some(field.bytes().await.map_err(anyhow::Error::from)?.to_vec());
        }
    }

    let csv_data = csv_data.ok_or_else(|| {
        AppError::BadRequest("File data not found in request.".to_string())
    })?;
    let frame = Arc::new(TabularFrame::from_bytes(&csv_data)?);

    let mut sessions = app_state
        .sessions
        .write()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to acquire session lock")))?;
    let session = sessions
        .get_mut(&session_id.0)
        .ok_or(AppError::SessionNotFound)?;
    info!(
        rows = frame.row_count(),
        columns = frame.column_count(),
        "Uploaded file: {file_name}"
    );
    let rows = frame.row_count();
    let columns = frame.column_count();
    session.set_frame(frame, file_name.clone());

    Ok(Json(UploadResponse {
        file_name,
        rows,
        columns,
        state: session.bootstrap_state(),
    }))
}

// --- Chat handler ---

/// Answers one user message.
///
/// Greetings are answered locally without touching the adapter. Otherwise
/// the cached adapter is reused while its (frame, provider, key, engine)
/// fingerprint still matches the session, and rebuilt when it does not; the
/// session lock is released before the delegate round trip.
pub async fn chat_handler(
    State(app_state): State<AppState>,
    session_id: SessionId,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let question = payload.message.trim().to_string();
    if question.is_empty() {
        return Err(AppError::BadRequest("Message must not be empty.".to_string()));
    }

    let chat: Arc<TableChat> = {
        let mut sessions = app_state
            .sessions
            .write()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to acquire session lock")))?;
        let session = sessions
            .get_mut(&session_id.0)
            .ok_or(AppError::SessionNotFound)?;
        session.messages.push(ChatMessage {
            role: Role::User,
            content: question.clone(),
        });

        if let Some(reply) = greeting::reply(&question) {
            session.messages.push(ChatMessage {
                role: Role::Assistant,
                content: reply.to_string(),
            });
            return Ok(Json(ChatResponse {
                answer: reply.to_string(),
                state: session.bootstrap_state(),
            }));
        }

        let frame = session.frame.clone().ok_or(ChatError::NoDataset)?;
        let key = session
            .current_key()
            .ok_or(ChatError::MissingApiKey)?
            .to_string();
        let fingerprint =
            BotFingerprint::new(session.frame_generation, session.provider, &key, session.engine);

        match &session.bot {
            Some(bot) if bot.fingerprint == fingerprint => Arc::clone(&bot.chat),
            _ => {
                let mut builder = TableChat::builder()
                    .api_key(key.as_str())
                    .frame(frame)
                    .provider(session.provider)
                    .engine(session.engine);
                if let Some(url) = &app_state.config.openai_api_url {
                    builder = builder.openai_api_url(url.clone());
                }
                if let Some(url) = &app_state.config.gemini_api_url {
                    builder = builder.gemini_api_url(url.clone());
                }
                let chat = Arc::new(builder.build()?);
                session.bot = Some(CachedBot {
                    fingerprint,
                    chat: Arc::clone(&chat),
                });
                info!("Chatbot initialized successfully.");
                chat
            }
        }
    };

    // Lock released; one delegate round trip, no retries.
    let answer = chat.answer(&question).await;
    info!("User prompt: {question} | Response: {answer}");

    let state = {
        let mut sessions = app_state
            .sessions
            .write()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to acquire session lock")))?;
        match sessions.get_mut(&session_id.0) {
            Some(session) => {
                session.messages.push(ChatMessage {
                    role: Role::Assistant,
                    content: answer.clone(),
                });
                session.bootstrap_state()
            }
            None => {
                warn!(session_id = %session_id.0, "Session vanished mid-answer.");
                BootstrapState::NoFile
            }
        }
    };

    Ok(Json(ChatResponse { answer, state }))
}

// --- Static reference tabs ---

/// The FAQ list rendered by the FAQs tab.
pub async fn faqs_handler() -> Json<Value> {
    Json(json!([
        {
            "question": "How do I upload a CSV file?",
            "answer": "Use the file uploader in the sidebar to upload your CSV file."
        },
        {
            "question": "How do I ask a question about the CSV data?",
            "answer": "Type your question in the chat input at the bottom of the Chat tab."
        },
        {
            "question": "How do I change the OpenAI API Key?",
            "answer": "Select 'OPENAI' as the provider in the sidebar, enter the new API key, and click 'Set API Key'."
        },
        {
            "question": "How do I change the Gemini API Key?",
            "answer": "Select 'GEMINI' as the provider in the sidebar, enter the new API key, and click 'Set API Key'."
        },
        {
            "question": "Why do I need an API Key?",
            "answer": "The API key is required to interact with the selected Language Model provider's services for generating responses."
        },
        {
            "question": "How do I create an OpenAI API Key?",
            "answer": "Visit the OpenAI API Keys page, log in, click 'Create new secret key', and copy the generated key into the OpenAI API Key field in the sidebar."
        },
        {
            "question": "How do I create a Gemini API Key?",
            "answer": "Visit the Google Cloud Console, enable the Gemini API, create credentials, and paste the generated API key into the Gemini API Key field in the sidebar."
        }
    ]))
}

/// The sample queries loaded at startup.
pub async fn samples_handler(State(app_state): State<AppState>) -> Json<Vec<SampleQuery>> {
    Json(app_state.samples.as_ref().clone())
}

/// The contact card rendered by the contact tab.
pub async fn contact_handler() -> Json<Value> {
    Json(json!({
        "email": "pwaykos1@gmail.com",
        "phone": "+17249542810",
        "linkedin": "https://www.linkedin.com/in/prajwal-waykos/",
        "github": "https://github.com/praj-17"
    }))
}
