use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tablechat::ChatError;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates the different kinds of errors that can occur
/// within the server, allowing them to be converted into appropriate HTTP
/// responses.
pub enum AppError {
    /// Errors originating from the `tablechat` library.
    Chat(ChatError),
    /// The request carried no usable `X-Session-Id` header.
    MissingSession,
    /// The session id is well-formed but unknown.
    SessionNotFound,
    /// A malformed request payload.
    BadRequest(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        AppError::Chat(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Chat(err) => {
                error!("ChatError: {:?}", err);
                match err {
                    ChatError::UnsupportedProvider(v) => {
                        (StatusCode::BAD_REQUEST, format!("Unsupported provider: {v}"))
                    }
                    ChatError::UnsupportedEngine(v) => (
                        StatusCode::BAD_REQUEST,
                        format!("Unsupported engine style: {v}"),
                    ),
                    ChatError::MissingApiKey => (
                        StatusCode::CONFLICT,
                        "No API key has been set for the selected provider.".to_string(),
                    ),
                    ChatError::NoDataset => (
                        StatusCode::CONFLICT,
                        "Please upload a CSV file before chatting.".to_string(),
                    ),
                    ChatError::Csv(e) => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        format!("Error reading the CSV file: {e}"),
                    ),
                    ChatError::EmptyDataset => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "The uploaded file contains no data rows.".to_string(),
                    ),
                    ChatError::ClientBuild(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to build HTTP client: {e}"),
                    ),
                    ChatError::DelegateRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Request to the model provider failed: {e}"),
                    ),
                    ChatError::DelegateStatus(e) => {
                        (StatusCode::BAD_GATEWAY, format!("Model provider error: {e}"))
                    }
                    ChatError::DelegateBody(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Failed to deserialize model provider response: {e}"),
                    ),
                    ChatError::Json(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to serialize result: {e}"),
                    ),
                    ChatError::Regex(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Internal regex error: {e}"),
                    ),
                    ChatError::Io(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("I/O error: {e}"),
                    ),
                    ChatError::Join(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Blocking task failed: {e}"),
                    ),
                }
            }
            AppError::MissingSession => (
                StatusCode::BAD_REQUEST,
                "Missing or malformed X-Session-Id header.".to_string(),
            ),
            AppError::SessionNotFound => (StatusCode::NOT_FOUND, "Unknown session.".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
