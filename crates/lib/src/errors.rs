use thiserror::Error;

/// Custom error types for the application.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),
    #[error("Unsupported engine style: {0}")]
    UnsupportedEngine(String),
    #[error("API key is missing")]
    MissingApiKey,
    #[error("No dataset has been uploaded")]
    NoDataset,
    #[error("Failed to parse CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("The uploaded file contains no data rows")]
    EmptyDataset,
    #[error("Failed to build Reqwest client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Request to the model provider failed: {0}")]
    DelegateRequest(reqwest::Error),
    #[error("Model provider returned an error: {0}")]
    DelegateStatus(String),
    #[error("Failed to deserialize model provider response: {0}")]
    DelegateBody(reqwest::Error),
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Blocking delegate task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
