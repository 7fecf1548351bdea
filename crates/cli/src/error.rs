use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid base url: {0}")]
    Url(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// The ledger refused the request (validation or settlement rules).
    #[error("{message} ({kind})")]
    Rejected { kind: String, message: String },
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
}
