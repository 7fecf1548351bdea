use api_types::ErrorResponse;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::{EngineError, ValidationError};

pub use server::{app, run_with_listener};

mod balance;
mod mapping;
mod server;
mod settle;
mod statistics;
mod transactions;
mod users;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Request that could not be read or mapped onto the ledger model.
    BadRequest(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::NotFound { .. } => StatusCode::NOT_FOUND,
        EngineError::Validation(_) | EngineError::Settlement(_) => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => (
                status_for_engine_error(&err),
                ErrorResponse {
                    kind: err.kind().to_string(),
                    error: err.to_string(),
                },
            ),
            ServerError::BadRequest(error) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error,
                    kind: "bad_request".to_string(),
                },
            ),
        };

        if status == StatusCode::NOT_FOUND {
            tracing::debug!("{}", body.error);
        } else {
            tracing::warn!(kind = %body.kind, "rejected request: {}", body.error);
        }
        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<ValidationError> for ServerError {
    fn from(value: ValidationError) -> Self {
        Self::Engine(value.into())
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}
