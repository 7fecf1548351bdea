//! Settle up endpoint

use api_types::{settle::Settle, transaction::Transaction};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;

use crate::{
    ServerError,
    mapping::{amount, transaction_view},
    server::ServerState,
};

/// Record a payment with a friend; without `amount` the whole balance is
/// settled.
pub async fn settle(
    State(state): State<ServerState>,
    payload: Result<Json<Settle>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), ServerError> {
    let Json(payload) = payload?;
    let date = payload.date.unwrap_or_else(|| Utc::now().date_naive());
    let requested = payload.amount.map(amount).transpose()?;

    let mut engine = state.engine.write().await;
    let tx = match requested {
        Some(requested) => engine.settle_up(&payload.user_id, requested, date)?,
        None => engine.settle_all(&payload.user_id, date)?,
    };
    tracing::info!(
        user_id = %payload.user_id,
        amount = %tx.total_amount,
        "settled up: {}",
        tx.title
    );

    Ok((StatusCode::CREATED, Json(transaction_view(&tx))))
}
