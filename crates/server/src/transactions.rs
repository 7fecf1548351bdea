//! Transactions API endpoints

use api_types::{
    Success,
    transaction::{Transaction, TransactionFilter, TransactionNew},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::Utc;

use crate::{
    ServerError,
    mapping::{candidate, transaction_view, type_from_api},
    server::ServerState,
};

/// All transactions, most recent first, optionally filtered by `?type=`.
pub async fn list(
    State(state): State<ServerState>,
    filter: Result<Query<TransactionFilter>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, ServerError> {
    let Query(filter) = filter?;
    let engine = state.engine.read().await;
    let txs = match filter.kind {
        Some(kind) => engine.transactions_of_type(type_from_api(kind)),
        None => engine.transactions(),
    };
    Ok(Json(txs.into_iter().map(transaction_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ServerError> {
    let engine = state.engine.read().await;
    Ok(Json(transaction_view(engine.transaction(&id)?)))
}

/// History shared with one user; works for deleted users as well.
pub async fn for_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Json<Vec<Transaction>> {
    let engine = state.engine.read().await;
    Json(
        engine
            .transactions_for_user(&id)
            .into_iter()
            .map(transaction_view)
            .collect(),
    )
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<TransactionNew>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), ServerError> {
    let Json(payload) = payload?;
    let candidate = candidate(payload, Utc::now().date_naive())?;

    let mut engine = state.engine.write().await;
    let tx = engine.create_transaction(candidate)?;
    tracing::info!(
        transaction_id = %tx.id,
        kind = %tx.transaction_type(),
        "created transaction {}",
        tx.title
    );

    Ok((StatusCode::CREATED, Json(transaction_view(&tx))))
}

/// Deleting an unknown id succeeds without touching any balance.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Success>, ServerError> {
    let mut engine = state.engine.write().await;
    if let Some(tx) = engine.delete_transaction(&id)? {
        tracing::info!(transaction_id = %tx.id, "deleted transaction {}", tx.title);
    }
    Ok(Json(Success { success: true }))
}
