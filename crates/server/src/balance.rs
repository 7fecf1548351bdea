use api_types::balance::Balance;
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState};

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Balance>, ServerError> {
    let engine = state.engine.read().await;
    let balance = engine.balance(&id)?;
    Ok(Json(Balance {
        user_id: id,
        balance: balance.to_f64(),
    }))
}
