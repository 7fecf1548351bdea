use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::RwLock;

use std::sync::Arc;

use crate::{balance, settle, statistics, transactions, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    /// Mutations hold the write lock from validation to balance update.
    pub engine: Arc<RwLock<Engine>>,
}

impl ServerState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/current",
            get(users::get_current)
                .patch(users::update_current)
                .delete(users::delete_current),
        )
        .route("/users/{id}", get(users::get).delete(users::delete))
        .route("/users/{id}/transactions", get(transactions::for_user))
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            get(transactions::get).delete(transactions::delete),
        )
        .route("/balance/{id}", get(balance::get))
        .route("/stats", get(statistics::get_stats))
        .route("/settle", post(settle::settle))
        .with_state(state)
}

/// Router over `engine`, without binding a socket.
pub fn app(engine: Engine) -> Router {
    router(ServerState::new(engine))
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}
