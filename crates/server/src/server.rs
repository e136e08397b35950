use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use crate::{balances, expenses, members};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/members", get(members::list).post(members::member_new))
        .route("/members/{id}", delete(members::remove))
        .route("/expenses", get(expenses::list).post(expenses::expense_new))
        .route("/expenses/equal", post(expenses::equal_expense_new))
        .route("/expenses/{id}", delete(expenses::remove))
        .route("/balances", get(balances::balances))
        .route("/settlements", get(balances::settlements))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builds the HTTP application around `engine` without binding a socket.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}
