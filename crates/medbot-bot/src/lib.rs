//! medbot-bot
//!
//! Chat dispatcher and its HTTP surface. A transport adapter (Telegram or
//! otherwise) forwards each inbound message to `POST /messages` and sends the
//! returned reply back to the chat.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/tests", get(routes::catalog::list_tests))
        .route("/tests/{name}", get(routes::catalog::get_test_detail))
        .route("/messages", post(routes::messages::post_message))
        .route(
            "/sessions/{chat_id}",
            get(routes::sessions::get_session).delete(routes::sessions::delete_session),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
