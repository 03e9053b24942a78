use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
    tests: usize,
    active_sessions: usize,
}

pub async fn health_check(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        tests: state.dispatcher.catalog().len(),
        active_sessions: state.dispatcher.active_sessions().await,
    })
}
