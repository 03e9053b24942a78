use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use medbot_instruments::TestDefinition;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct TestSummary {
    name: String,
    questions: usize,
    rules: usize,
}

pub async fn list_tests(State(state): State<AppState>) -> Json<Vec<TestSummary>> {
    let tests = state
        .dispatcher
        .catalog()
        .tests()
        .iter()
        .map(|t| TestSummary {
            name: t.name().to_string(),
            questions: t.question_count(),
            rules: t.rules().len(),
        })
        .collect();
    Json(tests)
}

/// Full definition of the first test whose name contains `name`.
pub async fn get_test_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TestDefinition>, ApiError> {
    let test = state
        .dispatcher
        .catalog()
        .find(&name)
        .ok_or_else(|| ApiError::NotFound(format!("test not found: {name}")))?;

    Ok(Json(TestDefinition::clone(test)))
}
