use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/pettypes",
    responses(
        (status = 200, description = "List all known pet types")
    )
)]
pub async fn list_pet_types(State(state): State<AppState>) -> impl IntoResponse {
    match state.owners.find_pet_types().await {
        Ok(types) => Json(types).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
