use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::services::{forms, owner_service};

pub async fn list_visits(
    State(state): State<AppState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
) -> impl IntoResponse {
    let owner = match owner_service::find_owner(state.owners.as_ref(), owner_id).await {
        Ok(owner) => owner,
        Err(DomainError::InvalidArgument(msg)) => {
            return (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response();
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    match owner.pet(pet_id) {
        Some(pet) => {
            let total = pet.visits.len();
            Json(json!({ "visits": pet.visits, "total": total })).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Pet not found" })),
        )
            .into_response(),
    }
}

pub async fn create_visit(
    State(state): State<AppState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    Json(form): Json<forms::VisitForm>,
) -> impl IntoResponse {
    let owner = match owner_service::find_owner(state.owners.as_ref(), owner_id).await {
        Ok(owner) => owner,
        Err(DomainError::InvalidArgument(msg)) => {
            return (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response();
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    if owner.pet(pet_id).is_none() {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Pet not found" })),
        )
            .into_response();
    }

    let visit = match forms::bind_visit_form(&form) {
        Ok(visit) => visit,
        Err(errors) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": "Validation failed", "errors": errors, "visit": form })),
            )
                .into_response();
        }
    };

    match state.owners.record_visit(pet_id, visit).await {
        Ok(recorded) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Visit recorded successfully", "visit": recorded })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
