use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::services::{forms, owner_service};

#[derive(Debug, Deserialize)]
pub struct OwnersQuery {
    pub last_name: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/owners",
    responses(
        (status = 200, description = "List owners, optionally filtered by last name prefix")
    )
)]
pub async fn list_owners(
    State(state): State<AppState>,
    Query(params): Query<OwnersQuery>,
) -> impl IntoResponse {
    let result = match params.last_name.as_deref() {
        Some(prefix) if !prefix.is_empty() => state.owners.find_by_last_name(prefix).await,
        _ => state.owners.find_all().await,
    };

    match result {
        Ok(owners) => {
            let total = owners.len();
            Json(json!({ "owners": owners, "total": total })).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn get_owner(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match owner_service::find_owner(state.owners.as_ref(), id).await {
        Ok(owner) => Json(json!({ "owner": owner })).into_response(),
        Err(DomainError::InvalidArgument(msg)) => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn create_owner(
    State(state): State<AppState>,
    Json(form): Json<forms::OwnerForm>,
) -> impl IntoResponse {
    let owner = match forms::bind_owner_form(&form) {
        Ok(owner) => owner,
        Err(errors) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": "Validation failed", "errors": errors, "owner": form })),
            )
                .into_response();
        }
    };

    match state.owners.create(owner).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Owner created successfully", "owner": created })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn update_owner(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<forms::OwnerForm>,
) -> impl IntoResponse {
    let owner = match forms::bind_owner_form(&form) {
        Ok(owner) => owner,
        Err(errors) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": "Validation failed", "errors": errors, "owner": form })),
            )
                .into_response();
        }
    };

    match state.owners.update(id, owner).await {
        Ok(updated) => Json(json!({ "message": "Owner updated successfully", "owner": updated }))
            .into_response(),
        Err(DomainError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Owner not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
