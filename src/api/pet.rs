use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::Owner;
use crate::services::{forms, owner_service};

/// Resolve the owner the pet routes are nested under, or produce the
/// response for the failure.
async fn resolve_owner(state: &AppState, owner_id: i32) -> Result<Owner, axum::response::Response> {
    match owner_service::find_owner(state.owners.as_ref(), owner_id).await {
        Ok(owner) => Ok(owner),
        Err(DomainError::InvalidArgument(msg)) => {
            Err((StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response())
        }
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response()),
    }
}

pub async fn get_pet(
    State(state): State<AppState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
) -> impl IntoResponse {
    let owner = match resolve_owner(&state, owner_id).await {
        Ok(owner) => owner,
        Err(response) => return response,
    };

    match owner.pet(pet_id) {
        Some(pet) => Json(json!({ "pet": pet })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Pet not found" })),
        )
            .into_response(),
    }
}

pub async fn create_pet(
    State(state): State<AppState>,
    Path(owner_id): Path<i32>,
    Json(form): Json<forms::PetForm>,
) -> impl IntoResponse {
    let owner = match resolve_owner(&state, owner_id).await {
        Ok(owner) => owner,
        Err(response) => return response,
    };

    let types = match state.owners.find_pet_types().await {
        Ok(types) => types,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let pet = match forms::bind_pet_form(&form, &types, &owner, None) {
        Ok(pet) => pet,
        Err(errors) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": "Validation failed", "errors": errors, "pet": form })),
            )
                .into_response();
        }
    };

    match state.owners.save_pet(owner_id, pet).await {
        Ok(saved) => {
            tracing::debug!(owner_id, pet_id = ?saved.id, "pet created");
            Redirect::to(&format!("/api/owners/{}", owner_id)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn update_pet(
    State(state): State<AppState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    Json(form): Json<forms::PetForm>,
) -> impl IntoResponse {
    let owner = match resolve_owner(&state, owner_id).await {
        Ok(owner) => owner,
        Err(response) => return response,
    };

    if owner.pet(pet_id).is_none() {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Pet not found" })),
        )
            .into_response();
    }

    let types = match state.owners.find_pet_types().await {
        Ok(types) => types,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let pet = match forms::bind_pet_form(&form, &types, &owner, Some(pet_id)) {
        Ok(pet) => pet,
        Err(errors) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": "Validation failed", "errors": errors, "pet": form })),
            )
                .into_response();
        }
    };

    match state.owners.save_pet(owner_id, pet).await {
        Ok(_) => Redirect::to(&format!("/api/owners/{}", owner_id)).into_response(),
        Err(DomainError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Pet not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
