pub mod health;
pub mod owner;
pub mod pet;
pub mod pet_type;
pub mod visit;

use axum::{
    Router,
    routing::{get, post},
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Owners
        .route(
            "/owners",
            get(owner::list_owners).post(owner::create_owner),
        )
        .route(
            "/owners/:id",
            get(owner::get_owner).put(owner::update_owner),
        )
        // Pet types
        .route("/pettypes", get(pet_type::list_pet_types))
        // Pets (nested under their owner)
        .route("/owners/:owner_id/pets", post(pet::create_pet))
        .route(
            "/owners/:owner_id/pets/:pet_id",
            get(pet::get_pet).put(pet::update_pet),
        )
        // Visits
        .route(
            "/owners/:owner_id/pets/:pet_id/visits",
            get(visit::list_visits).post(visit::create_visit),
        )
        .with_state(state)
}
