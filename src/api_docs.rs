use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::owner::list_owners,
        api::pet_type::list_pet_types,
        // Add other endpoints here as we document them
    ),
    tags(
        (name = "petclinic", description = "PetClinic API")
    )
)]
pub struct ApiDoc;
