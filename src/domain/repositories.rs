//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::{Owner, Pet, PetType, Visit};

/// Repository trait for the Owner aggregate and its pets.
///
/// `find_by_id` loads the full aggregate: the owner, its pets in insertion
/// order, each pet's type and visits.
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Find all owners
    async fn find_all(&self) -> Result<Vec<Owner>, DomainError>;

    /// Find owners whose last name starts with the given prefix
    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, DomainError>;

    /// Find an owner by ID, with pets loaded
    async fn find_by_id(&self, id: i32) -> Result<Option<Owner>, DomainError>;

    /// All known pet types, ordered by name
    async fn find_pet_types(&self) -> Result<Vec<PetType>, DomainError>;

    /// Create a new owner
    async fn create(&self, owner: Owner) -> Result<Owner, DomainError>;

    /// Update an existing owner
    async fn update(&self, id: i32, owner: Owner) -> Result<Owner, DomainError>;

    /// Insert the pet when it is new, update it otherwise
    async fn save_pet(&self, owner_id: i32, pet: Pet) -> Result<Pet, DomainError>;

    /// Record a visit for an existing pet
    async fn record_visit(&self, pet_id: i32, visit: Visit) -> Result<Visit, DomainError>;
}
