//! Owner Service - fetch-or-fail owner resolution

use crate::domain::{DomainError, OwnerRepository};
use crate::models::Owner;

/// Resolve an owner by id, enforcing existence.
///
/// A found owner passes through unchanged. Absence - whether the id is
/// negative, zero, or simply unknown - is an invalid-argument failure; the
/// two cases are indistinguishable at this boundary.
pub async fn find_owner(owners: &dyn OwnerRepository, id: i32) -> Result<Owner, DomainError> {
    owners.find_by_id(id).await?.ok_or_else(|| {
        DomainError::InvalidArgument(format!(
            "Owner not found with id: {}. Please ensure the ID is correct",
            id
        ))
    })
}
