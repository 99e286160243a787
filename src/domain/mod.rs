//! Domain layer - business contracts shared by services and handlers

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::OwnerRepository;
