//! Repository implementations using SeaORM

pub mod owner_repository;

pub use owner_repository::SeaOrmOwnerRepository;
