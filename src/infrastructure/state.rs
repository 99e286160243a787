//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::OwnerRepository;
use crate::infrastructure::SeaOrmOwnerRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection
    db: DatabaseConnection,
    /// Owner repository (owners, pets, types, visits)
    pub owners: Arc<dyn OwnerRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        let owners = Arc::new(SeaOrmOwnerRepository::new(db.clone()));

        Self { db, owners }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
