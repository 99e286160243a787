use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::pet::Pet;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "owners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pet::Entity")]
    Pets,
}

impl Related<super::pet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// DTO for API responses. Also the aggregate the pet lookups run on: the
/// owner exclusively owns its pet list, in insertion order.
///
/// Not safe for concurrent mutation; each instance is scoped to one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl Owner {
    pub fn add_pet(&mut self, pet: Pet) {
        self.pets.push(pet);
    }

    /// First pet with this persistent identifier. Pets that have not been
    /// saved yet carry no identifier and can never match, whatever the query
    /// value is.
    pub fn pet(&self, id: i32) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id == Some(id))
    }

    /// First pet with this exact name (case-sensitive). An empty query name
    /// matches nothing, even a pet whose name is literally empty. With
    /// `ignore_new`, unsaved pets are skipped.
    pub fn pet_by_name(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        if name.is_empty() {
            return None;
        }
        self.pets
            .iter()
            .filter(|p| !ignore_new || !p.is_new())
            .find(|p| p.name == name)
    }
}

impl From<Model> for Owner {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            address: model.address,
            city: model.city,
            telephone: model.telephone,
            pets: Vec::new(),
        }
    }
}
