use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::pet_type::PetType;
use super::visit::Visit;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: i32,
    pub type_id: i32,
    pub name: String,
    pub birth_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::owner::Entity",
        from = "Column::OwnerId",
        to = "super::owner::Column::Id"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "super::pet_type::Entity",
        from = "Column::TypeId",
        to = "super::pet_type::Column::Id"
    )]
    PetType,
    #[sea_orm(has_many = "super::visit::Entity")]
    Visits,
}

impl Related<super::owner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::pet_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PetType.def()
    }
}

impl Related<super::visit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Visits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// DTO for API responses. `id` stays `None` until the repository has
/// persisted the pet; that is the only thing "new" means here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Option<i32>,
    pub name: String,
    pub birth_date: Option<String>,
    #[serde(rename = "type")]
    pub pet_type: Option<PetType>,
    #[serde(default)]
    pub visits: Vec<Visit>,
}

impl Pet {
    /// Whether this pet has been persisted yet.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

impl From<Model> for Pet {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            birth_date: model.birth_date,
            pet_type: None, // filled in by the repository from the types table
            visits: Vec::new(),
        }
    }
}
