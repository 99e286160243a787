//! SeaORM implementation of OwnerRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{DomainError, OwnerRepository};
use crate::models::owner::{ActiveModel, Column, Entity as OwnerEntity};
use crate::models::{Owner, Pet, PetType, Visit, pet, pet_type, visit};

/// SeaORM-based implementation of OwnerRepository
pub struct SeaOrmOwnerRepository {
    db: DatabaseConnection,
}

impl SeaOrmOwnerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load the pets belonging to an owner row, with their types and visits.
    async fn load_pets(&self, owner_model: &crate::models::owner::Model) -> Result<Vec<Pet>, DomainError> {
        let pet_models = owner_model
            .find_related(pet::Entity)
            .order_by_asc(pet::Column::Id)
            .all(&self.db)
            .await?;

        if pet_models.is_empty() {
            return Ok(Vec::new());
        }

        let types: HashMap<i32, PetType> = pet_type::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|t| (t.id, PetType::from(t)))
            .collect();

        let pet_ids: Vec<i32> = pet_models.iter().map(|p| p.id).collect();
        let mut visits_by_pet: HashMap<i32, Vec<Visit>> = HashMap::new();
        let visit_models = visit::Entity::find()
            .filter(visit::Column::PetId.is_in(pet_ids))
            .order_by_asc(visit::Column::VisitDate)
            .all(&self.db)
            .await?;
        for v in visit_models {
            visits_by_pet.entry(v.pet_id).or_default().push(Visit::from(v));
        }

        let mut pets = Vec::with_capacity(pet_models.len());
        for model in pet_models {
            let mut pet_dto = Pet::from(model.clone());
            pet_dto.pet_type = types.get(&model.type_id).cloned();
            pet_dto.visits = visits_by_pet.remove(&model.id).unwrap_or_default();
            pets.push(pet_dto);
        }

        Ok(pets)
    }

    async fn to_owner_dto(&self, model: crate::models::owner::Model) -> Result<Owner, DomainError> {
        let pets = self.load_pets(&model).await?;
        let mut owner = Owner::from(model);
        owner.pets = pets;
        Ok(owner)
    }
}

#[async_trait]
impl OwnerRepository for SeaOrmOwnerRepository {
    async fn find_all(&self) -> Result<Vec<Owner>, DomainError> {
        let models = OwnerEntity::find()
            .order_by_asc(Column::LastName)
            .all(&self.db)
            .await?;

        let mut owners = Vec::with_capacity(models.len());
        for model in models {
            owners.push(self.to_owner_dto(model).await?);
        }
        Ok(owners)
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, DomainError> {
        let models = OwnerEntity::find()
            .filter(Column::LastName.starts_with(last_name))
            .order_by_asc(Column::LastName)
            .all(&self.db)
            .await?;

        let mut owners = Vec::with_capacity(models.len());
        for model in models {
            owners.push(self.to_owner_dto(model).await?);
        }
        Ok(owners)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Owner>, DomainError> {
        let model = OwnerEntity::find_by_id(id).one(&self.db).await?;

        match model {
            Some(model) => Ok(Some(self.to_owner_dto(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_pet_types(&self) -> Result<Vec<PetType>, DomainError> {
        let types = pet_type::Entity::find()
            .order_by_asc(pet_type::Column::Name)
            .all(&self.db)
            .await?;

        Ok(types.into_iter().map(PetType::from).collect())
    }

    async fn create(&self, owner: Owner) -> Result<Owner, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let new_owner = ActiveModel {
            first_name: Set(owner.first_name),
            last_name: Set(owner.last_name),
            address: Set(owner.address),
            city: Set(owner.city),
            telephone: Set(owner.telephone),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = new_owner.insert(&self.db).await?;
        Ok(Owner::from(result))
    }

    async fn update(&self, id: i32, owner: Owner) -> Result<Owner, DomainError> {
        let existing = OwnerEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let now = chrono::Utc::now().to_rfc3339();

        let mut active: ActiveModel = existing.into();
        active.first_name = Set(owner.first_name);
        active.last_name = Set(owner.last_name);
        active.address = Set(owner.address);
        active.city = Set(owner.city);
        active.telephone = Set(owner.telephone);
        active.updated_at = Set(now);

        let result = active.update(&self.db).await?;
        self.to_owner_dto(result).await
    }

    async fn save_pet(&self, owner_id: i32, pet: Pet) -> Result<Pet, DomainError> {
        let pet_type = pet
            .pet_type
            .clone()
            .ok_or_else(|| DomainError::InvalidArgument("pet type is required".to_string()))?;

        let now = chrono::Utc::now().to_rfc3339();

        let result = match pet.id {
            None => {
                let new_pet = pet::ActiveModel {
                    owner_id: Set(owner_id),
                    type_id: Set(pet_type.id),
                    name: Set(pet.name),
                    birth_date: Set(pet.birth_date),
                    created_at: Set(now.clone()),
                    updated_at: Set(now),
                    ..Default::default()
                };
                new_pet.insert(&self.db).await?
            }
            Some(id) => {
                let existing = pet::Entity::find_by_id(id)
                    .filter(pet::Column::OwnerId.eq(owner_id))
                    .one(&self.db)
                    .await?
                    .ok_or(DomainError::NotFound)?;

                let mut active: pet::ActiveModel = existing.into();
                active.type_id = Set(pet_type.id);
                active.name = Set(pet.name);
                active.birth_date = Set(pet.birth_date);
                active.updated_at = Set(now);
                active.update(&self.db).await?
            }
        };

        let mut saved = Pet::from(result);
        saved.pet_type = Some(pet_type);
        Ok(saved)
    }

    async fn record_visit(&self, pet_id: i32, visit: Visit) -> Result<Visit, DomainError> {
        pet::Entity::find_by_id(pet_id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let now = chrono::Utc::now().to_rfc3339();

        let new_visit = visit::ActiveModel {
            pet_id: Set(pet_id),
            visit_date: Set(visit.visit_date),
            description: Set(visit.description),
            created_at: Set(now),
            ..Default::default()
        };

        let result = new_visit.insert(&self.db).await?;
        Ok(Visit::from(result))
    }
}
