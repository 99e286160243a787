use sea_orm::*;

use crate::models::{owner, pet, visit};

/// Seed a handful of demo owners, pets and visits. No-op when owners
/// already exist so repeated starts do not duplicate data.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let existing = owner::Entity::find().count(db).await?;
    if existing > 0 {
        return Ok(());
    }

    let now = chrono::Utc::now().to_rfc3339();

    let owners = vec![
        ("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023"),
        ("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"),
        ("Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763"),
    ];

    let mut owner_ids = Vec::new();
    for (first_name, last_name, address, city, telephone) in owners {
        let model = owner::ActiveModel {
            first_name: Set(first_name.to_owned()),
            last_name: Set(last_name.to_owned()),
            address: Set(address.to_owned()),
            city: Set(city.to_owned()),
            telephone: Set(telephone.to_owned()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        let res = owner::Entity::insert(model).exec(db).await?;
        owner_ids.push(res.last_insert_id);
    }

    // (owner index, type id, name, birth date) - type ids match db.rs seeds
    let pets = vec![
        (0, 1, "Leo", "2020-09-07"),
        (1, 6, "Basil", "2022-08-06"),
        (2, 2, "Rosy", "2021-04-17"),
        (2, 2, "Jewel", "2021-03-07"),
    ];

    let mut first_pet_id = None;
    for (owner_idx, type_id, name, birth_date) in pets {
        let model = pet::ActiveModel {
            owner_id: Set(owner_ids[owner_idx]),
            type_id: Set(type_id),
            name: Set(name.to_owned()),
            birth_date: Set(Some(birth_date.to_owned())),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        let res = pet::Entity::insert(model).exec(db).await?;
        if first_pet_id.is_none() {
            first_pet_id = Some(res.last_insert_id);
        }
    }

    if let Some(pet_id) = first_pet_id {
        let model = visit::ActiveModel {
            pet_id: Set(pet_id),
            visit_date: Set("2023-01-01".to_owned()),
            description: Set("rabies shot".to_owned()),
            created_at: Set(now),
            ..Default::default()
        };
        visit::Entity::insert(model).exec(db).await?;
    }

    Ok(())
}
