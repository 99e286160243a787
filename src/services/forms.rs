//! Form binding and validation - pure business logic without HTTP layer
//!
//! Field failures are collected as per-field error codes rather than raised
//! as errors; the handler echoes them back so the client can redisplay the
//! form.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Owner, Pet, PetType, Visit};

pub const CODE_REQUIRED: &str = "required";
pub const CODE_TYPE_MISMATCH: &str = "typeMismatch";
pub const CODE_DUPLICATE: &str = "duplicate";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validation failure attached to one submitted field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
}

impl FieldError {
    fn new(field: &str, code: &str) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
        }
    }
}

/// Submitted pet fields, all textual, all optional at the binding layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetForm {
    pub name: Option<String>,
    pub r#type: Option<String>,
    pub birth_date: Option<String>,
}

/// Bind a submitted pet form against the owner it belongs to.
///
/// `pet_id` is `None` on creation and the target pet's id on update; the
/// duplicate-name check differs between the two, matching the lookup
/// semantics on [`Owner`].
pub fn bind_pet_form(
    form: &PetForm,
    types: &[PetType],
    owner: &Owner,
    pet_id: Option<i32>,
) -> Result<Pet, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = form.name.as_deref().unwrap_or_default().trim().to_string();
    if name.is_empty() {
        errors.push(FieldError::new("name", CODE_REQUIRED));
    } else {
        let duplicate = match pet_id {
            // On creation the submitted pet is itself new, so new pets are
            // excluded from the scan or it would collide with itself.
            None => owner.pet_by_name(&name, true).is_some(),
            Some(id) => owner
                .pet_by_name(&name, false)
                .is_some_and(|existing| existing.id != Some(id)),
        };
        if duplicate {
            errors.push(FieldError::new("name", CODE_DUPLICATE));
        }
    }

    let pet_type = match form.r#type.as_deref() {
        None | Some("") => {
            errors.push(FieldError::new("type", CODE_REQUIRED));
            None
        }
        Some(requested) => match types.iter().find(|t| t.name == requested) {
            Some(t) => Some(t.clone()),
            None => {
                errors.push(FieldError::new("type", CODE_TYPE_MISMATCH));
                None
            }
        },
    };

    let birth_date = match form.birth_date.as_deref() {
        None | Some("") => {
            errors.push(FieldError::new("birth_date", CODE_REQUIRED));
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) if date > Local::now().date_naive() => {
                errors.push(FieldError::new("birth_date", CODE_TYPE_MISMATCH));
                None
            }
            Ok(date) => Some(date.format(DATE_FORMAT).to_string()),
            Err(_) => {
                errors.push(FieldError::new("birth_date", CODE_TYPE_MISMATCH));
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Pet {
        id: pet_id,
        name,
        birth_date,
        pet_type,
        visits: Vec::new(),
    })
}

/// Submitted owner fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnerForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub telephone: Option<String>,
}

pub fn bind_owner_form(form: &OwnerForm) -> Result<Owner, Vec<FieldError>> {
    let mut errors = Vec::new();

    let mut required = |field: &str, value: &Option<String>| -> String {
        match value.as_deref() {
            Some(v) if !v.trim().is_empty() => v.to_string(),
            _ => {
                errors.push(FieldError::new(field, CODE_REQUIRED));
                String::new()
            }
        }
    };

    let first_name = required("first_name", &form.first_name);
    let last_name = required("last_name", &form.last_name);
    let address = required("address", &form.address);
    let city = required("city", &form.city);
    let telephone = required("telephone", &form.telephone);

    if !telephone.is_empty()
        && (telephone.len() > 10 || !telephone.chars().all(|c| c.is_ascii_digit()))
    {
        errors.push(FieldError::new("telephone", CODE_TYPE_MISMATCH));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Owner {
        id: None,
        first_name,
        last_name,
        address,
        city,
        telephone,
        pets: Vec::new(),
    })
}

/// Submitted visit fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitForm {
    pub visit_date: Option<String>,
    pub description: Option<String>,
}

/// Bind a visit form. The date defaults to today when omitted; visits
/// cannot be recorded for future dates.
pub fn bind_visit_form(form: &VisitForm) -> Result<Visit, Vec<FieldError>> {
    let mut errors = Vec::new();

    let description = form.description.clone().unwrap_or_default();
    if description.trim().is_empty() {
        errors.push(FieldError::new("description", CODE_REQUIRED));
    }

    let visit_date = match form.visit_date.as_deref() {
        None | Some("") => Some(Local::now().date_naive().format(DATE_FORMAT).to_string()),
        Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) if date > Local::now().date_naive() => {
                errors.push(FieldError::new("visit_date", CODE_TYPE_MISMATCH));
                None
            }
            Ok(date) => Some(date.format(DATE_FORMAT).to_string()),
            Err(_) => {
                errors.push(FieldError::new("visit_date", CODE_TYPE_MISMATCH));
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Visit {
        id: None,
        visit_date: visit_date.unwrap_or_default(),
        description,
    })
}
