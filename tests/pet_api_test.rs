use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use tower::util::ServiceExt; // for `oneshot`

use petclinic::models::{owner, pet};
use petclinic::{AppState, api, db};

// Helper to create a test app state over an in-memory database
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

// Helper to create a test owner
async fn create_test_owner(db: &DatabaseConnection) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let model = owner::ActiveModel {
        first_name: Set("George".to_string()),
        last_name: Set("Franklin".to_string()),
        address: Set("110 W. Liberty St.".to_string()),
        city: Set("Madison".to_string()),
        telephone: Set("6085551023".to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = owner::Entity::insert(model)
        .exec(db)
        .await
        .expect("Failed to create owner");
    res.last_insert_id
}

// Helper to create a test pet (type 6 = hamster, seeded by the migrations)
async fn create_test_pet(db: &DatabaseConnection, owner_id: i32, name: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let model = pet::ActiveModel {
        owner_id: Set(owner_id),
        type_id: Set(6),
        name: Set(name.to_string()),
        birth_date: Set(Some("2015-02-12".to_string())),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = pet::Entity::insert(model)
        .exec(db)
        .await
        .expect("Failed to create pet");
    res.last_insert_id
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn has_field_error(body: &serde_json::Value, field: &str, code: &str) -> bool {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .any(|e| e["field"] == field && e["code"] == code)
        })
        .unwrap_or(false)
}

#[tokio::test]
async fn test_create_pet_success_redirects_to_owner() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let app = api::api_router(state.clone());

    let req = json_request(
        "POST",
        &format!("/owners/{}/pets", owner_id),
        serde_json::json!({
            "name": "Betty",
            "type": "hamster",
            "birth_date": "2015-02-12"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        format!("/api/owners/{}", owner_id)
    );

    // The pet was actually persisted on the owner
    let saved = state.owners.find_by_id(owner_id).await.unwrap().unwrap();
    let betty = saved.pet_by_name("Betty", false).expect("Betty saved");
    assert!(!betty.is_new());
    assert_eq!(betty.pet_type.as_ref().unwrap().name, "hamster");
}

#[tokio::test]
async fn test_create_pet_missing_type() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let app = api::api_router(state);

    let req = json_request(
        "POST",
        &format!("/owners/{}/pets", owner_id),
        serde_json::json!({
            "name": "Betty",
            "birth_date": "2015-02-12"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(has_field_error(&body, "type", "required"));
    // The submitted pet is echoed back for form redisplay
    assert_eq!(body["pet"]["name"], "Betty");
}

#[tokio::test]
async fn test_create_pet_unknown_type() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let app = api::api_router(state);

    let req = json_request(
        "POST",
        &format!("/owners/{}/pets", owner_id),
        serde_json::json!({
            "name": "Betty",
            "type": "unicorn",
            "birth_date": "2015-02-12"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(has_field_error(&body, "type", "typeMismatch"));
}

#[tokio::test]
async fn test_create_pet_future_birth_date() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let app = api::api_router(state);

    let tomorrow = chrono::Local::now().date_naive() + chrono::Duration::days(1);
    let req = json_request(
        "POST",
        &format!("/owners/{}/pets", owner_id),
        serde_json::json!({
            "name": "Betty",
            "type": "hamster",
            "birth_date": tomorrow.format("%Y-%m-%d").to_string()
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(has_field_error(&body, "birth_date", "typeMismatch"));
}

#[tokio::test]
async fn test_create_pet_empty_name() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let app = api::api_router(state);

    let req = json_request(
        "POST",
        &format!("/owners/{}/pets", owner_id),
        serde_json::json!({
            "name": "",
            "type": "hamster",
            "birth_date": "2015-02-12"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(has_field_error(&body, "name", "required"));
}

#[tokio::test]
async fn test_create_pet_invalid_date_format() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let app = api::api_router(state);

    let req = json_request(
        "POST",
        &format!("/owners/{}/pets", owner_id),
        serde_json::json!({
            "name": "Betty",
            "type": "hamster",
            "birth_date": "invalid-date"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(has_field_error(&body, "birth_date", "typeMismatch"));
}

#[tokio::test]
async fn test_create_pet_empty_birth_date() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let app = api::api_router(state);

    let req = json_request(
        "POST",
        &format!("/owners/{}/pets", owner_id),
        serde_json::json!({
            "name": "Betty",
            "type": "hamster",
            "birth_date": ""
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(has_field_error(&body, "birth_date", "required"));
}

#[tokio::test]
async fn test_create_pet_duplicate_name() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    create_test_pet(state.db(), owner_id, "Max").await;
    let app = api::api_router(state);

    let req = json_request(
        "POST",
        &format!("/owners/{}/pets", owner_id),
        serde_json::json!({
            "name": "Max",
            "type": "hamster",
            "birth_date": "2015-02-12"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(has_field_error(&body, "name", "duplicate"));
}

#[tokio::test]
async fn test_create_pet_padded_name_is_trimmed_and_still_duplicate() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    create_test_pet(state.db(), owner_id, "Max").await;
    let app = api::api_router(state);

    let req = json_request(
        "POST",
        &format!("/owners/{}/pets", owner_id),
        serde_json::json!({
            "name": " Max ",
            "type": "hamster",
            "birth_date": "2015-02-12"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(has_field_error(&body, "name", "duplicate"));
}

#[tokio::test]
async fn test_create_pet_padded_name_is_stored_trimmed() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let app = api::api_router(state.clone());

    let req = json_request(
        "POST",
        &format!("/owners/{}/pets", owner_id),
        serde_json::json!({
            "name": " Betty ",
            "type": "hamster",
            "birth_date": "2015-02-12"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let saved = state.owners.find_by_id(owner_id).await.unwrap().unwrap();
    assert!(saved.pet_by_name("Betty", false).is_some());
    assert!(saved.pet_by_name(" Betty ", false).is_none());
}

#[tokio::test]
async fn test_create_pet_different_name_succeeds() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    create_test_pet(state.db(), owner_id, "Max").await;
    let app = api::api_router(state);

    let req = json_request(
        "POST",
        &format!("/owners/{}/pets", owner_id),
        serde_json::json!({
            "name": "Betty",
            "type": "hamster",
            "birth_date": "2015-02-12"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_create_pet_owner_not_found() {
    let state = setup_test_state().await;
    let app = api::api_router(state);

    let req = json_request(
        "POST",
        "/owners/999/pets",
        serde_json::json!({
            "name": "Betty",
            "type": "hamster",
            "birth_date": "2015-02-12"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_pet() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let pet_id = create_test_pet(state.db(), owner_id, "Max").await;
    let app = api::api_router(state);

    let req = Request::builder()
        .uri(format!("/owners/{}/pets/{}", owner_id, pet_id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["pet"]["name"], "Max");
    assert_eq!(body["pet"]["type"]["name"], "hamster");
}

#[tokio::test]
async fn test_get_pet_not_found() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let app = api::api_router(state);

    let req = Request::builder()
        .uri(format!("/owners/{}/pets/999", owner_id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_pet_success() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let pet_id = create_test_pet(state.db(), owner_id, "Max").await;
    let app = api::api_router(state.clone());

    let req = json_request(
        "PUT",
        &format!("/owners/{}/pets/{}", owner_id, pet_id),
        serde_json::json!({
            "name": "Betty",
            "type": "cat",
            "birth_date": "2015-02-12"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let saved = state.owners.find_by_id(owner_id).await.unwrap().unwrap();
    let updated = saved.pet(pet_id).expect("pet still there");
    assert_eq!(updated.name, "Betty");
    assert_eq!(updated.pet_type.as_ref().unwrap().name, "cat");
}

#[tokio::test]
async fn test_update_pet_keeps_own_name() {
    // Re-submitting a pet under its current name is not a duplicate.
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let pet_id = create_test_pet(state.db(), owner_id, "Max").await;
    let app = api::api_router(state);

    let req = json_request(
        "PUT",
        &format!("/owners/{}/pets/{}", owner_id, pet_id),
        serde_json::json!({
            "name": "Max",
            "type": "hamster",
            "birth_date": "2015-02-12"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_update_pet_duplicate_of_sibling() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let _max = create_test_pet(state.db(), owner_id, "Max").await;
    let jewel = create_test_pet(state.db(), owner_id, "Jewel").await;
    let app = api::api_router(state);

    let req = json_request(
        "PUT",
        &format!("/owners/{}/pets/{}", owner_id, jewel),
        serde_json::json!({
            "name": "Max",
            "type": "hamster",
            "birth_date": "2015-02-12"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(has_field_error(&body, "name", "duplicate"));
}

#[tokio::test]
async fn test_update_pet_future_birth_date() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let pet_id = create_test_pet(state.db(), owner_id, "Max").await;
    let app = api::api_router(state);

    let tomorrow = chrono::Local::now().date_naive() + chrono::Duration::days(1);
    let req = json_request(
        "PUT",
        &format!("/owners/{}/pets/{}", owner_id, pet_id),
        serde_json::json!({
            "name": "Betty",
            "type": "hamster",
            "birth_date": tomorrow.format("%Y-%m-%d").to_string()
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(has_field_error(&body, "birth_date", "typeMismatch"));
}

#[tokio::test]
async fn test_update_pet_not_found() {
    let state = setup_test_state().await;
    let owner_id = create_test_owner(state.db()).await;
    let app = api::api_router(state);

    let req = json_request(
        "PUT",
        &format!("/owners/{}/pets/999", owner_id),
        serde_json::json!({
            "name": "Betty",
            "type": "hamster",
            "birth_date": "2015-02-12"
        }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
