//! Apartment CRUD and filter endpoints

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{Value, json};

mod common;
use common::{data, spawn_app, user_token};

fn apartment_payload(lot: &str, price: &str, status: &str) -> Value {
    json!({
        "floor_id": "f1",
        "lot_number": lot,
        "unit_type": "2 Bedroom",
        "area": 85.5,
        "price": price,
        "status": status,
        "description": "test apartment"
    })
}

#[tokio::test]
async fn create_and_fetch_round_trip() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;

    let created = app
        .server
        .post("/api/apartments/simple")
        .authorization_bearer(&token)
        .json(&apartment_payload("101", "250000", "AVAILABLE"))
        .await;
    created.assert_status(StatusCode::CREATED);
    let apartment = data(&created.json::<Value>());
    let id = apartment["id"].as_str().unwrap();
    assert_eq!(apartment["lot_number"], "101");
    assert!(apartment["created_at"].as_str().is_some());

    let fetched = app.server.get(&format!("/api/apartments/{id}")).await;
    fetched.assert_status_ok();
    let fetched = data(&fetched.json::<Value>());
    assert_eq!(fetched["lot_number"], "101");
    assert_eq!(fetched["price"], apartment["price"]);
    assert_eq!(fetched["status"], "AVAILABLE");
}

#[tokio::test]
async fn mutations_require_a_token() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/apartments/simple")
        .json(&apartment_payload("101", "250000", "AVAILABLE"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    // reads stay public
    let list = app.server.get("/api/apartments").await;
    list.assert_status_ok();
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;

    let created = app
        .server
        .post("/api/apartments/simple")
        .authorization_bearer(&token)
        .json(&apartment_payload("101", "250000", "AVAILABLE"))
        .await;
    let id = data(&created.json::<Value>())["id"]
        .as_str()
        .unwrap()
        .to_string();

    let updated = app
        .server
        .put(&format!("/api/apartments/{id}/simple"))
        .authorization_bearer(&token)
        .json(&json!({ "status": "SOLD" }))
        .await;
    updated.assert_status_ok();
    let updated = data(&updated.json::<Value>());
    assert_eq!(updated["status"], "SOLD");
    assert_eq!(updated["lot_number"], "101");
    assert_eq!(updated["area"], 85.5);
}

#[tokio::test]
async fn status_and_price_filters() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;

    for (lot, price, status) in [
        ("101", "100000", "AVAILABLE"),
        ("102", "200000", "SOLD"),
        ("103", "300000", "AVAILABLE"),
    ] {
        app.server
            .post("/api/apartments/simple")
            .authorization_bearer(&token)
            .json(&apartment_payload(lot, price, status))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let available = app.server.get("/api/apartments/status/AVAILABLE").await;
    available.assert_status_ok();
    assert_eq!(data(&available.json::<Value>()).as_array().unwrap().len(), 2);

    let invalid = app.server.get("/api/apartments/status/BOGUS").await;
    invalid.assert_status(StatusCode::BAD_REQUEST);

    // price range is inclusive on both ends
    let in_range = app
        .server
        .get("/api/apartments/price?min_price=200000&max_price=300000")
        .await;
    in_range.assert_status_ok();
    let hits = data(&in_range.json::<Value>());
    let lots: Vec<&str> = hits
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["lot_number"].as_str().unwrap())
        .collect();
    assert_eq!(hits.as_array().unwrap().len(), 2);
    assert!(lots.contains(&"102") && lots.contains(&"103"));
}

#[tokio::test]
async fn negative_price_is_a_bad_request() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;

    let response = app
        .server
        .post("/api/apartments/simple")
        .authorization_bearer(&token)
        .json(&apartment_payload("101", "-5", "AVAILABLE"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn multipart_create_uploads_the_model() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;

    let form = MultipartForm::new()
        .add_text(
            "apartment",
            apartment_payload("101", "250000", "AVAILABLE").to_string(),
        )
        .add_part(
            "model",
            Part::bytes(b"glTF-binary".to_vec())
                .file_name("unit.glb")
                .mime_type("model/gltf-binary"),
        );

    let created = app
        .server
        .post("/api/apartments")
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    created.assert_status(StatusCode::CREATED);

    let apartment = data(&created.json::<Value>());
    let model_url = apartment["model3d_url"].as_str().unwrap();
    assert!(model_url.contains("models/"));
    assert!(model_url.ends_with(".glb"));
    assert_eq!(app.storage.object_count().await, 1);
}

#[tokio::test]
async fn delete_removes_document_and_model_blob() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;

    let form = MultipartForm::new()
        .add_text(
            "apartment",
            apartment_payload("101", "250000", "AVAILABLE").to_string(),
        )
        .add_part(
            "model",
            Part::bytes(b"glTF-binary".to_vec())
                .file_name("unit.glb")
                .mime_type("model/gltf-binary"),
        );
    let created = app
        .server
        .post("/api/apartments")
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    let id = data(&created.json::<Value>())["id"]
        .as_str()
        .unwrap()
        .to_string();

    let deleted = app
        .server
        .delete(&format!("/api/apartments/{id}"))
        .authorization_bearer(&token)
        .await;
    deleted.assert_status(StatusCode::NO_CONTENT);

    assert_eq!(app.storage.object_count().await, 0);
    let gone = app.server.get(&format!("/api/apartments/{id}")).await;
    gone.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_apartment_is_not_found() {
    let app = spawn_app().await;
    let response = app.server.get("/api/apartments/does-not-exist").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
