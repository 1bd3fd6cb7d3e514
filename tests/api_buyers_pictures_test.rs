//! Buyer endpoints (admin-guarded) and apartment picture ordering

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{Value, json};

mod common;
use common::{admin_token, data, spawn_app, user_token};

fn buyer_payload(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "phone": "+1234567890",
        "status": "INTERESTED",
        "interested_apartment_ids": ["apt1"],
        "budget": 500000.0,
        "notes": "prefers garden access"
    })
}

fn jpeg_part(name: &str) -> Part {
    Part::bytes(b"jpeg-bytes".to_vec())
        .file_name(name)
        .mime_type("image/jpeg")
}

#[tokio::test]
async fn buyer_create_is_public_but_reads_are_admin_only() {
    let app = spawn_app().await;

    let created = app
        .server
        .post("/api/buyers")
        .json(&buyer_payload("John Doe", "john@example.com"))
        .await;
    created.assert_status(StatusCode::CREATED);

    // anonymous and plain-user reads are rejected
    app.server
        .get("/api/buyers")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    let token = user_token(&app, "agent@example.com").await;
    app.server
        .get("/api/buyers")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let admin = admin_token(&app).await;
    let listed = app
        .server
        .get("/api/buyers")
        .authorization_bearer(&admin)
        .await;
    listed.assert_status_ok();
    assert_eq!(data(&listed.json::<Value>()).as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn buyer_filters() {
    let app = spawn_app().await;
    let admin = admin_token(&app).await;

    app.server
        .post("/api/buyers")
        .json(&buyer_payload("John", "john@example.com"))
        .await
        .assert_status(StatusCode::CREATED);

    let by_status = app
        .server
        .get("/api/buyers/status/INTERESTED")
        .authorization_bearer(&admin)
        .await;
    by_status.assert_status_ok();
    assert_eq!(data(&by_status.json::<Value>()).as_array().unwrap().len(), 1);

    let by_apartment = app
        .server
        .get("/api/buyers/apartment/apt1")
        .authorization_bearer(&admin)
        .await;
    by_apartment.assert_status_ok();
    assert_eq!(
        data(&by_apartment.json::<Value>()).as_array().unwrap().len(),
        1
    );

    let none = app
        .server
        .get("/api/buyers/apartment/apt9")
        .authorization_bearer(&admin)
        .await;
    assert_eq!(data(&none.json::<Value>()).as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn buyer_date_range_query() {
    let app = spawn_app().await;
    let admin = admin_token(&app).await;

    app.server
        .post("/api/buyers")
        .json(&buyer_payload("John", "john@example.com"))
        .await
        .assert_status(StatusCode::CREATED);

    let hits = app
        .server
        .get("/api/buyers/date-range?start_date=2000-01-01T00:00:00Z&end_date=2100-01-01T00:00:00Z")
        .authorization_bearer(&admin)
        .await;
    hits.assert_status_ok();
    assert_eq!(data(&hits.json::<Value>()).as_array().unwrap().len(), 1);

    let misses = app
        .server
        .get("/api/buyers/date-range?start_date=2000-01-01T00:00:00Z&end_date=2001-01-01T00:00:00Z")
        .authorization_bearer(&admin)
        .await;
    assert_eq!(data(&misses.json::<Value>()).as_array().unwrap().len(), 0);

    let malformed = app
        .server
        .get("/api/buyers/date-range?start_date=yesterday&end_date=tomorrow")
        .authorization_bearer(&admin)
        .await;
    malformed.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn picture_upload_and_reorder() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;

    let form = MultipartForm::new()
        .add_part("files", jpeg_part("a.jpg"))
        .add_part("files", jpeg_part("b.jpg"))
        .add_part("files", jpeg_part("c.jpg"));
    let uploaded = app
        .server
        .post("/api/apartments/apt1/pictures")
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    uploaded.assert_status(StatusCode::CREATED);
    let pictures = data(&uploaded.json::<Value>());
    let ids: Vec<String> = pictures
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), 3);

    // reorder [id2, id1, id3] -> orders 0, 1, 2
    let reordered = app
        .server
        .put("/api/apartments/apt1/pictures/reorder")
        .authorization_bearer(&token)
        .json(&json!({ "picture_ids": [ids[1], ids[0], ids[2]] }))
        .await;
    reordered.assert_status_ok();
    let pictures = data(&reordered.json::<Value>());
    let ordered_ids: Vec<&str> = pictures
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ordered_ids, vec![ids[1].as_str(), ids[0].as_str(), ids[2].as_str()]);
    let orders: Vec<i64> = pictures
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[tokio::test]
async fn picture_delete_removes_blob() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;

    let form = MultipartForm::new().add_part("files", jpeg_part("a.jpg"));
    let uploaded = app
        .server
        .post("/api/apartments/apt1/pictures")
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    let id = data(&uploaded.json::<Value>())[0]["id"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(app.storage.object_count().await, 1);

    let deleted = app
        .server
        .delete(&format!("/api/pictures/{id}"))
        .authorization_bearer(&token)
        .await;
    deleted.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(app.storage.object_count().await, 0);

    let listed = app.server.get("/api/apartments/apt1/pictures").await;
    listed.assert_status_ok();
    assert_eq!(data(&listed.json::<Value>()).as_array().unwrap().len(), 0);
}
