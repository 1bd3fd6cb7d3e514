//! Floor CRUD, hotspots, and the floor-image sub-resource

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{Value, json};

mod common;
use common::{data, spawn_app, user_token};

fn floor_payload(name: &str) -> Value {
    json!({
        "name": name,
        "level": 1,
        "floor_number": 1,
        "description": "test floor",
        "total_apartments": 4,
        "area": 320.0
    })
}

async fn create_floor(app: &common::TestApp, token: &str, name: &str) -> String {
    let created = app
        .server
        .post("/api/floors/simple")
        .authorization_bearer(token)
        .json(&floor_payload(name))
        .await;
    created.assert_status(StatusCode::CREATED);
    data(&created.json::<Value>())["id"]
        .as_str()
        .unwrap()
        .to_string()
}

fn png_part(bytes: &[u8], file_name: &str) -> Part {
    Part::bytes(bytes.to_vec())
        .file_name(file_name)
        .mime_type("image/png")
}

#[tokio::test]
async fn floor_crud_round_trip() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;

    let id = create_floor(&app, &token, "First Floor").await;

    let fetched = app.server.get(&format!("/api/floors/{id}")).await;
    fetched.assert_status_ok();
    let floor = data(&fetched.json::<Value>());
    assert_eq!(floor["name"], "First Floor");
    assert_eq!(floor["apartment_ids"], json!([]));

    let updated = app
        .server
        .put(&format!("/api/floors/{id}/simple"))
        .authorization_bearer(&token)
        .json(&json!({ "description": "renovated" }))
        .await;
    updated.assert_status_ok();
    let updated = data(&updated.json::<Value>());
    assert_eq!(updated["description"], "renovated");
    assert_eq!(updated["name"], "First Floor");

    let deleted = app
        .server
        .delete(&format!("/api/floors/{id}"))
        .authorization_bearer(&token)
        .await;
    deleted.assert_status(StatusCode::NO_CONTENT);
    app.server
        .get(&format!("/api/floors/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn hotspot_replacement_endpoint() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;
    let id = create_floor(&app, &token, "First Floor").await;

    let response = app
        .server
        .put(&format!("/api/floors/{id}/hotspots"))
        .authorization_bearer(&token)
        .json(&json!({
            "top_view_hotspots": [
                { "apartment_id": "a1", "x": 12.5, "y": 40.0, "width": 8.0, "height": 6.0 }
            ],
            "angle_hotspots": {
                "north": [ { "apartment_id": "a2", "x": 55.0, "y": 60.0 } ]
            }
        }))
        .await;
    response.assert_status_ok();

    let floor = data(&response.json::<Value>());
    assert_eq!(floor["top_view_hotspots"][0]["apartment_id"], "a1");
    assert_eq!(floor["angle_hotspots"]["north"][0]["x"], 55.0);

    let missing = app
        .server
        .put("/api/floors/ghost/hotspots")
        .authorization_bearer(&token)
        .json(&json!({}))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn floor_image_upload_list_and_details() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;
    let id = create_floor(&app, &token, "First Floor").await;

    let form = MultipartForm::new()
        .add_part("files", png_part(b"img-b", "b.png"))
        .add_part("files", png_part(b"img-a", "a.png"))
        .add_part("files", png_part(b"not-an-image", "model.glb"));
    let uploaded = app
        .server
        .post(&format!("/api/floors/{id}/images"))
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    uploaded.assert_status_ok();
    let body = data(&uploaded.json::<Value>());
    assert_eq!(body["uploaded_count"], 3);

    // listing filters to image extensions and sorts by name
    let listed = app.server.get(&format!("/api/floors/{id}/images")).await;
    listed.assert_status_ok();
    let urls = data(&listed.json::<Value>());
    let urls = urls.as_array().unwrap();
    assert_eq!(urls.len(), 2);
    assert!(urls[0].as_str().unwrap().contains("a.png"));
    assert!(urls[1].as_str().unwrap().contains("b.png"));

    let details = app
        .server
        .get(&format!("/api/floors/{id}/images/details"))
        .await;
    details.assert_status_ok();
    let infos = data(&details.json::<Value>());
    let infos = infos.as_array().unwrap();
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0]["name"], "a.png");
    assert_eq!(infos[0]["is_image"], true);
    assert!(infos[0]["download_url"].as_str().is_some());
}

#[tokio::test]
async fn single_upload_honors_file_name_override() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;
    let id = create_floor(&app, &token, "First Floor").await;

    let form = MultipartForm::new()
        .add_part("file", png_part(b"img", "raw-scan.png"))
        .add_text("file_name", "plan.png");
    let uploaded = app
        .server
        .post(&format!("/api/floors/{id}/images"))
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    uploaded.assert_status_ok();

    let key = format!("floors/{id}/plan.png");
    assert!(app.storage.contents(&key).await.is_some());
}

#[tokio::test]
async fn rename_and_delete_floor_images() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;
    let id = create_floor(&app, &token, "First Floor").await;

    let form = MultipartForm::new().add_part("file", png_part(b"img", "old.png"));
    app.server
        .post(&format!("/api/floors/{id}/images"))
        .authorization_bearer(&token)
        .multipart(form)
        .await
        .assert_status_ok();

    let renamed = app
        .server
        .put(&format!(
            "/api/floors/{id}/images/old.png/rename?new_file_name=new.png"
        ))
        .authorization_bearer(&token)
        .await;
    renamed.assert_status_ok();
    assert_eq!(data(&renamed.json::<Value>())["name"], "new.png");
    assert!(app
        .storage
        .contents(&format!("floors/{id}/old.png"))
        .await
        .is_none());

    let deleted = app
        .server
        .delete(&format!("/api/floors/{id}/images/new.png"))
        .authorization_bearer(&token)
        .await;
    deleted.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(app.storage.object_count().await, 0);
}

#[tokio::test]
async fn renaming_a_missing_image_fails_without_writes() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;
    let id = create_floor(&app, &token, "First Floor").await;

    let response = app
        .server
        .put(&format!(
            "/api/floors/{id}/images/ghost.png/rename?new_file_name=new.png"
        ))
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(app.storage.object_count().await, 0);
}

#[tokio::test]
async fn multipart_floor_create_with_model() {
    let app = spawn_app().await;
    let token = user_token(&app, "agent@example.com").await;

    let form = MultipartForm::new()
        .add_text("floor", floor_payload("Penthouse").to_string())
        .add_part(
            "model",
            Part::bytes(b"glTF".to_vec())
                .file_name("floor.glb")
                .mime_type("model/gltf-binary"),
        );
    let created = app
        .server
        .post("/api/floors")
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    created.assert_status(StatusCode::CREATED);

    let floor = data(&created.json::<Value>());
    assert!(floor["model3d_url"].as_str().unwrap().contains("models/"));
}
