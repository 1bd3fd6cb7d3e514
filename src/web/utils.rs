//! Multipart parsing helpers
//!
//! Create/update endpoints accept an entity JSON part plus an optional
//! `model` file part; image endpoints accept one or many file parts with
//! an optional `file_name` override. These helpers turn the raw multipart
//! stream into typed pieces and reject malformed payloads early.

use axum::extract::Multipart;
use axum::extract::multipart::Field;
use axum::response::Response;
use serde::de::DeserializeOwned;

use crate::services::UploadedFile;
use crate::web::responses::bad_request;

/// An entity JSON part plus an optional model file
pub struct EntityWithModel<T> {
    pub entity: T,
    pub model: Option<UploadedFile>,
}

/// Parse a multipart body of the form `{entity_field}` (JSON) + optional
/// `model` (file). Unknown parts are ignored.
pub async fn parse_entity_multipart<T: DeserializeOwned>(
    mut multipart: Multipart,
    entity_field: &str,
) -> Result<EntityWithModel<T>, Response> {
    let mut entity_json: Option<String> = None;
    let mut model: Option<UploadedFile> = None;

    while let Some(field) = next_field(&mut multipart).await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == entity_field {
            entity_json = Some(read_text(field).await?);
        } else if name == "model" {
            model = Some(read_file(field).await?);
        }
    }

    let json = entity_json
        .ok_or_else(|| bad_request(&format!("missing '{entity_field}' part")))?;
    let entity = serde_json::from_str(&json)
        .map_err(|e| bad_request(&format!("invalid '{entity_field}' payload: {e}")))?;

    Ok(EntityWithModel { entity, model })
}

/// Files plus the optional `file_name` override for single-file uploads
pub struct FileUploadParts {
    pub files: Vec<UploadedFile>,
    pub file_name: Option<String>,
}

/// Parse a multipart body carrying `file`/`files` parts and an optional
/// `file_name` text part.
pub async fn parse_files_multipart(mut multipart: Multipart) -> Result<FileUploadParts, Response> {
    let mut files = Vec::new();
    let mut file_name: Option<String> = None;

    while let Some(field) = next_field(&mut multipart).await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "file" | "files" => files.push(read_file(field).await?),
            "file_name" => file_name = Some(read_text(field).await?),
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(bad_request("no file part supplied"));
    }
    Ok(FileUploadParts { files, file_name })
}

async fn next_field(multipart: &mut Multipart) -> Result<Option<Field<'_>>, Response> {
    multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&format!("malformed multipart body: {e}")))
}

async fn read_text(field: Field<'_>) -> Result<String, Response> {
    field
        .text()
        .await
        .map_err(|e| bad_request(&format!("unreadable multipart field: {e}")))
}

async fn read_file(field: Field<'_>) -> Result<UploadedFile, Response> {
    let file_name = field.file_name().unwrap_or("upload.bin").to_string();
    let content_type = field.content_type().map(str::to_string);
    let data = field
        .bytes()
        .await
        .map_err(|e| bad_request(&format!("unreadable multipart field: {e}")))?;
    Ok(UploadedFile {
        file_name,
        content_type,
        data,
    })
}
