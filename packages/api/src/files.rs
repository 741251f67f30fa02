//! Uploaded documents.
//!
//! Listing and delete are server functions. Upload, download and preview carry
//! file bytes, so they are plain axum routes mounted by the web server next to
//! the Dioxus application; all of them rely on the same session layer.

use dioxus::prelude::*;
use model::{ApiMessage, FileItem};

#[cfg(feature = "server")]
use crate::{auth, backend::path_segment, error::ProxyError};

#[cfg(feature = "server")]
#[get("/api/files", session: tower_sessions::Session)]
pub async fn list_files() -> Result<Vec<FileItem>, ServerFnError> {
    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;

    client
        .get_json("/files", Some(&auth.token), "Failed to fetch files")
        .await
        .map_err(ProxyError::into_server_fn)
}

#[cfg(not(feature = "server"))]
#[get("/api/files")]
pub async fn list_files() -> Result<Vec<FileItem>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/files/delete", session: tower_sessions::Session)]
pub async fn delete_file(id: String) -> Result<ApiMessage, ServerFnError> {
    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let id = path_segment(&id).map_err(ProxyError::into_server_fn)?;

    client
        .delete(&format!("/files/{id}"), Some(&auth.token), "Failed to delete file")
        .await
        .map_err(ProxyError::into_server_fn)?;
    tracing::info!(file = %id, user = %auth.user.email, "file deleted");

    Ok(ApiMessage::new("File deleted successfully"))
}

#[cfg(not(feature = "server"))]
#[post("/api/files/delete")]
pub async fn delete_file(id: String) -> Result<ApiMessage, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Multipart upload route; the file travels in the `file` field.
pub const UPLOAD_ROUTE: &str = "/api/files/upload";

/// Largest upload request body the upload route accepts.
pub const UPLOAD_BODY_LIMIT: usize = 50 * 1024 * 1024;

/// Browser-facing URL of the download route for a file.
pub fn download_url(id: &str) -> String {
    format!("/api/files/download/{id}")
}

/// Browser-facing URL of the inline preview route for a file.
pub fn preview_url(id: &str) -> String {
    format!("/api/files/preview/{id}")
}

/// Body limit layer for [`UPLOAD_ROUTE`], replacing axum's 2 MB default.
#[cfg(feature = "server")]
pub fn upload_body_limit() -> axum::extract::DefaultBodyLimit {
    axum::extract::DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)
}

/// A file taken from a multipart request.
#[cfg(feature = "server")]
#[derive(Debug, Clone)]
pub struct UploadPart {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Pull the `file` field out of a multipart body. Other fields are skipped.
#[cfg(feature = "server")]
pub async fn read_file_part(
    mut multipart: axum::extract::Multipart,
) -> Result<UploadPart, ProxyError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .filter(|t| !t.is_empty())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?.to_vec();
        if filename.trim().is_empty() || bytes.is_empty() {
            return Err(ProxyError::MissingFile);
        }
        return Ok(UploadPart {
            filename,
            content_type,
            bytes,
        });
    }
    Err(ProxyError::MissingFile)
}

/// Forward the `file` field of `multipart` to the backend upload endpoint.
#[cfg(feature = "server")]
pub async fn relay_upload(
    client: &crate::backend::BackendClient,
    token: &str,
    multipart: axum::extract::Multipart,
) -> Result<FileItem, ProxyError> {
    let part = read_file_part(multipart).await?;
    let size = part.bytes.len();
    let file: FileItem = client
        .upload(
            "/files/upload",
            Some(token),
            &part.filename,
            &part.content_type,
            part.bytes,
            "Failed to upload file",
        )
        .await?;
    tracing::info!(filename = %part.filename, size, "file uploaded");
    Ok(file)
}

/// `POST /api/files/upload`
#[cfg(feature = "server")]
pub async fn upload_file(
    session: tower_sessions::Session,
    multipart: axum::extract::Multipart,
) -> Result<axum::Json<FileItem>, ProxyError> {
    let (client, auth) = auth::connect(&session).await?;
    relay_upload(client, &auth.token, multipart)
        .await
        .map(axum::Json)
        .map_err(|e| {
            tracing::warn!(user = %auth.user.email, error = %e.detail(), "file upload failed");
            e
        })
}

/// `GET /api/files/download/{id}`
#[cfg(feature = "server")]
pub async fn download_file(
    axum::extract::Path(id): axum::extract::Path<String>,
    session: tower_sessions::Session,
) -> axum::response::Response {
    relay(&session, &id, "download", "attachment").await
}

/// `GET /api/files/preview/{id}`
#[cfg(feature = "server")]
pub async fn preview_file(
    axum::extract::Path(id): axum::extract::Path<String>,
    session: tower_sessions::Session,
) -> axum::response::Response {
    relay(&session, &id, "preview", "inline").await
}

#[cfg(feature = "server")]
async fn relay(
    session: &tower_sessions::Session,
    id: &str,
    action: &str,
    default_disposition: &str,
) -> axum::response::Response {
    use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
    use axum::response::IntoResponse;

    match fetch(session, id, action).await {
        Ok(file) => {
            let content_type = file
                .content_type
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let disposition = file
                .content_disposition
                .unwrap_or_else(|| default_disposition.to_string());
            (
                [(CONTENT_TYPE, content_type), (CONTENT_DISPOSITION, disposition)],
                file.bytes,
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(file = %id, action, error = %e.detail(), "file relay failed");
            e.into_response()
        }
    }
}

#[cfg(feature = "server")]
async fn fetch(
    session: &tower_sessions::Session,
    id: &str,
    action: &str,
) -> Result<crate::backend::Download, ProxyError> {
    let (client, auth) = auth::connect(session).await?;
    let id = path_segment(id)?;
    client
        .download(
            &format!("/files/{action}/{id}"),
            Some(&auth.token),
            "File not found",
        )
        .await
}
