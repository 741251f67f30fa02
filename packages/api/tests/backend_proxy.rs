#![cfg(feature = "server")]
//! `BackendClient` against an in-process stub of the inventory backend.

use api::backend::BackendClient;
use api::error::{ProxyError, INTERNAL_ERROR_MESSAGE, SESSION_EXPIRED_MESSAGE};
use api::files::{relay_upload, upload_body_limit, UPLOAD_ROUTE};
use axum::extract::{DefaultBodyLimit, Multipart, Path};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use model::config::BackendConfig;
use model::{ApiResponse, FileItem, Product, Settings};
use serde_json::json;

const TOKEN: &str = "test-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn products(headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"})));
    }
    (
        StatusCode::OK,
        Json(json!([
            {"id": "p1", "name": "Widget", "description": "Blue", "price": 9.5, "quantity": 3,
             "category": "Tools", "inventory": {"id": "i1", "quantity": 3, "location": "A1"}},
            {"id": "p2", "name": "Gadget", "description": "", "price": 20.0, "quantity": 40,
             "category": "Toys"}
        ])),
    )
}

async fn product(Path(id): Path<String>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": format!("Product with id {id} not found"), "status": 404})),
    )
}

async fn broken() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "<html>upstream down</html>")
}

async fn create_product(Json(body): Json<serde_json::Value>) -> impl IntoResponse {
    let mut created = body;
    created["id"] = json!("p3");
    (StatusCode::CREATED, Json(created))
}

async fn delete_product(headers: HeaderMap) -> StatusCode {
    if authorized(&headers) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::FORBIDDEN
    }
}

async fn settings(Path(id): Path<String>) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "ok",
        "data": {
            "email": format!("{id}@example.com"),
            "firstName": "Ada",
            "lastName": "Lovelace",
            "notificationSettings": {"emailNotifications": false},
            "appearanceSettings": {"theme": "dark", "density": "compact"}
        }
    }))
}

async fn empty_envelope() -> impl IntoResponse {
    Json(json!({"success": false, "message": "nothing yet"}))
}

async fn upload(mut multipart: Multipart) -> impl IntoResponse {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let size = field.bytes().await.map(|b| b.len()).unwrap_or(0);
            return (
                StatusCode::OK,
                Json(json!({"id": "f1", "fileName": name, "size": size, "type": content_type})),
            );
        }
    }
    (StatusCode::BAD_REQUEST, Json(json!({"message": "missing file"})))
}

async fn download(Path(id): Path<String>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"report.pdf\""),
        ],
        format!("%PDF-{id}"),
    )
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/v1/products", get(products).post(create_product))
        .route("/api/v1/products/{id}", get(product).delete(delete_product))
        .route("/api/v1/users", get(broken))
        .route("/api/v1/settings/user/{id}", get(settings))
        .route("/api/v1/dashboard/stats/{id}", get(empty_envelope))
        .route(
            "/api/v1/files/upload",
            post(upload).layer(DefaultBodyLimit::disable()),
        )
        .route("/api/v1/files/download/{id}", get(download))
        .route("/api/v1/files/{id}", delete(delete_product));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// The dashboard's upload route in front of the stub backend, signed in as `TOKEN`.
async fn spawn_upload_route(backend: &str) -> String {
    let backend = client(backend);
    let handler = move |multipart: Multipart| {
        let backend = backend.clone();
        async move { relay_upload(&backend, TOKEN, multipart).await.map(Json) }
    };
    let app = Router::new().route(UPLOAD_ROUTE, post(handler).layer(upload_body_limit()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}{UPLOAD_ROUTE}")
}

fn client(url: &str) -> BackendClient {
    BackendClient::new(&BackendConfig {
        url: url.to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_get_json_sends_bearer_token() {
    let client = client(&spawn_backend().await);
    let products: Vec<Product> = client
        .get_json("/products", Some(TOKEN), "Failed to fetch products")
        .await
        .unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].location(), Some("A1"));
    assert!(products[0].is_low_stock(10));
    assert!(!products[1].is_low_stock(10));
}

#[tokio::test]
async fn test_rejected_token_means_session_expired() {
    let client = client(&spawn_backend().await);
    let err = client
        .get_json::<Vec<Product>>("/products", Some("stale"), "Failed to fetch products")
        .await
        .unwrap_err();
    assert!(matches!(err, ProxyError::Unauthenticated));
    assert_eq!(err.to_string(), SESSION_EXPIRED_MESSAGE);
}

#[tokio::test]
async fn test_backend_message_is_relayed() {
    let client = client(&spawn_backend().await);
    let err = client
        .get_json::<Product>("/products/p9", Some(TOKEN), "Product not found")
        .await
        .unwrap_err();
    assert_eq!(err.status(), 404);
    assert_eq!(err.to_string(), "Product with id p9 not found");
}

#[tokio::test]
async fn test_non_json_error_uses_fallback() {
    let client = client(&spawn_backend().await);
    let err = client
        .get_json::<Vec<model::User>>("/users", Some(TOKEN), "Failed to fetch users")
        .await
        .unwrap_err();
    assert_eq!(err.status(), 502);
    assert_eq!(err.to_string(), "Failed to fetch users");
}

#[tokio::test]
async fn test_unreachable_backend_is_internal_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{addr}"));
    let err = client
        .get_json::<Vec<Product>>("/products", Some(TOKEN), "Failed to fetch products")
        .await
        .unwrap_err();
    assert!(matches!(err, ProxyError::Transport(_)));
    assert_eq!(err.status(), 500);
    assert_eq!(err.to_string(), INTERNAL_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_send_json_and_delete() {
    let client = client(&spawn_backend().await);
    let input = model::ProductInput {
        name: "Gizmo".into(),
        price: 4.25,
        quantity: 2,
        category: "Tools".into(),
        ..Default::default()
    };
    let created: Product = client
        .send_json(
            reqwest::Method::POST,
            "/products",
            Some(TOKEN),
            &input,
            "Failed to create product",
        )
        .await
        .unwrap();
    assert_eq!(created.id, "p3");
    assert_eq!(created.name, "Gizmo");

    client
        .delete("/products/p3", Some(TOKEN), "Failed to delete product")
        .await
        .unwrap();
    let err = client
        .delete("/products/p3", None, "Failed to delete product")
        .await
        .unwrap_err();
    assert_eq!(err.status(), 403);
    assert_eq!(err.to_string(), "Failed to delete product");
}

#[tokio::test]
async fn test_envelope_is_unwrapped() {
    let client = client(&spawn_backend().await);
    let settings: Settings = client
        .get_data("/settings/user/u1", Some(TOKEN), "Failed to fetch settings")
        .await
        .unwrap();
    assert_eq!(settings.email, "u1@example.com");
    assert!(!settings.notification_settings.email_notifications);
    assert_eq!(settings.appearance_settings.theme, model::Theme::Dark);

    let err = client
        .get_data::<model::DashboardStats>("/dashboard/stats/u1", Some(TOKEN), "Failed")
        .await
        .unwrap_err();
    assert!(matches!(err, ProxyError::Decode(_)));

    let envelope: ApiResponse<serde_json::Value> = client
        .get_json("/dashboard/stats/u1", Some(TOKEN), "Failed")
        .await
        .unwrap();
    assert_eq!(envelope.message.as_deref(), Some("nothing yet"));
}

#[tokio::test]
async fn test_upload_uses_file_field() {
    let client = client(&spawn_backend().await);
    let file: FileItem = client
        .upload(
            "/files/upload",
            Some(TOKEN),
            "notes.txt",
            "text/plain",
            b"hello world".to_vec(),
            "Failed to upload file",
        )
        .await
        .unwrap();
    assert_eq!(file.filename, "notes.txt");
    assert_eq!(file.size, Some(11));
    assert_eq!(file.content_type.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn test_download_relays_headers() {
    let client = client(&spawn_backend().await);
    let download = client
        .download("/files/download/f1", Some(TOKEN), "File not found")
        .await
        .unwrap();
    assert_eq!(download.bytes, b"%PDF-f1");
    assert_eq!(download.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(
        download.content_disposition.as_deref(),
        Some("attachment; filename=\"report.pdf\"")
    );

    let err = client
        .download("/files/download/missing/extra", Some(TOKEN), "File not found")
        .await
        .unwrap_err();
    assert_eq!(err.status(), 404);
    assert_eq!(err.to_string(), "File not found");
}

#[tokio::test]
async fn test_upload_route_accepts_files_above_default_body_limit() {
    let url = spawn_upload_route(&spawn_backend().await).await;
    let bytes = vec![0x5a_u8; 3 * 1024 * 1024];
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name("scan.pdf")
        .mime_str("application/pdf")
        .unwrap();
    let form = reqwest::multipart::Form::new()
        .text("note", "ignored")
        .part("file", part);

    let response = reqwest::Client::new()
        .post(&url)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let file: FileItem = response.json().await.unwrap();
    assert_eq!(file.filename, "scan.pdf");
    assert_eq!(file.size, Some(3 * 1024 * 1024));
    assert_eq!(file.content_type.as_deref(), Some("application/pdf"));
}

#[tokio::test]
async fn test_upload_route_requires_file_field() {
    let url = spawn_upload_route(&spawn_backend().await).await;
    let form = reqwest::multipart::Form::new().text("note", "no file here");

    let response = reqwest::Client::new()
        .post(&url)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Please select a file to upload");
}
