//! Product catalogue. Stock changes go through [`crate::inventory`].

use dioxus::prelude::*;
use model::{ApiMessage, Product, ProductInput};

#[cfg(feature = "server")]
use crate::{auth, backend::path_segment, error::ProxyError};
#[cfg(feature = "server")]
use reqwest::Method;

#[cfg(feature = "server")]
#[get("/api/products", session: tower_sessions::Session)]
pub async fn list_products() -> Result<Vec<Product>, ServerFnError> {
    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;

    client
        .get_json("/products", Some(&auth.token), "Failed to fetch products")
        .await
        .map_err(ProxyError::into_server_fn)
}

#[cfg(not(feature = "server"))]
#[get("/api/products")]
pub async fn list_products() -> Result<Vec<Product>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/products/:id", session: tower_sessions::Session)]
pub async fn get_product(id: String) -> Result<Product, ServerFnError> {
    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let id = path_segment(&id).map_err(ProxyError::into_server_fn)?;

    client
        .get_json(
            &format!("/products/{id}"),
            Some(&auth.token),
            "Product not found",
        )
        .await
        .map_err(ProxyError::into_server_fn)
}

#[cfg(not(feature = "server"))]
#[get("/api/products/:id")]
pub async fn get_product(id: String) -> Result<Product, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/products/create", session: tower_sessions::Session)]
pub async fn create_product(input: ProductInput) -> Result<Product, ServerFnError> {
    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;

    let product: Product = client
        .send_json(
            Method::POST,
            "/products",
            Some(&auth.token),
            &input,
            "Failed to create product",
        )
        .await
        .map_err(ProxyError::into_server_fn)?;
    tracing::info!(product = %product.id, user = %auth.user.email, "product created");

    Ok(product)
}

#[cfg(not(feature = "server"))]
#[post("/api/products/create")]
pub async fn create_product(input: ProductInput) -> Result<Product, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/products/update", session: tower_sessions::Session)]
pub async fn update_product(id: String, input: ProductInput) -> Result<Product, ServerFnError> {
    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let id = path_segment(&id).map_err(ProxyError::into_server_fn)?;

    client
        .send_json(
            Method::PUT,
            &format!("/products/{id}"),
            Some(&auth.token),
            &input,
            "Failed to update product",
        )
        .await
        .map_err(ProxyError::into_server_fn)
}

#[cfg(not(feature = "server"))]
#[post("/api/products/update")]
pub async fn update_product(id: String, input: ProductInput) -> Result<Product, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/products/delete", session: tower_sessions::Session)]
pub async fn delete_product(id: String) -> Result<ApiMessage, ServerFnError> {
    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let id = path_segment(&id).map_err(ProxyError::into_server_fn)?;

    client
        .delete(
            &format!("/products/{id}"),
            Some(&auth.token),
            "Failed to delete product",
        )
        .await
        .map_err(ProxyError::into_server_fn)?;
    tracing::info!(product = %id, user = %auth.user.email, "product deleted");

    Ok(ApiMessage::new("Product deleted successfully"))
}

#[cfg(not(feature = "server"))]
#[post("/api/products/delete")]
pub async fn delete_product(id: String) -> Result<ApiMessage, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
