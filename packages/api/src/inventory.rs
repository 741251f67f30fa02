//! Stock levels. Every product has at most one inventory record.

use dioxus::prelude::*;
use model::Inventory;

#[cfg(feature = "server")]
use crate::{auth, backend::path_segment, error::ProxyError};

/// Set the stock level and storage location of a product.
#[cfg(feature = "server")]
#[post("/api/inventory/update", session: tower_sessions::Session)]
pub async fn update_inventory(
    product_id: String,
    quantity: i32,
    location: String,
) -> Result<Inventory, ServerFnError> {
    use model::InventoryInput;
    use reqwest::Method;

    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let id = path_segment(&product_id).map_err(ProxyError::into_server_fn)?;
    if quantity < 0 {
        return Err(ServerFnError::new("Quantity cannot be negative"));
    }

    client
        .send_json(
            Method::PUT,
            &format!("/inventory/update/{id}"),
            Some(&auth.token),
            &InventoryInput { quantity, location },
            "Failed to update inventory",
        )
        .await
        .map_err(ProxyError::into_server_fn)
}

#[cfg(not(feature = "server"))]
#[post("/api/inventory/update")]
pub async fn update_inventory(
    product_id: String,
    quantity: i32,
    location: String,
) -> Result<Inventory, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
