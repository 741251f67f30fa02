//! User administration. New users are created through [`crate::sign_up`].

use dioxus::prelude::*;
use model::{ApiMessage, Page, User, UserUpdate};

#[cfg(feature = "server")]
use crate::{auth, backend::path_segment, error::ProxyError};

#[cfg(feature = "server")]
#[get("/api/users", session: tower_sessions::Session)]
pub async fn list_users() -> Result<Vec<User>, ServerFnError> {
    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;

    client
        .get_json("/users", Some(&auth.token), "Failed to fetch users")
        .await
        .map_err(ProxyError::into_server_fn)
}

#[cfg(not(feature = "server"))]
#[get("/api/users")]
pub async fn list_users() -> Result<Vec<User>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// One page of users sorted by `column`. Unknown columns sort by first name.
#[cfg(feature = "server")]
#[post("/api/users/page", session: tower_sessions::Session)]
pub async fn list_users_page(
    column: String,
    size: u32,
    page: u32,
) -> Result<Page<User>, ServerFnError> {
    use model::query::UserSortColumn;

    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let column = UserSortColumn::parse(&column).unwrap_or_default();
    let size = size.max(1);

    client
        .get_json(
            &format!(
                "/users/paginated?column={}&size={size}&page={page}",
                column.as_str()
            ),
            Some(&auth.token),
            "Failed to fetch users",
        )
        .await
        .map_err(ProxyError::into_server_fn)
}

#[cfg(not(feature = "server"))]
#[post("/api/users/page")]
pub async fn list_users_page(
    column: String,
    size: u32,
    page: u32,
) -> Result<Page<User>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/users/:id", session: tower_sessions::Session)]
pub async fn get_user(id: String) -> Result<User, ServerFnError> {
    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let id = path_segment(&id).map_err(ProxyError::into_server_fn)?;

    client
        .get_json(&format!("/users/{id}"), Some(&auth.token), "User not found")
        .await
        .map_err(ProxyError::into_server_fn)
}

#[cfg(not(feature = "server"))]
#[get("/api/users/:id")]
pub async fn get_user(id: String) -> Result<User, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/users/update", session: tower_sessions::Session)]
pub async fn update_user(id: String, update: UserUpdate) -> Result<User, ServerFnError> {
    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let id = path_segment(&id).map_err(ProxyError::into_server_fn)?;

    let user: User = client
        .send_json(
            reqwest::Method::PUT,
            &format!("/users/{id}"),
            Some(&auth.token),
            &update,
            "Failed to update user",
        )
        .await
        .map_err(ProxyError::into_server_fn)?;
    tracing::info!(target_user = %id, user = %auth.user.email, "user updated");

    Ok(user)
}

#[cfg(not(feature = "server"))]
#[post("/api/users/update")]
pub async fn update_user(id: String, update: UserUpdate) -> Result<User, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/users/delete", session: tower_sessions::Session)]
pub async fn delete_user(id: String) -> Result<ApiMessage, ServerFnError> {
    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let id = path_segment(&id).map_err(ProxyError::into_server_fn)?;

    client
        .delete(&format!("/users/{id}"), Some(&auth.token), "Failed to delete user")
        .await
        .map_err(ProxyError::into_server_fn)?;
    tracing::info!(target_user = %id, user = %auth.user.email, "user deleted");

    Ok(ApiMessage::new("User deleted successfully"))
}

#[cfg(not(feature = "server"))]
#[post("/api/users/delete")]
pub async fn delete_user(id: String) -> Result<ApiMessage, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
