//! Per-user settings of the signed-in user.
//!
//! The backend keys settings by user id; the id always comes from the session,
//! never from the browser.

use dioxus::prelude::*;
use model::{
    ApiMessage, AppearanceSettings, NotificationSettings, PasswordUpdate, ProfileUpdate, Settings,
};

#[cfg(feature = "server")]
use crate::{auth, backend::path_segment, error::ProxyError};
#[cfg(feature = "server")]
use reqwest::Method;

#[cfg(feature = "server")]
fn settings_path(user_id: &str, section: &str) -> Result<String, ProxyError> {
    let id = path_segment(user_id)?;
    Ok(match section {
        "" => format!("/settings/user/{id}"),
        section => format!("/settings/user/{id}/{section}"),
    })
}

#[cfg(feature = "server")]
#[get("/api/settings", session: tower_sessions::Session)]
pub async fn get_settings() -> Result<Settings, ServerFnError> {
    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let path = settings_path(&auth.user.id, "").map_err(ProxyError::into_server_fn)?;

    client
        .get_data(&path, Some(&auth.token), "Failed to fetch settings")
        .await
        .map_err(ProxyError::into_server_fn)
}

#[cfg(not(feature = "server"))]
#[get("/api/settings")]
pub async fn get_settings() -> Result<Settings, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update name, email and contact details. The session copy of the user is
/// refreshed so the header shows the new name straight away.
#[cfg(feature = "server")]
#[post("/api/settings/profile", session: tower_sessions::Session)]
pub async fn update_profile(profile: ProfileUpdate) -> Result<Settings, ServerFnError> {
    use model::ApiResponse;

    let (client, mut auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let path = settings_path(&auth.user.id, "").map_err(ProxyError::into_server_fn)?;

    let reply: ApiResponse<Settings> = client
        .send_json(
            Method::PUT,
            &path,
            Some(&auth.token),
            &profile,
            "Failed to update profile",
        )
        .await
        .map_err(ProxyError::into_server_fn)?;
    let settings = reply
        .into_data()
        .ok_or_else(|| ProxyError::Decode(format!("{path}: response has no data")))
        .map_err(ProxyError::into_server_fn)?;

    auth.user.email = settings.email.clone();
    auth.user.first_name = settings.first_name.clone();
    auth.user.last_name = settings.last_name.clone();
    auth.user.mobile = settings.mobile.clone();
    session
        .insert(auth::SESSION_AUTH_KEY, &auth)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(settings)
}

#[cfg(not(feature = "server"))]
#[post("/api/settings/profile")]
pub async fn update_profile(profile: ProfileUpdate) -> Result<Settings, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/settings/password", session: tower_sessions::Session)]
pub async fn update_password(update: PasswordUpdate) -> Result<ApiMessage, ServerFnError> {
    use model::ApiResponse;

    if update.new_password != update.confirm_password {
        return Err(ServerFnError::new("New passwords do not match"));
    }

    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let path = settings_path(&auth.user.id, "password").map_err(ProxyError::into_server_fn)?;

    let reply: ApiResponse<serde_json::Value> = client
        .send_json(
            Method::PUT,
            &path,
            Some(&auth.token),
            &update,
            "Failed to update password",
        )
        .await
        .map_err(ProxyError::into_server_fn)?;
    tracing::info!(user = %auth.user.email, "password changed");

    Ok(ApiMessage::new(
        reply
            .message
            .unwrap_or_else(|| "Password updated successfully".to_string()),
    ))
}

#[cfg(not(feature = "server"))]
#[post("/api/settings/password")]
pub async fn update_password(update: PasswordUpdate) -> Result<ApiMessage, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/settings/notifications", session: tower_sessions::Session)]
pub async fn update_notifications(
    settings: NotificationSettings,
) -> Result<NotificationSettings, ServerFnError> {
    use model::ApiResponse;

    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let path =
        settings_path(&auth.user.id, "notifications").map_err(ProxyError::into_server_fn)?;

    let reply: ApiResponse<NotificationSettings> = client
        .send_json(
            Method::PUT,
            &path,
            Some(&auth.token),
            &settings,
            "Failed to update notification settings",
        )
        .await
        .map_err(ProxyError::into_server_fn)?;

    Ok(reply.into_data().unwrap_or(settings))
}

#[cfg(not(feature = "server"))]
#[post("/api/settings/notifications")]
pub async fn update_notifications(
    settings: NotificationSettings,
) -> Result<NotificationSettings, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/settings/appearance", session: tower_sessions::Session)]
pub async fn update_appearance(
    settings: AppearanceSettings,
) -> Result<AppearanceSettings, ServerFnError> {
    use model::ApiResponse;

    let (client, auth) = auth::connect(&session)
        .await
        .map_err(ProxyError::into_server_fn)?;
    let path = settings_path(&auth.user.id, "appearance").map_err(ProxyError::into_server_fn)?;

    let reply: ApiResponse<AppearanceSettings> = client
        .send_json(
            Method::PUT,
            &path,
            Some(&auth.token),
            &settings,
            "Failed to update appearance settings",
        )
        .await
        .map_err(ProxyError::into_server_fn)?;

    Ok(reply.into_data().unwrap_or(settings))
}

#[cfg(not(feature = "server"))]
#[post("/api/settings/appearance")]
pub async fn update_appearance(
    settings: AppearanceSettings,
) -> Result<AppearanceSettings, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[test]
    fn test_settings_paths() {
        assert_eq!(settings_path("u1", "").unwrap(), "/settings/user/u1");
        assert_eq!(
            settings_path("u1", "appearance").unwrap(),
            "/settings/user/u1/appearance"
        );
        assert!(settings_path("u1/../u2", "").is_err());
    }
}
