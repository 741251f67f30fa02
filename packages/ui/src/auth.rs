//! Authentication context and hooks for the UI.

use api::SessionInfo;
use dioxus::prelude::*;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<SessionInfo>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn signed_in(user: SessionInfo) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_role(role))
    }

    /// Not loading and nobody signed in.
    pub fn needs_sign_in(&self) -> bool {
        !self.loading && self.user.is_none()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Fetch the current session on mount
    let _ = use_resource(move || async move {
        match api::current_session().await {
            Ok(Some(user)) => auth_state.set(AuthState::signed_in(user)),
            Ok(None) => auth_state.set(AuthState::signed_out()),
            Err(e) => {
                tracing::warn!("Failed to load session: {e}");
                auth_state.set(AuthState::signed_out());
            }
        }
    });

    // Re-check every minute so an expired backend token signs the user out
    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        spawn(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(60)).await;

                let current = auth_state.peek().clone();
                if current.loading || current.user.is_none() {
                    continue;
                }
                if let Ok(None) = api::current_session().await {
                    auth_state.set(AuthState::signed_out());
                }
            }
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Full page load to the sign-in screen, dropping all client state.
pub fn redirect_to_sign_in() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/auth/signin");
        }
    }
}

/// Button to sign out the current user.
#[component]
pub fn SignOutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default)] class: String,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        match api::sign_out().await {
            Ok(()) => {
                auth_state.set(AuthState::signed_out());
                redirect_to_sign_in();
            }
            Err(e) => tracing::error!("Failed to sign out: {e}"),
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            crate::Icon { icon: crate::icons::FaRightFromBracket, width: 14, height: 14 }
            span { "{label}" }
        }
    }
}
