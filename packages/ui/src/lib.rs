//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

mod auth;
pub use auth::{redirect_to_sign_in, use_auth, AuthProvider, AuthState, SignOutButton};

pub mod toast;
pub use toast::{
    toast_error, toast_success, use_toasts, ActivityLogPanel, ActivityLogToggle, ToastLevel,
    ToastProvider, Toasts,
};

mod theme;
pub use theme::{appearance_script, apply_appearance, restore_appearance};

mod shell;
pub use shell::{AppShell, NavItem};
