//! Route components for the `/dashboard` screens.

use dioxus::prelude::*;
use ui::views::{DashboardView, FilesView, ProductsView, SettingsView, UsersView};

use super::route_for;

#[component]
pub fn Dashboard() -> Element {
    let nav = use_navigator();

    rsx! {
        DashboardView {
            on_navigate: move |item| {
                nav.push(route_for(item));
            },
        }
    }
}

#[component]
pub fn Products() -> Element {
    rsx! { ProductsView {} }
}

#[component]
pub fn Users() -> Element {
    rsx! { UsersView {} }
}

#[component]
pub fn Files() -> Element {
    rsx! { FilesView {} }
}

#[component]
pub fn Settings() -> Element {
    rsx! { SettingsView {} }
}
