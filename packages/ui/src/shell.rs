//! Dashboard frame: sidebar navigation, header with the signed-in user, and
//! the sign-in guard for every `/dashboard` screen.

use dioxus::prelude::*;

use crate::components::{Badge, Spinner};
use crate::icons::{FaBars, FaBox, FaFile, FaGear, FaHouse, FaUsers};
use crate::toast::ActivityLogToggle;
use crate::{use_auth, Icon, SignOutButton};

const SHELL_CSS: Asset = asset!("/assets/styling/shell.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Dashboard,
    Products,
    Users,
    Files,
    Settings,
}

impl NavItem {
    pub const ALL: [NavItem; 5] = [
        NavItem::Dashboard,
        NavItem::Products,
        NavItem::Users,
        NavItem::Files,
        NavItem::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NavItem::Dashboard => "Dashboard",
            NavItem::Products => "Products",
            NavItem::Users => "Users",
            NavItem::Files => "Files",
            NavItem::Settings => "Settings",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            NavItem::Dashboard => "/dashboard",
            NavItem::Products => "/dashboard/products",
            NavItem::Users => "/dashboard/users",
            NavItem::Files => "/dashboard/files",
            NavItem::Settings => "/dashboard/settings",
        }
    }
}

#[component]
fn NavIcon(item: NavItem) -> Element {
    match item {
        NavItem::Dashboard => rsx! { Icon { icon: FaHouse, width: 16, height: 16 } },
        NavItem::Products => rsx! { Icon { icon: FaBox, width: 16, height: 16 } },
        NavItem::Users => rsx! { Icon { icon: FaUsers, width: 16, height: 16 } },
        NavItem::Files => rsx! { Icon { icon: FaFile, width: 16, height: 16 } },
        NavItem::Settings => rsx! { Icon { icon: FaGear, width: 16, height: 16 } },
    }
}

/// Shared dashboard layout.
///
/// Platform packages provide navigation callbacks and an `Outlet` as children.
#[component]
pub fn AppShell(
    /// Highlighted sidebar entry.
    active: NavItem,
    /// Called when the user picks a sidebar entry.
    on_navigate: EventHandler<NavItem>,
    /// Called once the session check finished without a signed-in user.
    on_unauthenticated: EventHandler<()>,
    children: Element,
) -> Element {
    let auth = use_auth();
    let mut menu_open = use_signal(|| false);

    use_effect(move || {
        if auth().needs_sign_in() {
            on_unauthenticated.call(());
        }
    });

    if auth().loading {
        return rsx! {
            document::Stylesheet { href: SHELL_CSS }
            div { class: "shell-loading", Spinner {} }
        };
    }
    let Some(session) = auth().user else {
        return rsx! {};
    };
    let user = session.user.clone();

    rsx! {
        document::Stylesheet { href: SHELL_CSS }
        div { class: "shell",
            aside { class: if menu_open() { "shell-sidebar open" } else { "shell-sidebar" },
                div { class: "shell-brand", "Inventory" }
                nav { class: "shell-nav",
                    for item in NavItem::ALL {
                        button {
                            key: "{item.label()}",
                            class: if item == active { "shell-nav-item active" } else { "shell-nav-item" },
                            onclick: move |_| {
                                menu_open.set(false);
                                on_navigate.call(item);
                            },
                            NavIcon { item }
                            span { "{item.label()}" }
                        }
                    }
                }
            }
            if menu_open() {
                div { class: "shell-backdrop", onclick: move |_| menu_open.set(false) }
            }

            div { class: "shell-main",
                header { class: "shell-header",
                    button {
                        class: "shell-menu-toggle",
                        title: "Menu",
                        onclick: move |_| {
                            let open = menu_open();
                            menu_open.set(!open);
                        },
                        Icon { icon: FaBars, width: 16, height: 16 }
                    }
                    div { class: "shell-header-spacer" }
                    ActivityLogToggle {}
                    div { class: "shell-user",
                        div { class: "shell-avatar", "{user.initials()}" }
                        div { class: "shell-user-text",
                            span { class: "shell-user-name", "{user.full_name()}" }
                            span { class: "view-muted", "{user.email}" }
                        }
                        for role in user.role_names() {
                            Badge { key: "{role}", class: "badge-role", "{role}" }
                        }
                    }
                    SignOutButton { class: "btn btn-ghost" }
                }
                main { class: "shell-content", {children} }
            }
        }
    }
}
