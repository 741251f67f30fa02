use dioxus::prelude::*;
use model::{Activity, DashboardStats};

use crate::components::{Card, EmptyState, Spinner};
use crate::icons::{FaBox, FaFile, FaTriangleExclamation, FaUpload, FaUserPlus, FaUsers};
use crate::{toast_error, use_auth, use_toasts, Icon, NavItem};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Landing page: headline counters, recent activity and shortcuts.
#[component]
pub fn DashboardView(on_navigate: EventHandler<NavItem>) -> Element {
    let auth = use_auth();
    let mut toasts = use_toasts();

    let overview = use_resource(move || async move {
        match api::dashboard_overview().await {
            Ok(overview) => Some(overview),
            Err(e) => {
                toast_error(&mut toasts, "Error", &e.to_string());
                None
            }
        }
    });

    let greeting = auth()
        .user
        .map(|s| s.user.first_name)
        .filter(|name| !name.is_empty())
        .map(|name| format!("Welcome back, {name}"))
        .unwrap_or_else(|| "Welcome back".to_string());

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div { class: "view-page",
            h1 { class: "view-title", "{greeting}" }
            p { class: "view-muted mb-6", "Here is what is happening with your inventory." }

            match overview() {
                None => rsx! { Spinner {} },
                Some(None) => rsx! { EmptyState { message: "Dashboard data is unavailable right now." } },
                Some(Some(overview)) => rsx! {
                    StatCards { stats: overview.stats.clone() }
                    if overview.derived {
                        p { class: "view-muted mb-4", "Counts computed from the current lists." }
                    }
                    div { class: "dashboard-columns",
                        Card { class: "dashboard-activity",
                            h2 { class: "view-section-title", "Recent activity" }
                            ActivityList { activity: overview.activity.clone() }
                        }
                        Card { class: "dashboard-actions",
                            h2 { class: "view-section-title", "Quick actions" }
                            QuickAction {
                                label: "Add product",
                                on_click: move |_| on_navigate.call(NavItem::Products),
                                Icon { icon: FaBox, width: 14, height: 14 }
                            }
                            QuickAction {
                                label: "Manage users",
                                on_click: move |_| on_navigate.call(NavItem::Users),
                                Icon { icon: FaUserPlus, width: 14, height: 14 }
                            }
                            QuickAction {
                                label: "Upload file",
                                on_click: move |_| on_navigate.call(NavItem::Files),
                                Icon { icon: FaUpload, width: 14, height: 14 }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn StatCards(stats: DashboardStats) -> Element {
    rsx! {
        div { class: "stat-grid",
            StatCard {
                title: "Total products",
                value: stats.total_products,
                growth: stats.product_growth,
                Icon { icon: FaBox, width: 18, height: 18 }
            }
            StatCard {
                title: "Total users",
                value: stats.total_users,
                growth: stats.user_growth,
                Icon { icon: FaUsers, width: 18, height: 18 }
            }
            StatCard {
                title: "Files",
                value: stats.total_files,
                growth: stats.file_growth,
                Icon { icon: FaFile, width: 18, height: 18 }
            }
            StatCard {
                title: "Low stock",
                value: stats.low_stock_products,
                growth: 0.0,
                warn: stats.low_stock_products > 0,
                Icon { icon: FaTriangleExclamation, width: 18, height: 18 }
            }
        }
    }
}

#[component]
fn StatCard(
    title: String,
    value: u64,
    growth: f64,
    #[props(default)] warn: bool,
    children: Element,
) -> Element {
    let growth_label = if growth > 0.0 {
        Some(format!("+{growth:.1}% from last month"))
    } else if growth < 0.0 {
        Some(format!("{growth:.1}% from last month"))
    } else {
        None
    };

    let card_class = if warn { "stat-card warn" } else { "stat-card" };

    rsx! {
        Card { class: "{card_class}",
            div { class: "stat-card-header",
                span { class: "view-muted", "{title}" }
                {children}
            }
            div { class: "stat-card-value", "{value}" }
            if let Some(label) = growth_label {
                span { class: if growth > 0.0 { "stat-growth up" } else { "stat-growth down" }, "{label}" }
            }
        }
    }
}

#[component]
fn ActivityList(activity: Vec<Activity>) -> Element {
    if activity.is_empty() {
        return rsx! {
            EmptyState { message: "No recent activity." }
        };
    }

    rsx! {
        ul { class: "activity-list",
            for item in activity {
                li { key: "{item.id}{item.timestamp}", class: "activity-item",
                    ActivityIcon { kind: item.kind.clone() }
                    div {
                        p { "{item.message}" }
                        span { class: "view-muted", "{model::format::format_date(Some(&item.timestamp))}" }
                    }
                }
            }
        }
    }
}

#[component]
fn ActivityIcon(kind: String) -> Element {
    let kind = kind.to_lowercase();
    if kind.contains("user") {
        rsx! { Icon { icon: FaUsers, width: 14, height: 14 } }
    } else if kind.contains("file") {
        rsx! { Icon { icon: FaFile, width: 14, height: 14 } }
    } else if kind.contains("stock") {
        rsx! { Icon { icon: FaTriangleExclamation, width: 14, height: 14 } }
    } else {
        rsx! { Icon { icon: FaBox, width: 14, height: 14 } }
    }
}

#[component]
fn QuickAction(label: String, on_click: EventHandler<()>, children: Element) -> Element {
    rsx! {
        button {
            class: "quick-action",
            onclick: move |_| on_click.call(()),
            {children}
            span { "{label}" }
        }
    }
}
