use dioxus::prelude::*;
use ui::{AppShell, NavItem};

use super::route_for;
use crate::Route;

#[component]
pub fn DashboardLayout() -> Element {
    let nav = use_navigator();
    let active = match use_route::<Route>() {
        Route::Products {} => NavItem::Products,
        Route::Users {} => NavItem::Users,
        Route::Files {} => NavItem::Files,
        Route::Settings {} => NavItem::Settings,
        _ => NavItem::Dashboard,
    };

    rsx! {
        AppShell {
            active,
            on_navigate: move |item| {
                nav.push(route_for(item));
            },
            on_unauthenticated: move |_| {
                nav.replace(Route::SignIn {});
            },
            Outlet::<Route> {}
        }
    }
}
