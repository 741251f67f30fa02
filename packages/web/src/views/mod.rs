mod auth;
pub use auth::{SignIn, SignUp};

mod dashboard_layout;
pub use dashboard_layout::DashboardLayout;

mod screens;
pub use screens::{Dashboard, Files, Products, Settings, Users};

use ui::NavItem;

use crate::Route;

pub(crate) fn route_for(item: NavItem) -> Route {
    match item {
        NavItem::Dashboard => Route::Dashboard {},
        NavItem::Products => Route::Products {},
        NavItem::Users => Route::Users {},
        NavItem::Files => Route::Files {},
        NavItem::Settings => Route::Settings {},
    }
}
