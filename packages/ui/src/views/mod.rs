mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod sign_in;
pub use sign_in::SignInView;

mod sign_up;
pub use sign_up::SignUpView;

mod dashboard;
pub use dashboard::DashboardView;

mod products;
pub use products::ProductsView;

mod users;
pub use users::UsersView;

mod files;
pub use files::FilesView;

mod settings;
pub use settings::SettingsView;
