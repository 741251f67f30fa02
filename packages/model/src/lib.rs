//! # Model crate: records and client-side logic for the inventory dashboard
//!
//! Everything in here is plain Rust with no Dioxus or networking dependencies, so it
//! compiles identically for the WASM client and the server.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`records`] | Serde records mirrored from the backend DTOs (users, products, files, settings, dashboard) |
//! | [`query`] | Filtering, sorting and pagination over already-fetched lists |
//! | [`format`] | Display helpers (file sizes, dates, prices, status badges) |
//! | [`forms`] | Form state and validation that produces request bodies |
//! | [`token`] | JWT payload decoding (no signature verification) |
//! | [`config`] | `dashboard.toml` configuration |

pub mod config;
pub mod format;
pub mod forms;
pub mod query;
pub mod records;
pub mod token;

pub use config::DashboardConfig;
pub use records::{
    Activity, ApiMessage, ApiResponse, AppearanceSettings, DashboardOverview, DashboardStats,
    Density, FileItem, Gender, Inventory, InventoryInput, NotificationSettings, Page,
    PasswordUpdate, Product, ProductInput, ProfileUpdate, Role, RoleType, SessionInfo, Settings,
    SignInResponse, SignUpRequest, Theme, User, UserStatus, UserUpdate,
};
pub use token::TokenClaims;
