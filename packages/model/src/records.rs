//! # Records mirrored from the backend API
//!
//! Every type here is a plain serde record. Field names follow the backend's
//! camelCase JSON; missing fields fall back to defaults so a partially populated
//! backend response still decodes. No invariants are enforced on these types:
//! validation happens in [`crate::forms`] before a request body is built.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// A user account as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub gender: String,
    pub status: String,
    pub roles: Vec<Role>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// First letter of the first and last name, used in avatars.
    pub fn initials(&self) -> String {
        let initials: String = [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            self.email
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default()
        } else {
            initials
        }
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }

    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [UserStatus::Active, UserStatus::Inactive, UserStatus::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
            UserStatus::Pending => "PENDING",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Pending => "Pending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleType {
    Admin,
    Manager,
    User,
}

impl RoleType {
    pub const ALL: [RoleType; 3] = [RoleType::Admin, RoleType::Manager, RoleType::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::Admin => "ADMIN",
            RoleType::Manager => "MANAGER",
            RoleType::User => "USER",
        }
    }
}

/// Body of `PUT /users/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub email: String,
    pub gender: String,
    pub status: String,
    pub role: Vec<String>,
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub email: String,
    pub gender: String,
    pub status: String,
    pub password: String,
    pub role: String,
}

/// Reply of `POST /auth/signin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Signed-in state safe to send to the browser. The access token stays in the
/// server-side session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub token_type: String,
    pub user: User,
    /// Token expiry as Unix seconds, when the token carries one.
    pub expires_at: Option<i64>,
}

impl SessionInfo {
    pub fn has_role(&self, name: &str) -> bool {
        self.user.has_role(name)
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    pub category: String,
    pub inventory: Option<Inventory>,
}

impl Product {
    pub fn is_low_stock(&self, threshold: i32) -> bool {
        self.quantity < threshold
    }

    pub fn location(&self) -> Option<&str> {
        self.inventory
            .as_ref()
            .map(|inv| inv.location.as_str())
            .filter(|loc| !loc.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryInput {
    pub quantity: i32,
    pub location: String,
}

/// Body of `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<InventoryInput>,
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            quantity: product.quantity,
            category: product.category.clone(),
            inventory: product.inventory.as_ref().map(|inv| InventoryInput {
                quantity: inv.quantity,
                location: inv.location.clone(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// File metadata from `GET /files`. The stored bytes are only fetched through
/// the download route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    pub id: String,
    #[serde(alias = "name", alias = "fileName", default)]
    pub filename: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(alias = "createdAt", default)]
    pub uploaded_at: Option<String>,
    #[serde(rename = "type", alias = "contentType", default)]
    pub content_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub low_stock_alerts: bool,
    pub new_user_registrations: bool,
    pub system_updates: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            low_stock_alerts: true,
            new_user_registrations: false,
            system_updates: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    #[default]
    Comfortable,
    Spacious,
}

impl Density {
    pub const ALL: [Density; 3] = [Density::Compact, Density::Comfortable, Density::Spacious];

    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Compact => "compact",
            Density::Comfortable => "comfortable",
            Density::Spacious => "spacious",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub density: Density,
}

/// Combined profile and preference settings for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub gender: String,
    pub status: String,
    pub role: Vec<String>,
    pub notification_settings: NotificationSettings,
    pub appearance_settings: AppearanceSettings,
}

impl Settings {
    pub fn profile(&self) -> ProfileUpdate {
        ProfileUpdate {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            mobile: self.mobile.clone(),
            gender: self.gender.clone(),
            status: self.status.clone(),
            role: self.role.clone(),
        }
    }
}

/// Body of `PUT /settings/user/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub gender: String,
    pub status: String,
    pub role: Vec<String>,
}

/// Body of `PUT /settings/user/{id}/password`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdate {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_products: u64,
    pub total_users: u64,
    pub total_files: u64,
    pub low_stock_products: u64,
    pub product_growth: f64,
    pub user_growth: f64,
    pub file_growth: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
}

/// What the dashboard landing page renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub stats: DashboardStats,
    pub activity: Vec<Activity>,
    /// True when `stats` was computed from the resource lists rather than
    /// returned by the backend stats endpoint.
    pub derived: bool,
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// Spring-style page envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number: u32,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            size: 0,
            number: 0,
        }
    }
}

/// `{ success, message, data }` envelope used by the settings and dashboard
/// endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Acknowledgement body, e.g. `{"message": "Product deleted successfully"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_decodes_backend_shape() {
        let json = r#"{
            "id": "5b1c",
            "email": "jane@example.com",
            "firstName": "Jane",
            "lastName": "Doe",
            "mobile": "0788000000",
            "gender": "FEMALE",
            "status": "ACTIVE",
            "roles": [{"id": "r1", "name": "ADMIN"}],
            "password": "ignored"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.full_name(), "Jane Doe");
        assert_eq!(user.initials(), "JD");
        assert!(user.has_role("ADMIN"));
        assert!(!user.has_role("USER"));
    }

    #[test]
    fn test_user_initials_fall_back_to_email() {
        let user = User {
            email: "ops@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(user.initials(), "O");
    }

    #[test]
    fn test_file_item_accepts_backend_aliases() {
        let json = r#"{"id": "f1", "name": "report.pdf", "size": 2048, "type": "application/pdf", "createdAt": "2024-03-01T10:00:00"}"#;
        let file: FileItem = serde_json::from_str(json).unwrap();
        assert_eq!(file.filename, "report.pdf");
        assert_eq!(file.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(file.uploaded_at.as_deref(), Some("2024-03-01T10:00:00"));
    }

    #[test]
    fn test_product_without_inventory() {
        let json = r#"{"id": "p1", "name": "Mouse", "price": 19.5, "quantity": 3, "category": "Peripherals"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.is_low_stock(10));
        assert!(product.location().is_none());
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_product_input_omits_missing_inventory() {
        let input = ProductInput {
            name: "Desk".to_string(),
            price: 120.0,
            quantity: 4,
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert!(value.get("inventory").is_none());
    }

    #[test]
    fn test_settings_envelope_unwraps() {
        let json = r#"{
            "success": true,
            "message": "Settings retrieved successfully",
            "data": {
                "email": "a@b.c",
                "firstName": "Alice",
                "lastName": "Smith",
                "mobile": "+250788000000",
                "gender": "FEMALE",
                "status": "ACTIVE",
                "role": ["ADMIN"],
                "notificationSettings": {
                    "emailNotifications": false,
                    "lowStockAlerts": true,
                    "newUserRegistrations": true,
                    "systemUpdates": false
                },
                "appearanceSettings": {"theme": "dark", "density": "compact"}
            }
        }"#;
        let envelope: ApiResponse<Settings> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        let settings = envelope.into_data().unwrap();
        assert_eq!(settings.appearance_settings.theme, Theme::Dark);
        assert_eq!(settings.appearance_settings.density, Density::Compact);
        assert!(settings.notification_settings.new_user_registrations);
        assert_eq!(settings.profile().role, vec!["ADMIN".to_string()]);
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: ApiResponse<Settings> =
            serde_json::from_str(r#"{"success": true, "message": "Password updated successfully"}"#)
                .unwrap();
        assert!(envelope.into_data().is_none());
    }

    #[test]
    fn test_notification_defaults_match_backend() {
        let defaults = NotificationSettings::default();
        assert!(defaults.email_notifications);
        assert!(defaults.low_stock_alerts);
        assert!(!defaults.new_user_registrations);
        assert!(defaults.system_updates);
    }

    #[test]
    fn test_page_envelope() {
        let json = r#"{"content": [{"id": "u1", "email": "x@y.z"}], "totalPages": 3, "totalElements": 21, "size": 10, "number": 0}"#;
        let page: Page<User> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 21);
    }

    #[test]
    fn test_theme_and_density_parse() {
        assert_eq!(Theme::parse("DARK"), Some(Theme::Dark));
        assert_eq!(Density::parse("spacious"), Some(Density::Spacious));
        assert_eq!(Theme::parse("sepia"), None);
    }
}
