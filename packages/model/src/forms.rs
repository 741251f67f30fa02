//! Form state for the CRUD dialogs and the request bodies they produce.
//!
//! Fields are kept as the raw strings the inputs hold; `validate` trims and
//! converts them. Error messages are shown to the user as-is.

use thiserror::Error;

use crate::records::{
    Gender, InventoryInput, PasswordUpdate, Product, ProductInput, RoleType, SignUpRequest, User,
    UserStatus, UserUpdate,
};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all required fields")]
    MissingRequired,
    #[error("Please fill in all password fields")]
    MissingPassword,
    #[error("New passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Please enter a valid email")]
    InvalidEmail,
    #[error("{0} must be a valid non-negative number")]
    InvalidNumber(&'static str),
}

fn required<S: AsRef<str>>(values: &[S]) -> Result<(), FormError> {
    if values.iter().any(|v| v.as_ref().trim().is_empty()) {
        Err(FormError::MissingRequired)
    } else {
        Ok(())
    }
}

fn check_email(email: &str) -> Result<(), FormError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        Err(FormError::InvalidEmail)
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// "Add user" dialog. Submitted through the sign-up endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUserForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub gender: String,
    pub status: String,
    pub password: String,
    pub role: String,
}

impl Default for NewUserForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            mobile: String::new(),
            gender: Gender::Male.as_str().to_string(),
            status: UserStatus::Active.as_str().to_string(),
            password: String::new(),
            role: RoleType::User.as_str().to_string(),
        }
    }
}

impl NewUserForm {
    pub fn validate(&self) -> Result<SignUpRequest, FormError> {
        required(&[&self.email, &self.first_name, &self.last_name, &self.password])?;
        Ok(SignUpRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
            email: self.email.trim().to_string(),
            gender: self.gender.clone(),
            status: self.status.clone(),
            password: self.password.clone(),
            role: self.role.clone(),
        })
    }
}

/// "Edit user" dialog, seeded from the selected user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserEditForm {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub gender: String,
    pub status: String,
    pub roles: Vec<String>,
}

impl From<&User> for UserEditForm {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            mobile: user.mobile.clone(),
            gender: user.gender.clone(),
            status: user.status.clone(),
            roles: user.role_names(),
        }
    }
}

impl UserEditForm {
    pub fn validate(&self) -> Result<UserUpdate, FormError> {
        required(&[&self.email, &self.first_name, &self.last_name])?;
        Ok(UserUpdate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
            email: self.email.trim().to_string(),
            gender: self.gender.clone(),
            status: self.status.clone(),
            role: self.roles.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Passwords and sign-in
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<PasswordUpdate, FormError> {
        if self.current_password.is_empty()
            || self.new_password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(FormError::MissingPassword);
        }
        if self.new_password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort);
        }
        Ok(PasswordUpdate {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
            confirm_password: self.confirm_password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    /// Returns the normalised `(email, password)` pair.
    pub fn validate(&self) -> Result<(String, String), FormError> {
        check_email(&self.email)?;
        if self.password.is_empty() {
            return Err(FormError::MissingRequired);
        }
        Ok((self.email.trim().to_lowercase(), self.password.clone()))
    }
}

/// Public registration page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpForm {
    pub user: NewUserForm,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<SignUpRequest, FormError> {
        check_email(&self.user.email)?;
        let request = self.user.validate()?;
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort);
        }
        if request.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(request)
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Add/edit product dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
    pub category: String,
    pub location: String,
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
            category: product.category.clone(),
            location: product.location().unwrap_or_default().to_string(),
        }
    }
}

impl ProductForm {
    pub fn validate(&self) -> Result<ProductInput, FormError> {
        required(&[&self.name])?;
        let price: f64 = parse_number(&self.price, "Price")?;
        let quantity: i32 = parse_number(&self.quantity, "Quantity")?;
        if !price.is_finite() || price < 0.0 {
            return Err(FormError::InvalidNumber("Price"));
        }
        if quantity < 0 {
            return Err(FormError::InvalidNumber("Quantity"));
        }
        let location = self.location.trim();
        Ok(ProductInput {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            quantity,
            category: self.category.trim().to_string(),
            inventory: (!location.is_empty()).then(|| InventoryInput {
                quantity,
                location: location.to_string(),
            }),
        })
    }
}

/// "Update stock" dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockForm {
    pub quantity: String,
    pub location: String,
}

impl From<&Product> for StockForm {
    fn from(product: &Product) -> Self {
        Self {
            quantity: product.quantity.to_string(),
            location: product.location().unwrap_or_default().to_string(),
        }
    }
}

impl StockForm {
    pub fn validate(&self) -> Result<InventoryInput, FormError> {
        let quantity: i32 = parse_number(&self.quantity, "Quantity")?;
        if quantity < 0 {
            return Err(FormError::InvalidNumber("Quantity"));
        }
        Ok(InventoryInput {
            quantity,
            location: self.location.trim().to_string(),
        })
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, field: &'static str) -> Result<T, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::MissingRequired);
    }
    raw.parse().map_err(|_| FormError::InvalidNumber(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_requires_core_fields() {
        let form = NewUserForm {
            email: "new@example.com".to_string(),
            first_name: "New".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(FormError::MissingRequired));
        assert_eq!(
            FormError::MissingRequired.to_string(),
            "Please fill in all required fields"
        );
    }

    #[test]
    fn test_new_user_defaults() {
        let form = NewUserForm {
            email: " new@example.com ".to_string(),
            first_name: "New".to_string(),
            last_name: "Person".to_string(),
            password: "secret123".to_string(),
            ..Default::default()
        };
        let req = form.validate().unwrap();
        assert_eq!(req.email, "new@example.com");
        assert_eq!(req.gender, "MALE");
        assert_eq!(req.status, "ACTIVE");
        assert_eq!(req.role, "USER");
    }

    #[test]
    fn test_user_edit_keeps_roles() {
        let user = User {
            id: "u1".to_string(),
            email: "a@b.c".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            roles: vec![crate::records::Role {
                id: None,
                name: "MANAGER".to_string(),
            }],
            ..Default::default()
        };
        let update = UserEditForm::from(&user).validate().unwrap();
        assert_eq!(update.role, vec!["MANAGER".to_string()]);

        let mut form = UserEditForm::from(&user);
        form.last_name.clear();
        assert_eq!(form.validate(), Err(FormError::MissingRequired));
    }

    #[test]
    fn test_password_form_rules() {
        let mut form = PasswordForm::default();
        assert_eq!(form.validate(), Err(FormError::MissingPassword));

        form.current_password = "old-password".to_string();
        form.new_password = "new-password".to_string();
        form.confirm_password = "new-passw0rd".to_string();
        assert_eq!(form.validate(), Err(FormError::PasswordMismatch));

        form.new_password = "short".to_string();
        form.confirm_password = "short".to_string();
        assert_eq!(form.validate(), Err(FormError::PasswordTooShort));

        form.new_password = "long-enough".to_string();
        form.confirm_password = "long-enough".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_product_form_parses_numbers() {
        let form = ProductForm {
            name: "Desk Lamp".to_string(),
            description: "LED".to_string(),
            price: "24.99".to_string(),
            quantity: "7".to_string(),
            category: "Lighting".to_string(),
            location: "Aisle 3".to_string(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.price, 24.99);
        assert_eq!(input.quantity, 7);
        let inventory = input.inventory.unwrap();
        assert_eq!(inventory.location, "Aisle 3");
        assert_eq!(inventory.quantity, 7);
    }

    #[test]
    fn test_product_form_rejects_bad_numbers() {
        let mut form = ProductForm {
            name: "Desk Lamp".to_string(),
            price: "abc".to_string(),
            quantity: "1".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(FormError::InvalidNumber("Price")));

        form.price = "10".to_string();
        form.quantity = "-2".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidNumber("Quantity")));

        form.quantity = String::new();
        assert_eq!(form.validate(), Err(FormError::MissingRequired));
    }

    #[test]
    fn test_product_form_without_location() {
        let form = ProductForm {
            name: "Cable".to_string(),
            price: "3".to_string(),
            quantity: "100".to_string(),
            ..Default::default()
        };
        assert!(form.validate().unwrap().inventory.is_none());
    }

    #[test]
    fn test_sign_in_form() {
        let form = SignInForm {
            email: "Admin@Example.com ".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(
            form.validate().unwrap(),
            ("admin@example.com".to_string(), "pw".to_string())
        );
        let form = SignInForm {
            email: "admin".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));
    }

    #[test]
    fn test_sign_up_form() {
        let mut form = SignUpForm {
            user: NewUserForm {
                email: "x@y.z".to_string(),
                first_name: "X".to_string(),
                last_name: "Y".to_string(),
                password: "password1".to_string(),
                ..Default::default()
            },
            confirm_password: "password2".to_string(),
        };
        assert_eq!(form.validate(), Err(FormError::PasswordMismatch));
        form.confirm_password = "password1".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_stock_form() {
        let product = Product {
            quantity: 4,
            inventory: Some(crate::records::Inventory {
                id: None,
                quantity: 4,
                location: "Aisle 3".to_string(),
            }),
            ..Default::default()
        };
        let mut form = StockForm::from(&product);
        assert_eq!(form.location, "Aisle 3");
        form.quantity = " 12 ".to_string();
        assert_eq!(
            form.validate().unwrap(),
            InventoryInput {
                quantity: 12,
                location: "Aisle 3".to_string()
            }
        );
        form.quantity = "-1".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidNumber("Quantity")));
        form.quantity = String::new();
        assert_eq!(form.validate(), Err(FormError::MissingRequired));
    }
}
