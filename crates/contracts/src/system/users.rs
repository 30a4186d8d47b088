use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::default_true;
use crate::shared::resource::Resource;
use crate::shared::validation::{Validate, ValidationErrors};

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    #[default]
    Staff,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for User {
    type Item = User;
    type Form = UserForm;

    fn resource_index() -> &'static str {
        "sys"
    }

    fn path() -> &'static str {
        "users"
    }

    fn element_name() -> &'static str {
        "User"
    }

    fn list_name() -> &'static str {
        "Users"
    }

    fn item_id(item: &User) -> i64 {
        item.id
    }

    fn item_label(item: &User) -> String {
        format!("{} <{}>", item.name, item.email)
    }

    fn to_form(item: &User) -> UserForm {
        UserForm {
            name: item.name.clone(),
            email: item.email.clone(),
            role: item.role,
            is_active: item.is_active,
            password: None,
        }
    }

    /// Password is mandatory on create, optional on update
    fn validate_form(form: &UserForm, is_update: bool) -> Result<(), ValidationErrors> {
        let mut errors = match form.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        let password = form.password.as_deref().unwrap_or("");
        if !is_update && password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    /// Omitted on update to keep the current password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: UserRole::Staff,
            is_active: true,
            password: None,
        }
    }
}

impl Validate for UserForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        errors.require_email("email", "Email", &self.email);
        if let Some(password) = self.password.as_deref() {
            if !password.is_empty() && password.chars().count() < MIN_PASSWORD_LENGTH {
                errors.add(
                    "password",
                    format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
                );
            }
        }
        errors.into_result()
    }
}
