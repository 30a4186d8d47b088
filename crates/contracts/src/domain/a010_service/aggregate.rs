use serde::{Deserialize, Serialize};

use crate::domain::default_true;
use crate::shared::ordering::Orderable;
use crate::shared::resource::{Resource, SortableResource};
use crate::shared::validation::{Validate, ValidationErrors};

/// Service highlight on the "About Us" page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl Orderable for Service {
    fn id(&self) -> i64 {
        self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
    }
}

impl Resource for Service {
    type Item = Service;
    type Form = ServiceForm;

    fn resource_index() -> &'static str {
        "a010"
    }

    fn path() -> &'static str {
        "services"
    }

    fn element_name() -> &'static str {
        "Service"
    }

    fn list_name() -> &'static str {
        "Services"
    }

    fn item_id(item: &Service) -> i64 {
        item.id
    }

    fn item_label(item: &Service) -> String {
        item.title.clone()
    }

    fn to_form(item: &Service) -> ServiceForm {
        ServiceForm {
            title: item.title.clone(),
            description: item.description.clone().unwrap_or_default(),
            icon: item.icon.clone().unwrap_or_default(),
            is_active: item.is_active,
        }
    }
}

impl SortableResource for Service {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceForm {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub is_active: bool,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            icon: String::new(),
            is_active: true,
        }
    }
}

impl Validate for ServiceForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "Title", &self.title);
        errors.into_result()
    }
}
