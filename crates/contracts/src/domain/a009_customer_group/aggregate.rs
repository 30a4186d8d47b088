use serde::{Deserialize, Serialize};

use crate::shared::ordering::Orderable;
use crate::shared::resource::{Resource, SortableResource};
use crate::shared::validation::{Validate, ValidationErrors};

/// Customer segment block ("Corporate", "Families", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Icon name from the icon picker
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

impl Orderable for CustomerGroup {
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

impl Resource for CustomerGroup {
    type Item = CustomerGroup;
    type Form = CustomerGroupForm;

    fn resource_index() -> &'static str {
        "a009"
    }

    fn path() -> &'static str {
        "customer-groups"
    }

    fn element_name() -> &'static str {
        "Customer group"
    }

    fn list_name() -> &'static str {
        "Customer groups"
    }

    fn item_id(item: &CustomerGroup) -> i64 {
        item.id
    }

    fn item_label(item: &CustomerGroup) -> String {
        item.name.clone()
    }

    fn to_form(item: &CustomerGroup) -> CustomerGroupForm {
        CustomerGroupForm {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            icon: item.icon.clone().unwrap_or_default(),
        }
    }
}

impl SortableResource for CustomerGroup {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerGroupForm {
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl Validate for CustomerGroupForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        errors.into_result()
    }
}
