use serde::{Deserialize, Serialize};

use crate::domain::default_true;
use crate::shared::ordering::Orderable;
use crate::shared::resource::{Resource, SortableResource, UploadResource};
use crate::shared::validation::{Validate, ValidationErrors};

/// Industry association shown on the "About Us" page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl Orderable for Association {
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

impl Resource for Association {
    type Item = Association;
    type Form = AssociationForm;

    fn resource_index() -> &'static str {
        "a007"
    }

    fn path() -> &'static str {
        "associations"
    }

    fn element_name() -> &'static str {
        "Association"
    }

    fn list_name() -> &'static str {
        "Associations"
    }

    fn item_id(item: &Association) -> i64 {
        item.id
    }

    fn item_label(item: &Association) -> String {
        item.name.clone()
    }

    fn to_form(item: &Association) -> AssociationForm {
        AssociationForm {
            name: item.name.clone(),
            website_url: item.website_url.clone().unwrap_or_default(),
            is_active: item.is_active,
        }
    }
}

impl SortableResource for Association {}

impl UploadResource for Association {
    fn upload_slot() -> &'static str {
        "upload-logo"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationForm {
    pub name: String,
    pub website_url: String,
    pub is_active: bool,
}

impl Default for AssociationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            website_url: String::new(),
            is_active: true,
        }
    }
}

impl Validate for AssociationForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        let url = self.website_url.trim();
        if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.add("website_url", "Website must start with http:// or https://");
        }
        errors.into_result()
    }
}
