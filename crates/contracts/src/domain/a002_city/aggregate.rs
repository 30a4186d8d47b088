use serde::{Deserialize, Serialize};

use crate::domain::default_true;
use crate::shared::resource::{Resource, UploadResource};
use crate::shared::validation::{Validate, ValidationErrors};

/// City inside a destination country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub country_id: i64,
    #[serde(default)]
    pub country_name: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Resource for City {
    type Item = City;
    type Form = CityForm;

    fn resource_index() -> &'static str {
        "a002"
    }

    fn path() -> &'static str {
        "cities"
    }

    fn element_name() -> &'static str {
        "City"
    }

    fn list_name() -> &'static str {
        "Cities"
    }

    fn item_id(item: &City) -> i64 {
        item.id
    }

    fn item_label(item: &City) -> String {
        match &item.country_name {
            Some(country) => format!("{}, {}", item.name, country),
            None => item.name.clone(),
        }
    }

    fn to_form(item: &City) -> CityForm {
        CityForm {
            country_id: Some(item.country_id),
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            is_active: item.is_active,
        }
    }
}

impl UploadResource for City {
    fn upload_slot() -> &'static str {
        "upload-image"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityForm {
    pub country_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

impl Default for CityForm {
    fn default() -> Self {
        Self {
            country_id: None,
            name: String::new(),
            description: String::new(),
            is_active: true,
        }
    }
}

impl Validate for CityForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        errors.require_id("country_id", "Country", self.country_id);
        errors.into_result()
    }
}
