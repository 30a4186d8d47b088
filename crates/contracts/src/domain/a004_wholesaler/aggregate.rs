use serde::{Deserialize, Serialize};

use crate::domain::default_true;
use crate::shared::resource::Resource;
use crate::shared::validation::{Validate, ValidationErrors};

/// Wholesale travel partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wholesaler {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Resource for Wholesaler {
    type Item = Wholesaler;
    type Form = WholesalerForm;

    fn resource_index() -> &'static str {
        "a004"
    }

    fn path() -> &'static str {
        "wholesalers"
    }

    fn element_name() -> &'static str {
        "Wholesaler"
    }

    fn list_name() -> &'static str {
        "Wholesalers"
    }

    fn item_id(item: &Wholesaler) -> i64 {
        item.id
    }

    fn item_label(item: &Wholesaler) -> String {
        item.name.clone()
    }

    fn to_form(item: &Wholesaler) -> WholesalerForm {
        WholesalerForm {
            name: item.name.clone(),
            contact_person: item.contact_person.clone().unwrap_or_default(),
            email: item.email.clone(),
            phone: item.phone.clone().unwrap_or_default(),
            address: item.address.clone().unwrap_or_default(),
            website: item.website.clone().unwrap_or_default(),
            is_active: item.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WholesalerForm {
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: String,
    pub is_active: bool,
}

impl Default for WholesalerForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            contact_person: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            website: String::new(),
            is_active: true,
        }
    }
}

impl Validate for WholesalerForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        errors.require_email("email", "Email", &self.email);
        errors.into_result()
    }
}
