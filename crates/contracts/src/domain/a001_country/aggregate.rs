use serde::{Deserialize, Serialize};

use crate::domain::default_true;
use crate::shared::resource::{Resource, UploadResource};
use crate::shared::validation::{Validate, ValidationErrors};

// ============================================================================
// Aggregate
// ============================================================================

/// Destination country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    /// ISO 3166-1 alpha-2
    pub code: String,
    #[serde(default)]
    pub flag_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Resource for Country {
    type Item = Country;
    type Form = CountryForm;

    fn resource_index() -> &'static str {
        "a001"
    }

    fn path() -> &'static str {
        "countries"
    }

    fn element_name() -> &'static str {
        "Country"
    }

    fn list_name() -> &'static str {
        "Countries"
    }

    fn item_id(item: &Country) -> i64 {
        item.id
    }

    fn item_label(item: &Country) -> String {
        item.name.clone()
    }

    fn to_form(item: &Country) -> CountryForm {
        CountryForm {
            name: item.name.clone(),
            code: item.code.clone(),
            is_active: item.is_active,
        }
    }
}

impl UploadResource for Country {
    fn upload_slot() -> &'static str {
        "upload-flag"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryForm {
    pub name: String,
    pub code: String,
    pub is_active: bool,
}

impl Default for CountryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            is_active: true,
        }
    }
}

impl Validate for CountryForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        errors.require_text("code", "Code", &self.code);

        let code = self.code.trim();
        if !code.is_empty() && (code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic())) {
            errors.add("code", "Code must be two letters (ISO 3166-1)");
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_must_be_alpha2() {
        let mut form = CountryForm {
            name: "Indonesia".into(),
            code: "IDN".into(),
            ..Default::default()
        };
        assert!(form.validate().is_err());

        form.code = "ID".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_missing_flag_and_status_use_defaults() {
        let country: Country = serde_json::from_str(r#"{"id":1,"name":"Japan","code":"JP"}"#).unwrap();
        assert!(country.flag_url.is_none());
        assert!(country.is_active);
        assert_eq!(Country::full_name(), "a001_countries");
    }
}
