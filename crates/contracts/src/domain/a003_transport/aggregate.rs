use serde::{Deserialize, Serialize};

use crate::domain::default_true;
use crate::shared::resource::{Resource, UploadResource};
use crate::shared::validation::{Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    Flight,
    Bus,
    Train,
    Ship,
    Car,
}

impl TransportType {
    pub const ALL: [TransportType; 5] = [
        TransportType::Flight,
        TransportType::Bus,
        TransportType::Train,
        TransportType::Ship,
        TransportType::Car,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransportType::Flight => "Flight",
            TransportType::Bus => "Bus",
            TransportType::Train => "Train",
            TransportType::Ship => "Ship",
            TransportType::Car => "Car",
        }
    }
}

/// Carrier or vehicle offered in tour packages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transport {
    pub id: i64,
    pub name: String,
    pub transport_type: TransportType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Resource for Transport {
    type Item = Transport;
    type Form = TransportForm;

    fn resource_index() -> &'static str {
        "a003"
    }

    fn path() -> &'static str {
        "transports"
    }

    fn element_name() -> &'static str {
        "Transport"
    }

    fn list_name() -> &'static str {
        "Transports"
    }

    fn item_id(item: &Transport) -> i64 {
        item.id
    }

    fn item_label(item: &Transport) -> String {
        format!("{} ({})", item.name, item.transport_type.label())
    }

    fn to_form(item: &Transport) -> TransportForm {
        TransportForm {
            name: item.name.clone(),
            transport_type: Some(item.transport_type),
            description: item.description.clone().unwrap_or_default(),
            is_active: item.is_active,
        }
    }
}

impl UploadResource for Transport {
    fn upload_slot() -> &'static str {
        "upload-image"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportForm {
    pub name: String,
    pub transport_type: Option<TransportType>,
    pub description: String,
    pub is_active: bool,
}

impl Default for TransportForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            transport_type: None,
            description: String::new(),
            is_active: true,
        }
    }
}

impl Validate for TransportForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        if self.transport_type.is_none() {
            errors.add("transport_type", "Transport type must be selected");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_is_snake_case_on_the_wire() {
        let json = serde_json::to_string(&TransportType::Flight).unwrap();
        assert_eq!(json, "\"flight\"");
    }

    #[test]
    fn test_type_is_required() {
        let form = TransportForm {
            name: "Garuda".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.first("transport_type").is_some());
    }
}
