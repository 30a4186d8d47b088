use serde::{Deserialize, Serialize};

use crate::shared::ordering::Orderable;
use crate::shared::resource::{Resource, SortableResource, UploadResource};
use crate::shared::validation::{Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

impl Orderable for Award {
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

impl Resource for Award {
    type Item = Award;
    type Form = AwardForm;

    fn resource_index() -> &'static str {
        "a008"
    }

    fn path() -> &'static str {
        "awards"
    }

    fn element_name() -> &'static str {
        "Award"
    }

    fn list_name() -> &'static str {
        "Awards"
    }

    fn item_id(item: &Award) -> i64 {
        item.id
    }

    fn item_label(item: &Award) -> String {
        match item.year {
            Some(year) => format!("{} ({})", item.title, year),
            None => item.title.clone(),
        }
    }

    fn to_form(item: &Award) -> AwardForm {
        AwardForm {
            title: item.title.clone(),
            issuer: item.issuer.clone().unwrap_or_default(),
            year: item.year,
        }
    }
}

impl SortableResource for Award {}

impl UploadResource for Award {
    fn upload_slot() -> &'static str {
        "upload-image"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AwardForm {
    pub title: String,
    pub issuer: String,
    pub year: Option<i32>,
}

impl Validate for AwardForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "Title", &self.title);
        if let Some(year) = self.year {
            errors.require_range("year", "Year", year.into(), 1900, 2100);
        }
        errors.into_result()
    }
}
