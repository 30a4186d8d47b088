use serde::{Deserialize, Serialize};

use crate::shared::resource::SettingsGroup;
use crate::shared::validation::{Validate, ValidationErrors};

/// Site-wide SEO defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoSettings {
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub og_image_url: String,
    pub google_analytics_id: String,
}

impl SettingsGroup for SeoSettings {
    fn path() -> &'static str {
        "settings/seo"
    }

    fn title() -> &'static str {
        "SEO"
    }
}

const META_DESCRIPTION_MAX: usize = 160;

impl Validate for SeoSettings {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("meta_title", "Meta title", &self.meta_title);
        if self.meta_description.chars().count() > META_DESCRIPTION_MAX {
            errors.add(
                "meta_description",
                format!("Meta description must not exceed {} characters", META_DESCRIPTION_MAX),
            );
        }
        errors.into_result()
    }
}

/// Contact block shown in the site footer and contact page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub map_embed_url: String,
    pub facebook_url: String,
    pub instagram_url: String,
    pub youtube_url: String,
}

impl SettingsGroup for ContactSettings {
    fn path() -> &'static str {
        "settings/contact"
    }

    fn title() -> &'static str {
        "Contact info"
    }
}

impl Validate for ContactSettings {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_email("email", "Email", &self.email);
        errors.require_text("phone", "Phone", &self.phone);
        errors.into_result()
    }
}
