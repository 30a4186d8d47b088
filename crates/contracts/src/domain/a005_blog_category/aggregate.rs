use serde::{Deserialize, Serialize};

use crate::domain::default_true;
use crate::shared::ordering::Orderable;
use crate::shared::resource::{Resource, SortableResource};
use crate::shared::validation::{Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl Orderable for BlogCategory {
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

impl Resource for BlogCategory {
    type Item = BlogCategory;
    type Form = BlogCategoryForm;

    fn resource_index() -> &'static str {
        "a005"
    }

    fn path() -> &'static str {
        "blog-categories"
    }

    fn element_name() -> &'static str {
        "Blog category"
    }

    fn list_name() -> &'static str {
        "Blog categories"
    }

    fn item_id(item: &BlogCategory) -> i64 {
        item.id
    }

    fn item_label(item: &BlogCategory) -> String {
        item.name.clone()
    }

    fn to_form(item: &BlogCategory) -> BlogCategoryForm {
        BlogCategoryForm {
            name: item.name.clone(),
            slug: item.slug.clone(),
            description: item.description.clone().unwrap_or_default(),
            is_active: item.is_active,
        }
    }
}

impl SortableResource for BlogCategory {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogCategoryForm {
    pub name: String,
    /// Left blank, the server derives it from the name
    pub slug: String,
    pub description: String,
    pub is_active: bool,
}

impl Default for BlogCategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            description: String::new(),
            is_active: true,
        }
    }
}

impl Validate for BlogCategoryForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        if !is_valid_slug(&self.slug) {
            errors.add("slug", "Slug may only contain lowercase letters, digits and dashes");
        }
        errors.into_result()
    }
}

/// Empty, or lowercase words joined by single dashes
pub fn is_valid_slug(slug: &str) -> bool {
    slug.is_empty()
        || slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_rules() {
        assert!(is_valid_slug(""));
        assert!(is_valid_slug("travel-tips-2024"));
        assert!(!is_valid_slug("Travel Tips"));
        assert!(!is_valid_slug("double--dash"));
        assert!(!is_valid_slug("-leading"));
    }
}
