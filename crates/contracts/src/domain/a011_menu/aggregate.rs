use serde::{Deserialize, Serialize};

use crate::domain::default_true;
use crate::shared::resource::Resource;
use crate::shared::validation::{Validate, ValidationErrors};

/// Placement slot of a site menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuLocation {
    #[default]
    Header,
    Footer,
    FooterBottom,
    Mobile,
}

impl MenuLocation {
    pub const ALL: [MenuLocation; 4] = [
        MenuLocation::Header,
        MenuLocation::Footer,
        MenuLocation::FooterBottom,
        MenuLocation::Mobile,
    ];

    /// Value of the `location` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuLocation::Header => "header",
            MenuLocation::Footer => "footer",
            MenuLocation::FooterBottom => "footer_bottom",
            MenuLocation::Mobile => "mobile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuLocation::Header => "Header",
            MenuLocation::Footer => "Footer",
            MenuLocation::FooterBottom => "Footer bottom",
            MenuLocation::Mobile => "Mobile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkTarget {
    #[default]
    #[serde(rename = "_self")]
    SameTab,
    #[serde(rename = "_blank")]
    NewTab,
}

/// Site menu entry; roots carry their children, children carry none
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: i64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub target: LinkTarget,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub css_class: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub location: MenuLocation,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub all_children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn has_children(&self) -> bool {
        !self.all_children.is_empty()
    }
}

impl Resource for MenuNode {
    type Item = MenuNode;
    type Form = MenuForm;

    fn resource_index() -> &'static str {
        "a011"
    }

    fn path() -> &'static str {
        "menus"
    }

    fn element_name() -> &'static str {
        "Menu item"
    }

    fn list_name() -> &'static str {
        "Site menus"
    }

    fn item_id(item: &MenuNode) -> i64 {
        item.id
    }

    fn item_label(item: &MenuNode) -> String {
        item.title.clone()
    }

    fn to_form(item: &MenuNode) -> MenuForm {
        MenuForm {
            title: item.title.clone(),
            url: item.url.clone(),
            target: item.target,
            icon: item.icon.clone().unwrap_or_default(),
            css_class: item.css_class.clone().unwrap_or_default(),
            is_active: item.is_active,
            location: item.location,
            parent_id: item.parent_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuForm {
    pub title: String,
    pub url: String,
    pub target: LinkTarget,
    pub icon: String,
    pub css_class: String,
    pub is_active: bool,
    pub location: MenuLocation,
    pub parent_id: Option<i64>,
}

impl Default for MenuForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            target: LinkTarget::SameTab,
            icon: String::new(),
            css_class: String::new(),
            is_active: true,
            location: MenuLocation::Header,
            parent_id: None,
        }
    }
}

impl Validate for MenuForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "Title", &self.title);
        errors.require_text("url", "URL", &self.url);
        errors.into_result()
    }
}

/// Entry of `POST /menus/reorder`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuReorderEntry {
    pub id: i64,
    pub sort_order: i32,
    pub parent_id: Option<i64>,
}
