use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a005_blog_category::aggregate::is_valid_slug;
use crate::shared::resource::{Resource, UploadResource};
use crate::shared::validation::{Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    /// Value of the `status` list filter
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Rich text (HTML)
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for BlogPost {
    type Item = BlogPost;
    type Form = BlogPostForm;

    fn resource_index() -> &'static str {
        "a006"
    }

    fn path() -> &'static str {
        "blog-posts"
    }

    fn element_name() -> &'static str {
        "Blog post"
    }

    fn list_name() -> &'static str {
        "Blog posts"
    }

    fn item_id(item: &BlogPost) -> i64 {
        item.id
    }

    fn item_label(item: &BlogPost) -> String {
        item.title.clone()
    }

    fn to_form(item: &BlogPost) -> BlogPostForm {
        BlogPostForm {
            title: item.title.clone(),
            slug: item.slug.clone(),
            category_id: item
                .category_id
                .or_else(|| item.category.as_ref().map(|c| c.id)),
            excerpt: item.excerpt.clone().unwrap_or_default(),
            content: item.content.clone(),
            status: item.status,
        }
    }
}

impl UploadResource for BlogPost {
    fn upload_slot() -> &'static str {
        "upload-cover"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPostForm {
    pub title: String,
    pub slug: String,
    pub category_id: Option<i64>,
    pub excerpt: String,
    pub content: String,
    pub status: PostStatus,
}

impl Validate for BlogPostForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "Title", &self.title);
        errors.require_id("category_id", "Category", self.category_id);
        if is_blank_html(&self.content) {
            errors.add("content", "Content is required");
        }
        if !is_valid_slug(&self.slug) {
            errors.add("slug", "Slug may only contain lowercase letters, digits and dashes");
        }
        errors.into_result()
    }
}

/// Editor output with no visible text, e.g. `<p><br></p>`
pub fn is_blank_html(html: &str) -> bool {
    let mut in_tag = false;
    let mut text = String::new();
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&nbsp;", " ").trim().is_empty()
}
