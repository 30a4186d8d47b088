use serde::{Deserialize, Serialize};

/// Query parameters of `GET /{resource}`; empty fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ListQuery {
    /// Blank search text clears the filter
    pub fn with_search(mut self, text: &str) -> Self {
        let text = text.trim();
        self.search = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        self.page = Some(1);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    pub fn current_page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_resets_page() {
        let query = ListQuery::default().with_page(4).with_search("  bali ");
        assert_eq!(query.search.as_deref(), Some("bali"));
        assert_eq!(query.current_page(), 1);

        let cleared = query.with_search("   ");
        assert!(cleared.search.is_none());
    }

    #[test]
    fn test_page_is_at_least_one() {
        assert_eq!(ListQuery::default().with_page(0).current_page(), 1);
    }
}
