//! API base URL resolution
//!
//! The backend listens on port 3000 of the host serving the dashboard, under
//! the `/api` prefix. A deployment can point the dashboard elsewhere by putting
//! a full base URL into `localStorage["api_base_url"]`.

const BASE_URL_OVERRIDE_KEY: &str = "api_base_url";

/// Get the base URL for API requests
///
/// # Returns
/// - API base URL like "http://localhost:3000/api"
/// - "/api" if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return "/api".to_string(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000/api", protocol, hostname)
}

fn stored_override() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let value = storage.get_item(BASE_URL_OVERRIDE_KEY).ok()??;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Where the REST backend lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Stored override first, then the serving host on port 3000
    pub fn from_window() -> Self {
        Self::new(stored_override().unwrap_or_else(api_base))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full API URL from a resource path
    ///
    /// # Example
    /// ```ignore
    /// let url = config.url("countries/7"); // http://host:3000/api/countries/7
    /// ```
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
