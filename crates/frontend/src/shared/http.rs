//! Authenticated JSON client for the admin REST API
//!
//! Every call goes through [`ApiClient`], which attaches the session's
//! current bearer token,
//! turns transport failures into [`ApiError::Network`] and hands the raw
//! status/body pair to the envelope decoders in `contracts`.

use std::sync::Arc;

use contracts::shared::envelope::{decode_ack, decode_data, decode_envelope, decode_page, ApiError, Page};
use contracts::shared::list_query::ListQuery;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api_utils::ApiConfig;
use crate::system::auth::context::Session;

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD: &str = "file";

/// Called on every 401 so the shell can send the user back to login
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// `{base}/{path}?{query}`; an empty query adds no `?`
pub fn list_url(config: &ApiConfig, path: &str, query: &ListQuery) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Decode(format!("query: {}", e)))?;
    let url = config.url(path);
    if qs.is_empty() {
        Ok(url)
    } else {
        Ok(format!("{}?{}", url, qs))
    }
}

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    session: Session,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, session: Session) -> Self {
        Self {
            config,
            session,
            on_unauthorized: None,
        }
    }

    pub fn with_unauthorized_hook(mut self, hook: UnauthorizedHook) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Session whose current token goes out with every request
    pub fn session(&self) -> Session {
        self.session
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match self.session.authorization_header() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    fn json_request<B: Serialize + ?Sized>(&self, builder: RequestBuilder, body: &B) -> Result<Request, ApiError> {
        self.authorized(builder)
            .json(body)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))
    }

    fn bare_request(&self, builder: RequestBuilder) -> Result<Request, ApiError> {
        self.authorized(builder)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))
    }

    async fn execute(&self, request: Request) -> Result<(u16, String), ApiError> {
        let method = request.method();
        let url = request.url();
        let response = request.send().await.map_err(|e| {
            log::error!("{:?} {} failed: {}", method, url, e);
            ApiError::Network(format!("Failed to send request: {}", e))
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;
        log::debug!("{:?} {} -> {}", method, url, status);

        if status == 401 {
            log::warn!("{} rejected the session token", url);
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
        }
        Ok((status, body))
    }

    /// `GET {path}` with list filters
    pub async fn list<T: DeserializeOwned>(&self, path: &str, query: &ListQuery) -> Result<Page<T>, ApiError> {
        let url = list_url(&self.config, path, query)?;
        let request = self.bare_request(Request::get(&url))?;
        let (status, body) = self.execute(request).await?;
        decode_page(status, &body)
    }

    /// `GET {path}`; the envelope must carry `data`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.bare_request(Request::get(&self.config.url(path)))?;
        let (status, body) = self.execute(request).await?;
        decode_data(status, &body)
    }

    /// `POST {path}`; returns `data` when the server sends it back
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.json_request(Request::post(&self.config.url(path)), body)?;
        let (status, text) = self.execute(request).await?;
        Ok(decode_envelope(status, &text)?.data)
    }

    /// `PUT {path}`; returns `data` when the server sends it back
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.json_request(Request::put(&self.config.url(path)), body)?;
        let (status, text) = self.execute(request).await?;
        Ok(decode_envelope(status, &text)?.data)
    }

    /// `POST {path}` where only success matters; returns the server message
    pub async fn post_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<String>, ApiError> {
        let request = self.json_request(Request::post(&self.config.url(path)), body)?;
        let (status, text) = self.execute(request).await?;
        decode_ack(status, &text)
    }

    pub async fn delete(&self, path: &str) -> Result<Option<String>, ApiError> {
        let request = self.bare_request(Request::delete(&self.config.url(path)))?;
        let (status, text) = self.execute(request).await?;
        decode_ack(status, &text)
    }

    /// Multipart `POST {path}` with the file under [`UPLOAD_FIELD`]
    pub async fn upload(&self, path: &str, file: &web_sys::File) -> Result<Option<String>, ApiError> {
        let form = web_sys::FormData::new()
            .map_err(|e| ApiError::Network(format!("FormData unavailable: {:?}", e)))?;
        form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
            .map_err(|e| ApiError::Network(format!("Failed to attach file: {:?}", e)))?;

        // the browser sets the multipart boundary itself
        let request = self
            .authorized(Request::post(&self.config.url(path)))
            .body(form)
            .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?;
        let (status, text) = self.execute(request).await?;
        decode_ack(status, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ApiConfig {
        ApiConfig::new("http://localhost:3000/api")
    }

    #[test]
    fn test_list_url_without_filters() {
        let url = list_url(&config(), "countries", &ListQuery::default()).unwrap();
        assert_eq!(url, "http://localhost:3000/api/countries");
    }

    #[test]
    fn test_list_url_carries_filters() {
        let query = ListQuery {
            country_id: Some(3),
            ..ListQuery::default()
        }
        .with_search("ubud");
        let url = list_url(&config(), "cities", &query).unwrap();
        assert!(url.starts_with("http://localhost:3000/api/cities?"));
        assert!(url.contains("page=1"));
        assert!(url.contains("search=ubud"));
        assert!(url.contains("country_id=3"));
        assert!(!url.contains("status"));
    }

    #[test]
    fn test_menu_location_filter() {
        let query = ListQuery {
            location: Some("footer_bottom".into()),
            ..ListQuery::default()
        };
        let url = list_url(&config(), "menus", &query).unwrap();
        assert_eq!(url, "http://localhost:3000/api/menus?location=footer_bottom");
    }
}
