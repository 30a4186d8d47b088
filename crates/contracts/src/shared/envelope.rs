//! Response envelope of the admin REST API
//!
//! Every response is parsed once here into `Result<_, ApiError>`; screens
//! never look at raw JSON.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::validation::FieldErrors;

/// Pagination block of list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            total: 0,
        }
    }
}

/// `{ success, data, errors, message, meta }`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: Option<bool>,
    pub data: Option<T>,
    pub errors: Option<FieldErrors>,
    pub message: Option<String>,
    pub meta: Option<PageMeta>,
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: Option<PageMeta>,
}

/// Failure of an API call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Request failed (HTTP {status}): {}", .message.as_deref().unwrap_or("server error"))]
    Http { status: u16, message: Option<String> },

    #[error("{message}")]
    Validation { message: String, errors: FieldErrors },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Response did not contain data")]
    MissingData,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Field-level messages when the server rejected the submitted data
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

const DEFAULT_VALIDATION_MESSAGE: &str = "The given data was invalid.";

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn rejection(status: u16, message: Option<String>, errors: Option<FieldErrors>) -> ApiError {
    match errors {
        Some(errors) if !errors.is_empty() => ApiError::Validation {
            message: message.unwrap_or_else(|| DEFAULT_VALIDATION_MESSAGE.to_string()),
            errors,
        },
        _ => ApiError::Http { status, message },
    }
}

fn failure(status: u16, body: &str) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized;
    }
    match serde_json::from_str::<Envelope<Value>>(body) {
        Ok(env) => rejection(status, env.message, env.errors),
        Err(_) => ApiError::Http {
            status,
            message: None,
        },
    }
}

/// Parse a response into an envelope, turning HTTP and `success: false`
/// failures into `ApiError`
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Envelope<T>, ApiError> {
    if !is_success(status) {
        return Err(failure(status, body));
    }

    let value: Value = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if value.get("success") == Some(&Value::Bool(false)) {
        let env: Envelope<Value> =
            serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
        return Err(rejection(status, env.message, env.errors));
    }

    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Response that must carry `data`
pub fn decode_data<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    decode_envelope::<T>(status, body)?
        .data
        .ok_or(ApiError::MissingData)
}

/// List response; a bare JSON array is accepted as an unpaginated list
pub fn decode_page<T: DeserializeOwned>(status: u16, body: &str) -> Result<Page<T>, ApiError> {
    if is_success(status) && body.trim_start().starts_with('[') {
        let items: Vec<T> =
            serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        return Ok(Page { items, meta: None });
    }

    let env = decode_envelope::<Vec<T>>(status, body)?;
    Ok(Page {
        items: env.data.unwrap_or_default(),
        meta: env.meta,
    })
}

/// Acknowledgement of delete/reorder calls; returns the server message if any
pub fn decode_ack(status: u16, body: &str) -> Result<Option<String>, ApiError> {
    if is_success(status) && body.trim().is_empty() {
        return Ok(None);
    }
    Ok(decode_envelope::<Value>(status, body)?.message)
}
