//! Client-side form validation
//!
//! Field errors use the same shape as the `errors` map of a server
//! envelope, so a form can show both through one code path.

use std::collections::BTreeMap;

/// Field name -> messages, as sent by the backend in `errors`
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Accumulated validation failures of one form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: FieldErrors,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Non-blank text is required
    pub fn require_text(&mut self, field: &str, label: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", label));
        }
    }

    /// A reference to another record must be selected
    pub fn require_id(&mut self, field: &str, label: &str, value: Option<i64>) {
        if value.is_none() {
            self.add(field, format!("{} must be selected", label));
        }
    }

    /// Required address with a local part and a dotted domain
    pub fn require_email(&mut self, field: &str, label: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.add(field, format!("{} is required", label));
            return;
        }
        let valid = match value.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.split('.').count() >= 2
                    && domain.split('.').all(|part| !part.is_empty())
            }
            None => false,
        };
        if !valid {
            self.add(field, format!("{} is not a valid email address", label));
        }
    }

    pub fn require_range(&mut self, field: &str, label: &str, value: i64, min: i64, max: i64) {
        if value < min || value > max {
            self.add(
                field,
                format!("{} must be between {} and {}", label, min, max),
            );
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &FieldErrors {
        &self.fields
    }

    pub fn into_fields(self) -> FieldErrors {
        self.fields
    }

    /// First message of a field, for inline display
    pub fn first(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|m| m.first())
            .map(String::as_str)
    }

    /// All messages joined into one line for a blocking alert
    pub fn summary(&self) -> String {
        self.fields
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<FieldErrors> for ValidationErrors {
    fn from(fields: FieldErrors) -> Self {
        Self { fields }
    }
}

/// Implemented by every form submitted to the backend
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_rejected() {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", "   ");
        errors.require_text("code", "Code", "ID");

        assert_eq!(errors.first("name"), Some("Name is required"));
        assert_eq!(errors.first("code"), None);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_summary_joins_all_messages() {
        let mut errors = ValidationErrors::new();
        errors.require_id("country_id", "Country", None);
        errors.require_range("otp_length", "OTP length", 12, 4, 8);

        let summary = errors.summary();
        assert!(summary.contains("Country must be selected"));
        assert!(summary.contains("OTP length must be between 4 and 8"));
    }

    #[test]
    fn test_email_shape() {
        let mut errors = ValidationErrors::new();
        errors.require_email("a", "Email", "ops@nexttrip.id");
        errors.require_email("b", "Email", "ops@nexttrip");
        errors.require_email("c", "Email", "@nexttrip.id");
        errors.require_email("d", "Email", "");

        assert_eq!(errors.first("a"), None);
        assert_eq!(errors.first("b"), Some("Email is not a valid email address"));
        assert_eq!(errors.first("c"), Some("Email is not a valid email address"));
        assert_eq!(errors.first("d"), Some("Email is required"));
    }

    #[test]
    fn test_empty_errors_are_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
