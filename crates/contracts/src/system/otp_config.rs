use serde::{Deserialize, Serialize};

use crate::shared::resource::SettingsGroup;
use crate::shared::validation::{Validate, ValidationErrors};

/// Placeholder replaced by the generated code in the message template
pub const CODE_PLACEHOLDER: &str = "{code}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmsProvider {
    Twilio,
    Vonage,
    Zenziva,
}

/// OTP delivery over SMS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpConfig {
    pub is_enabled: bool,
    pub provider: Option<SmsProvider>,
    pub sender_id: String,
    pub api_key: String,
    pub api_secret: String,
    pub otp_length: u8,
    pub expiry_seconds: u32,
    pub message_template: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            is_enabled: false,
            provider: None,
            sender_id: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            otp_length: 6,
            expiry_seconds: 300,
            message_template: format!("Your NextTrip verification code is {}", CODE_PLACEHOLDER),
        }
    }
}

impl SettingsGroup for OtpConfig {
    fn path() -> &'static str {
        "otp-config"
    }

    fn title() -> &'static str {
        "OTP / SMS"
    }
}

impl Validate for OtpConfig {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_range("otp_length", "OTP length", self.otp_length.into(), 4, 8);
        errors.require_range("expiry_seconds", "Expiry", self.expiry_seconds.into(), 30, 900);
        if !self.message_template.contains(CODE_PLACEHOLDER) {
            errors.add(
                "message_template",
                format!("Template must contain {}", CODE_PLACEHOLDER),
            );
        }

        // credentials only matter while sending is switched on
        if self.is_enabled {
            if self.provider.is_none() {
                errors.add("provider", "Provider must be selected");
            }
            errors.require_text("sender_id", "Sender ID", &self.sender_id);
            errors.require_text("api_key", "API key", &self.api_key);
        }
        errors.into_result()
    }
}

/// Body of `POST otp-config/test`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpTestRequest {
    pub phone: String,
}

impl Validate for OtpTestRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let digits = self.phone.chars().filter(|c| c.is_ascii_digit()).count();
        let allowed = self
            .phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-'));
        if !allowed || !(8..=15).contains(&digits) {
            errors.add("phone", "Phone number must have 8 to 15 digits");
        }
        errors.into_result()
    }
}
