use std::sync::Arc;

use contracts::shared::validation::Validate;
use contracts::system::otp_config::{OtpConfig, OtpTestRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::crud::SettingsViewModel;
use crate::shared::dialogs::Dialogs;
use crate::shared::http::ApiClient;
use crate::system::auth::context::AdminContext;

const TEST_PATH: &str = "otp-config/test";

/// OTP/SMS settings plus a "send test code" action
#[derive(Clone)]
pub struct OtpConfigViewModel {
    pub settings: SettingsViewModel<OtpConfig>,
    pub test_phone: RwSignal<String>,
    pub sending_test: RwSignal<bool>,
    client: ApiClient,
    dialogs: Arc<dyn Dialogs>,
}

impl OtpConfigViewModel {
    pub fn new(context: &AdminContext) -> Self {
        Self {
            settings: SettingsViewModel::new(context),
            test_phone: RwSignal::new(String::new()),
            sending_test: RwSignal::new(false),
            client: context.client.clone(),
            dialogs: context.dialogs.clone(),
        }
    }

    pub fn load(&self) {
        self.settings.load();
    }

    pub fn save(&self) {
        self.settings.save();
    }

    /// Sends a code with the stored configuration, not the unsaved form
    pub fn send_test(&self) {
        if self.sending_test.get_untracked() {
            return;
        }
        let request = OtpTestRequest {
            phone: self.test_phone.get_untracked().trim().to_string(),
        };
        if let Err(errors) = request.validate() {
            self.dialogs.alert(&errors.summary());
            return;
        }

        self.sending_test.set(true);
        let this = self.clone();
        spawn_local(async move {
            let result = this.client.post_ack(TEST_PATH, &request).await;
            this.sending_test.set(false);
            match result {
                Ok(message) => {
                    log::info!("otp test sent to {}", request.phone);
                    let message = message.unwrap_or_else(|| format!("Test code sent to {}", request.phone));
                    this.dialogs.alert(&message);
                }
                Err(err) => {
                    log::error!("otp test to {} failed: {}", request.phone, err);
                    if !err.is_unauthorized() {
                        this.dialogs.alert(&format!("Failed to send test code: {}", err));
                    }
                }
            }
        });
    }
}
