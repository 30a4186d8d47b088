use std::sync::Arc;

use contracts::shared::resource::SettingsGroup;
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::dialogs::Dialogs;
use crate::shared::resource_api::SettingsApi;
use crate::system::auth::context::AdminContext;

/// Edit form of one settings document
pub struct SettingsViewModel<S: SettingsGroup> {
    pub form: RwSignal<S>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub field_errors: RwSignal<FieldErrors>,
    pub error: RwSignal<Option<String>>,
    api: SettingsApi<S>,
    dialogs: Arc<dyn Dialogs>,
}

impl<S: SettingsGroup> Clone for SettingsViewModel<S> {
    fn clone(&self) -> Self {
        Self {
            form: self.form,
            loading: self.loading,
            saving: self.saving,
            field_errors: self.field_errors,
            error: self.error,
            api: self.api.clone(),
            dialogs: self.dialogs.clone(),
        }
    }
}

impl<S: SettingsGroup> SettingsViewModel<S> {
    pub fn new(context: &AdminContext) -> Self {
        Self {
            form: RwSignal::new(S::default()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            field_errors: RwSignal::new(FieldErrors::new()),
            error: RwSignal::new(None),
            api: SettingsApi::new(context.client.clone()),
            dialogs: context.dialogs.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        S::title()
    }

    pub fn field_error(&self, field: &str) -> Option<String> {
        self.field_errors
            .with(|errors| errors.get(field).and_then(|messages| messages.first().cloned()))
    }

    pub fn update_form(&self, edit: impl FnOnce(&mut S)) {
        self.form.update(edit);
    }

    /// Missing fields keep their defaults
    pub fn load(&self) {
        self.loading.set(true);
        let this = self.clone();
        spawn_local(async move {
            let result = this.api.load().await;
            this.loading.set(false);
            match result {
                Ok(settings) => {
                    this.form.set(settings);
                    this.error.set(None);
                }
                Err(err) => {
                    log::error!("{}: load failed: {}", S::path(), err);
                    this.error.set(Some(format!("Failed to load {} settings: {}", S::title(), err)));
                }
            }
        });
    }

    pub fn save(&self) {
        if self.saving.get_untracked() {
            return;
        }
        let settings = self.form.get_untracked();
        if let Err(errors) = settings.validate() {
            self.dialogs.alert(&errors.summary());
            self.field_errors.set(errors.into_fields());
            return;
        }

        self.field_errors.set(FieldErrors::new());
        self.saving.set(true);
        let this = self.clone();
        spawn_local(async move {
            let result = this.api.save(&settings).await;
            this.saving.set(false);
            match result {
                Ok(stored) => {
                    log::info!("{}: saved", S::path());
                    if let Some(stored) = stored {
                        this.form.set(stored);
                    }
                    this.dialogs.alert(&format!("{} settings saved", S::title()));
                }
                Err(err) => {
                    log::error!("{}: save failed: {}", S::path(), err);
                    if let Some(fields) = err.field_errors() {
                        this.field_errors.set(fields.clone());
                    }
                    if !err.is_unauthorized() {
                        this.dialogs.alert(&format!("Failed to save {} settings: {}", S::title(), err));
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use contracts::system::settings::ContactSettings;

    use super::*;
    use crate::shared::api_utils::ApiConfig;
    use crate::shared::dialogs::tests::ScriptedDialogs;
    use crate::shared::http::ApiClient;
    use crate::system::auth::context::Session;

    #[test]
    fn test_invalid_settings_are_not_sent() {
        let owner = Owner::new();
        owner.set();

        let dialogs = Arc::new(ScriptedDialogs::default());
        let context = AdminContext::new(
            ApiClient::new(ApiConfig::new("http://localhost:3000/api"), Session::default()),
            dialogs.clone(),
        );
        let vm = SettingsViewModel::<ContactSettings>::new(&context);
        vm.update_form(|settings| settings.phone = "+62 361 123456".into());

        vm.save();

        assert!(!vm.saving.get_untracked());
        assert_eq!(vm.field_error("email").as_deref(), Some("Email is required"));
        assert!(vm.field_error("phone").is_none());
        assert_eq!(dialogs.alerts().len(), 1);
    }
}
