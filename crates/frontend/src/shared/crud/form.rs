use std::rc::Rc;
use std::sync::Arc;

use contracts::shared::envelope::ApiError;
use contracts::shared::resource::Resource;
use contracts::shared::validation::{FieldErrors, ValidationErrors};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::dialogs::Dialogs;
use crate::shared::resource_api::ResourceApi;

/// Create/edit form of one resource
///
/// `editing_id` is `None` while creating. Validation runs locally before any
/// request; server-side field errors land in the same `field_errors` map.
pub struct FormViewModel<R: Resource> {
    pub form: RwSignal<R::Form>,
    pub editing_id: RwSignal<Option<i64>>,
    pub field_errors: RwSignal<FieldErrors>,
    pub saving: RwSignal<bool>,
    api: ResourceApi<R>,
    dialogs: Arc<dyn Dialogs>,
}

impl<R: Resource> Clone for FormViewModel<R> {
    fn clone(&self) -> Self {
        Self {
            form: self.form,
            editing_id: self.editing_id,
            field_errors: self.field_errors,
            saving: self.saving,
            api: self.api.clone(),
            dialogs: self.dialogs.clone(),
        }
    }
}

impl<R: Resource> FormViewModel<R> {
    pub fn new(api: ResourceApi<R>, dialogs: Arc<dyn Dialogs>) -> Self {
        Self {
            form: RwSignal::new(R::Form::default()),
            editing_id: RwSignal::new(None),
            field_errors: RwSignal::new(FieldErrors::new()),
            saving: RwSignal::new(false),
            api,
            dialogs,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing_id.get().is_some()
    }

    /// First error of a field, for display under the input
    pub fn field_error(&self, field: &str) -> Option<String> {
        self.field_errors
            .with(|errors| errors.get(field).and_then(|messages| messages.first().cloned()))
    }

    pub fn update_form(&self, edit: impl FnOnce(&mut R::Form)) {
        self.form.update(edit);
    }

    /// Empty form in create mode
    pub fn start_create(&self) {
        self.form.set(R::Form::default());
        self.editing_id.set(None);
        self.field_errors.set(FieldErrors::new());
    }

    /// Form pre-filled from an existing item
    pub fn start_edit(&self, item: &R::Item) {
        self.form.set(R::to_form(item));
        self.editing_id.set(Some(R::item_id(item)));
        self.field_errors.set(FieldErrors::new());
    }

    pub fn cancel(&self) {
        self.start_create();
    }

    pub fn submit(&self, on_saved: Rc<dyn Fn()>) {
        self.submit_checked(|_, _| Ok(()), on_saved);
    }

    /// Submit with an extra check that needs screen state the form lacks
    pub fn submit_checked(
        &self,
        extra_check: impl FnOnce(&R::Form, Option<i64>) -> Result<(), ValidationErrors>,
        on_saved: Rc<dyn Fn()>,
    ) {
        if self.saving.get_untracked() {
            return;
        }
        let form = self.form.get_untracked();
        let editing_id = self.editing_id.get_untracked();

        let checked = R::validate_form(&form, editing_id.is_some()).and_then(|_| extra_check(&form, editing_id));
        if let Err(errors) = checked {
            self.dialogs.alert(&errors.summary());
            self.field_errors.set(errors.into_fields());
            return;
        }

        self.field_errors.set(FieldErrors::new());
        self.saving.set(true);
        let this = self.clone();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => this.api.update(id, &form).await,
                None => this.api.create(&form).await,
            };
            this.saving.set(false);
            match result {
                Ok(_) => {
                    log::info!("{}: saved {:?}", R::full_name(), editing_id);
                    this.start_create();
                    on_saved();
                }
                Err(err) => this.report_failure(err),
            }
        });
    }

    fn report_failure(&self, err: ApiError) {
        log::error!("{}: save failed: {}", R::full_name(), err);
        if let Some(fields) = err.field_errors() {
            self.field_errors.set(fields.clone());
        }
        if !err.is_unauthorized() {
            self.dialogs
                .alert(&format!("Failed to save {}: {}", R::element_name().to_lowercase(), err));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use contracts::domain::a001_country::aggregate::Country;

    use super::*;
    use crate::shared::api_utils::ApiConfig;
    use crate::shared::dialogs::tests::ScriptedDialogs;
    use crate::shared::http::ApiClient;
    use crate::system::auth::context::Session;

    fn view_model(dialogs: Arc<ScriptedDialogs>) -> FormViewModel<Country> {
        let client = ApiClient::new(ApiConfig::new("http://localhost:3000/api"), Session::default());
        FormViewModel::new(ResourceApi::new(client), dialogs)
    }

    #[test]
    fn test_invalid_form_is_not_sent() {
        let owner = Owner::new();
        owner.set();

        let dialogs = Arc::new(ScriptedDialogs::answering(true));
        let vm = view_model(dialogs.clone());
        let saved = Rc::new(Cell::new(false));
        let flag = saved.clone();

        vm.submit(Rc::new(move || flag.set(true)));

        assert!(!saved.get());
        assert!(!vm.saving.get_untracked());
        assert_eq!(dialogs.alerts().len(), 1);
        assert!(vm.field_error("name").is_some());
    }

    #[test]
    fn test_extra_check_blocks_submit() {
        let owner = Owner::new();
        owner.set();

        let dialogs = Arc::new(ScriptedDialogs::answering(true));
        let vm = view_model(dialogs.clone());
        vm.update_form(|form| {
            form.name = "Indonesia".into();
            form.code = "ID".into();
        });

        vm.submit_checked(
            |_, _| {
                let mut errors = ValidationErrors::new();
                errors.add("code", "Code already used");
                errors.into_result()
            },
            Rc::new(|| {}),
        );

        assert_eq!(vm.field_error("code").as_deref(), Some("Code already used"));
        assert_eq!(dialogs.alerts(), vec!["Code already used".to_string()]);
    }

    #[test]
    fn test_edit_then_cancel_returns_to_create_mode() {
        let owner = Owner::new();
        owner.set();

        let vm = view_model(Arc::new(ScriptedDialogs::default()));
        let country: Country = serde_json::from_str(r#"{"id":7,"name":"Japan","code":"JP"}"#).unwrap();

        vm.start_edit(&country);
        assert_eq!(vm.editing_id.get_untracked(), Some(7));
        assert_eq!(vm.form.get_untracked().name, "Japan");

        vm.cancel();
        assert_eq!(vm.editing_id.get_untracked(), None);
        assert!(vm.form.get_untracked().name.is_empty());
    }
}
