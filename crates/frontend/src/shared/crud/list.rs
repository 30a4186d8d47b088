use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use contracts::shared::envelope::PageMeta;
use contracts::shared::list_query::ListQuery;
use contracts::shared::request_sequence::RequestSequence;
use contracts::shared::resource::{Resource, UploadResource};
use contracts::shared::upload::UploadTracker;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::actions;
use super::form::FormViewModel;
use crate::shared::dialogs::Dialogs;
use crate::shared::resource_api::ResourceApi;
use crate::system::auth::context::AdminContext;

/// Quiet period before a search keystroke triggers a fetch
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Paged, searchable list with an inline create/edit form
///
/// Only the response of the most recent fetch is applied; answers to
/// superseded fetches are dropped.
pub struct CrudListViewModel<R: Resource> {
    pub items: RwSignal<Vec<R::Item>>,
    pub meta: RwSignal<PageMeta>,
    pub query: RwSignal<ListQuery>,
    pub search_text: RwSignal<String>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub uploads: RwSignal<UploadTracker>,
    pub form: FormViewModel<R>,
    sequence: Rc<RefCell<RequestSequence>>,
    search_generation: Rc<Cell<u64>>,
    api: ResourceApi<R>,
    dialogs: Arc<dyn Dialogs>,
}

impl<R: Resource> Clone for CrudListViewModel<R> {
    fn clone(&self) -> Self {
        Self {
            items: self.items,
            meta: self.meta,
            query: self.query,
            search_text: self.search_text,
            loading: self.loading,
            error: self.error,
            uploads: self.uploads,
            form: self.form.clone(),
            sequence: self.sequence.clone(),
            search_generation: self.search_generation.clone(),
            api: self.api.clone(),
            dialogs: self.dialogs.clone(),
        }
    }
}

impl<R: Resource> CrudListViewModel<R> {
    pub fn new(context: &AdminContext) -> Self {
        Self::with_query(context, ListQuery::default())
    }

    /// Start from preset filters, e.g. the cities of one country
    pub fn with_query(context: &AdminContext, query: ListQuery) -> Self {
        let api = ResourceApi::<R>::new(context.client.clone());
        Self {
            items: RwSignal::new(Vec::new()),
            meta: RwSignal::new(PageMeta::default()),
            query: RwSignal::new(query),
            search_text: RwSignal::new(String::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            uploads: RwSignal::new(UploadTracker::new()),
            form: FormViewModel::new(api.clone(), context.dialogs.clone()),
            sequence: Rc::new(RefCell::new(RequestSequence::new())),
            search_generation: Rc::new(Cell::new(0)),
            api,
            dialogs: context.dialogs.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        R::list_name()
    }

    /// Fetch the current page; on failure the list is left empty
    pub fn load(&self) {
        let ticket = self.sequence.borrow_mut().begin_load();
        let query = self.query.get_untracked();
        self.loading.set(true);

        let this = self.clone();
        spawn_local(async move {
            let result = this.api.list(&query).await;
            if !this.sequence.borrow().is_current_load(ticket) {
                log::debug!("{}: dropping stale page {:?}", R::full_name(), ticket);
                return;
            }
            this.loading.set(false);
            match result {
                Ok(page) => {
                    let meta = page.meta.unwrap_or(PageMeta {
                        current_page: 1,
                        last_page: 1,
                        total: page.items.len() as u64,
                    });
                    this.items.set(page.items);
                    this.meta.set(meta);
                    this.error.set(None);
                }
                Err(err) => {
                    log::error!("{}: load failed: {}", R::full_name(), err);
                    this.items.set(Vec::new());
                    this.meta.set(PageMeta::default());
                    this.error.set(Some(format!("Failed to load {}: {}", R::list_name().to_lowercase(), err)));
                }
            }
        });
    }

    /// Debounced: only the last text typed within the quiet period is fetched
    pub fn set_search(&self, text: String) {
        self.search_text.set(text.clone());
        let generation = self.search_generation.get() + 1;
        self.search_generation.set(generation);

        let this = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if this.search_generation.get() != generation {
                return;
            }
            this.query.update(|query| *query = std::mem::take(query).with_search(&text));
            this.load();
        });
    }

    /// Clamped to the pages the server reported
    pub fn set_page(&self, page: u32) {
        let last_page = self.meta.get_untracked().last_page.max(1);
        let page = page.clamp(1, last_page);
        if page == self.query.get_untracked().current_page() {
            return;
        }
        self.query.update(|query| *query = std::mem::take(query).with_page(page));
        self.load();
    }

    /// Change filters and restart from the first page
    pub fn set_filter(&self, edit: impl FnOnce(&mut ListQuery)) {
        self.query.update(|query| {
            edit(query);
            query.page = Some(1);
        });
        self.load();
    }

    pub fn start_create(&self) {
        self.form.start_create();
    }

    pub fn start_edit(&self, item: &R::Item) {
        self.form.start_edit(item);
    }

    /// Save the form, then refresh the current page
    pub fn submit(&self) {
        let this = self.clone();
        self.form.submit(Rc::new(move || this.load()));
    }

    pub fn delete(&self, item: &R::Item) {
        let prompt = actions::delete_prompt::<R>(item);
        let this = self.clone();
        actions::confirm_and_delete(
            self.api.clone(),
            self.dialogs.clone(),
            R::item_id(item),
            &prompt,
            move || this.load(),
        );
    }
}

impl<R: UploadResource> CrudListViewModel<R> {
    pub fn upload(&self, id: i64, file: web_sys::File) {
        let this = self.clone();
        actions::upload_for_row(
            self.api.clone(),
            self.dialogs.clone(),
            self.uploads,
            id,
            file,
            move || this.load(),
        );
    }

    pub fn is_uploading(&self, id: i64) -> bool {
        self.uploads.with(|tracker| tracker.is_uploading(id))
    }
}

#[cfg(test)]
mod tests {
    use contracts::domain::a002_city::aggregate::City;

    use super::*;
    use crate::shared::api_utils::ApiConfig;
    use crate::shared::dialogs::tests::ScriptedDialogs;
    use crate::shared::http::ApiClient;
    use crate::system::auth::context::Session;

    fn context() -> AdminContext {
        AdminContext::new(
            ApiClient::new(ApiConfig::new("http://localhost:3000/api"), Session::default()),
            Arc::new(ScriptedDialogs::default()),
        )
    }

    #[test]
    fn test_preset_filters_are_kept() {
        let owner = Owner::new();
        owner.set();

        let query = ListQuery {
            country_id: Some(3),
            ..ListQuery::default()
        };
        let vm = CrudListViewModel::<City>::with_query(&context(), query);
        assert_eq!(vm.query.get_untracked().country_id, Some(3));
        assert_eq!(vm.title(), "Cities");
    }

    #[test]
    fn test_page_outside_known_range_is_ignored() {
        let owner = Owner::new();
        owner.set();

        let vm = CrudListViewModel::<City>::new(&context());
        // one known page: asking for page 5 clamps back to page 1
        vm.set_page(5);
        assert_eq!(vm.query.get_untracked().page, None);
        assert!(!vm.loading.get_untracked());
    }
}
