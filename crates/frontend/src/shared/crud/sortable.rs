use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use contracts::shared::envelope::ApiError;
use contracts::shared::list_query::ListQuery;
use contracts::shared::optimistic::{FetchOutcome, MoveOutcome, OptimisticList, ReorderAck, ReorderCommand};
use contracts::shared::ordering::{Direction, Orderable, ReorderEntry};
use contracts::shared::request_sequence::Ticket;
use contracts::shared::resource::{SortableResource, UploadResource};
use contracts::shared::upload::UploadTracker;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::actions;
use super::form::FormViewModel;
use crate::shared::dialogs::Dialogs;
use crate::shared::resource_api::ResourceApi;
use crate::system::auth::context::AdminContext;

/// Request a screen has to make once a response has been handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FollowUp<E = ReorderEntry> {
    Nothing,
    Load,
    Reorder(ReorderCommand<E>),
}

/// Whole-list screen whose order is edited with up/down buttons or drag/drop
///
/// Moves show immediately. One reorder request per list is in flight at a
/// time; moves made meanwhile are sent together once it settles. A failed
/// request discards the local order and reloads the list.
pub struct SortableListViewModel<R: SortableResource>
where
    R::Item: Orderable,
{
    pub items: RwSignal<Vec<R::Item>>,
    pub loading: RwSignal<bool>,
    pub saving_order: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub dragging_id: RwSignal<Option<i64>>,
    pub uploads: RwSignal<UploadTracker>,
    pub form: FormViewModel<R>,
    list: Rc<RefCell<OptimisticList<R::Item>>>,
    api: ResourceApi<R>,
    dialogs: Arc<dyn Dialogs>,
}

impl<R: SortableResource> Clone for SortableListViewModel<R>
where
    R::Item: Orderable,
{
    fn clone(&self) -> Self {
        Self {
            items: self.items,
            loading: self.loading,
            saving_order: self.saving_order,
            error: self.error,
            dragging_id: self.dragging_id,
            uploads: self.uploads,
            form: self.form.clone(),
            list: self.list.clone(),
            api: self.api.clone(),
            dialogs: self.dialogs.clone(),
        }
    }
}

impl<R: SortableResource> SortableListViewModel<R>
where
    R::Item: Orderable,
{
    pub fn new(context: &AdminContext) -> Self {
        let api = ResourceApi::<R>::new(context.client.clone());
        Self {
            items: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            saving_order: RwSignal::new(false),
            error: RwSignal::new(None),
            dragging_id: RwSignal::new(None),
            uploads: RwSignal::new(UploadTracker::new()),
            form: FormViewModel::new(api.clone(), context.dialogs.clone()),
            list: Rc::new(RefCell::new(OptimisticList::new())),
            api,
            dialogs: context.dialogs.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        R::list_name()
    }

    fn sync(&self) {
        let list = self.list.borrow();
        self.items.set(list.items().to_vec());
        self.saving_order.set(list.is_busy());
    }

    fn follow(&self, next: FollowUp) {
        match next {
            FollowUp::Nothing => {}
            FollowUp::Load => self.load(),
            FollowUp::Reorder(command) => self.send_reorder(command),
        }
    }

    /// Fetch the whole list, shown by `(sort_order, id)`
    pub fn load(&self) {
        let ticket = self.begin_load();
        let this = self.clone();
        spawn_local(async move {
            let result = this.api.list(&ListQuery::default()).await;
            let next = this.finish_load(ticket, result.map(|page| page.items));
            this.follow(next);
        });
    }

    fn begin_load(&self) -> Ticket {
        self.loading.set(true);
        self.list.borrow_mut().begin_fetch()
    }

    fn finish_load(&self, ticket: Ticket, result: Result<Vec<R::Item>, ApiError>) -> FollowUp {
        self.loading.set(false);
        match result {
            Ok(items) => {
                let outcome = self.list.borrow_mut().finish_fetch(ticket, items);
                match outcome {
                    FetchOutcome::Applied => {
                        self.error.set(None);
                        self.sync();
                        FollowUp::Nothing
                    }
                    FetchOutcome::Stale => {
                        log::debug!("{}: dropping stale list {:?}", R::full_name(), ticket);
                        FollowUp::Nothing
                    }
                    FetchOutcome::Refetch => {
                        log::debug!("{}: list {:?} predates a saved move, loading again", R::full_name(), ticket);
                        FollowUp::Load
                    }
                }
            }
            Err(err) => {
                log::error!("{}: load failed: {}", R::full_name(), err);
                self.error
                    .set(Some(format!("Failed to load {}: {}", R::list_name().to_lowercase(), err)));
                let cleared = self.list.borrow_mut().fail_fetch(ticket);
                if cleared {
                    self.sync();
                }
                FollowUp::Nothing
            }
        }
    }

    pub fn move_up(&self, id: i64) {
        let outcome = self.list.borrow_mut().apply_move_by_id(id, Direction::Up);
        self.follow(self.after_move(outcome));
    }

    pub fn move_down(&self, id: i64) {
        let outcome = self.list.borrow_mut().apply_move_by_id(id, Direction::Down);
        self.follow(self.after_move(outcome));
    }

    pub fn drag_start(&self, id: i64) {
        self.dragging_id.set(Some(id));
    }

    pub fn drag_end(&self) {
        self.dragging_id.set(None);
    }

    /// Drop the dragged row onto the row of `target_id`
    pub fn drop_on(&self, target_id: i64) {
        let Some(dragged_id) = self.dragging_id.get_untracked() else {
            return;
        };
        self.dragging_id.set(None);
        let outcome = self.list.borrow_mut().apply_drag(dragged_id, target_id);
        self.follow(self.after_move(outcome));
    }

    fn after_move(&self, outcome: MoveOutcome) -> FollowUp {
        match outcome {
            MoveOutcome::Unchanged => FollowUp::Nothing,
            MoveOutcome::Queued => {
                log::debug!("{}: reorder queued behind running request", R::full_name());
                self.sync();
                FollowUp::Nothing
            }
            MoveOutcome::Send(command) => {
                self.sync();
                FollowUp::Reorder(command)
            }
        }
    }

    fn send_reorder(&self, command: ReorderCommand) {
        let this = self.clone();
        spawn_local(async move {
            let result = this.api.reorder(&command.payload).await;
            let next = this.finish_reorder(command.ticket, result);
            this.follow(next);
        });
    }

    fn finish_reorder(&self, ticket: Ticket, result: Result<(), ApiError>) -> FollowUp {
        if let Err(err) = &result {
            log::error!("{}: reorder failed: {}", R::full_name(), err);
        }
        let ack = self.list.borrow_mut().finish_reorder(ticket, result.is_ok());
        match ack {
            ReorderAck::Confirmed => {
                self.sync();
                FollowUp::Nothing
            }
            ReorderAck::Reload => {
                self.sync();
                FollowUp::Load
            }
            ReorderAck::SendNext(next) => {
                self.sync();
                FollowUp::Reorder(next)
            }
            ReorderAck::Rollback => {
                log::warn!("{}: order not saved, reloading from server", R::full_name());
                self.sync();
                if let Err(err) = result {
                    if !err.is_unauthorized() {
                        self.dialogs.alert(&format!("Failed to save order: {}", err));
                    }
                }
                FollowUp::Load
            }
            ReorderAck::Ignored => FollowUp::Nothing,
        }
    }

    pub fn start_create(&self) {
        self.form.start_create();
    }

    pub fn start_edit(&self, item: &R::Item) {
        self.form.start_edit(item);
    }

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
            item.id(),
            &prompt,
            move || this.load(),
        );
    }
}

impl<R: SortableResource + UploadResource> SortableListViewModel<R>
where
    R::Item: Orderable,
{
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
    use contracts::domain::a009_customer_group::aggregate::CustomerGroup;
    use contracts::shared::resource::Resource;

    use super::*;
    use crate::shared::api_utils::ApiConfig;
    use crate::shared::dialogs::tests::ScriptedDialogs;
    use crate::shared::http::ApiClient;
    use crate::system::auth::context::Session;

    fn view_model(dialogs: Arc<ScriptedDialogs>) -> SortableListViewModel<CustomerGroup> {
        let context = AdminContext::new(
            ApiClient::new(ApiConfig::new("http://localhost:3000/api"), Session::default()),
            dialogs,
        );
        SortableListViewModel::new(&context)
    }

    fn group(id: i64, name: &str, sort_order: i32) -> CustomerGroup {
        CustomerGroup {
            id,
            name: name.to_string(),
            description: None,
            icon: None,
            sort_order,
        }
    }

    fn server_order() -> Vec<CustomerGroup> {
        vec![group(1, "Corporate", 1), group(2, "Families", 2), group(3, "Students", 3)]
    }

    fn shown(vm: &SortableListViewModel<CustomerGroup>) -> Vec<i64> {
        vm.items.get_untracked().iter().map(|g| g.id).collect()
    }

    fn loaded(vm: &SortableListViewModel<CustomerGroup>) {
        let ticket = vm.begin_load();
        assert_eq!(vm.finish_load(ticket, Ok(server_order())), FollowUp::Nothing);
    }

    fn move_up(vm: &SortableListViewModel<CustomerGroup>, id: i64) -> FollowUp {
        let outcome = vm.list.borrow_mut().apply_move_by_id(id, Direction::Up);
        vm.after_move(outcome)
    }

    #[test]
    fn test_drop_without_drag_does_nothing() {
        let owner = Owner::new();
        owner.set();

        let vm = view_model(Arc::new(ScriptedDialogs::default()));

        vm.drop_on(3);
        vm.move_up(3);

        assert!(vm.items.get_untracked().is_empty());
        assert!(!vm.saving_order.get_untracked());
        assert_eq!(vm.title(), CustomerGroup::list_name());
    }

    #[test]
    fn test_failed_save_shows_move_then_restores_server_order() {
        let owner = Owner::new();
        owner.set();

        let dialogs = Arc::new(ScriptedDialogs::default());
        let vm = view_model(dialogs.clone());
        loaded(&vm);

        let FollowUp::Reorder(command) = move_up(&vm, 3) else {
            panic!("expected a reorder request");
        };
        assert_eq!(shown(&vm), vec![1, 3, 2]);
        assert!(vm.saving_order.get_untracked());

        let failure = Err(ApiError::Http { status: 500, message: None });
        assert_eq!(vm.finish_reorder(command.ticket, failure), FollowUp::Load);
        assert_eq!(dialogs.alerts().len(), 1);
        assert!(!vm.saving_order.get_untracked());

        let ticket = vm.begin_load();
        assert_eq!(vm.finish_load(ticket, Ok(server_order())), FollowUp::Nothing);
        assert_eq!(shown(&vm), vec![1, 2, 3]);
    }

    #[test]
    fn test_failed_reload_after_rollback_empties_list() {
        let owner = Owner::new();
        owner.set();

        let vm = view_model(Arc::new(ScriptedDialogs::default()));
        loaded(&vm);
        let FollowUp::Reorder(command) = move_up(&vm, 2) else {
            panic!("expected a reorder request");
        };
        let failure = Err(ApiError::Network("offline".into()));
        assert_eq!(vm.finish_reorder(command.ticket, failure), FollowUp::Load);

        let ticket = vm.begin_load();
        vm.finish_load(ticket, Err(ApiError::Network("offline".into())));

        assert!(shown(&vm).is_empty());
        assert!(vm.error.get_untracked().is_some());
        assert!(!vm.loading.get_untracked());
    }

    #[test]
    fn test_moves_during_save_go_out_as_one_request() {
        let owner = Owner::new();
        owner.set();

        let vm = view_model(Arc::new(ScriptedDialogs::default()));
        loaded(&vm);

        let FollowUp::Reorder(first) = move_up(&vm, 3) else {
            panic!("expected a reorder request");
        };
        assert_eq!(move_up(&vm, 3), FollowUp::Nothing);
        assert_eq!(shown(&vm), vec![3, 1, 2]);

        let FollowUp::Reorder(next) = vm.finish_reorder(first.ticket, Ok(())) else {
            panic!("expected the queued order to be sent");
        };
        let sent: Vec<i64> = next.payload.iter().map(|entry| entry.id).collect();
        assert_eq!(sent, vec![3, 1, 2]);

        assert_eq!(vm.finish_reorder(next.ticket, Ok(())), FollowUp::Nothing);
        assert!(!vm.saving_order.get_untracked());
        assert_eq!(shown(&vm), vec![3, 1, 2]);
    }

    #[test]
    fn test_reload_answered_after_saved_move_is_repeated() {
        let owner = Owner::new();
        owner.set();

        let vm = view_model(Arc::new(ScriptedDialogs::default()));
        loaded(&vm);

        // reload after a create; the user moves a row before it answers
        let reload = vm.begin_load();
        let FollowUp::Reorder(command) = move_up(&vm, 2) else {
            panic!("expected a reorder request");
        };
        assert_eq!(vm.finish_reorder(command.ticket, Ok(())), FollowUp::Nothing);

        let mut with_new = server_order();
        with_new.push(group(4, "Seniors", 4));
        assert_eq!(vm.finish_load(reload, Ok(with_new.clone())), FollowUp::Load);
        assert_eq!(shown(&vm), vec![2, 1, 3]);

        let again = vm.begin_load();
        vm.finish_load(again, Ok(with_new));
        assert_eq!(shown(&vm), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_reload_answered_during_save_runs_after_it() {
        let owner = Owner::new();
        owner.set();

        let vm = view_model(Arc::new(ScriptedDialogs::default()));
        loaded(&vm);

        let reload = vm.begin_load();
        let FollowUp::Reorder(command) = move_up(&vm, 2) else {
            panic!("expected a reorder request");
        };
        assert_eq!(vm.finish_load(reload, Ok(server_order())), FollowUp::Nothing);
        assert_eq!(shown(&vm), vec![2, 1, 3]);

        assert_eq!(vm.finish_reorder(command.ticket, Ok(())), FollowUp::Load);
    }
}
