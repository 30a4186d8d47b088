use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use contracts::domain::a011_menu::aggregate::{MenuLocation, MenuNode, MenuReorderEntry};
use contracts::domain::a011_menu::tree::{self, OptimisticMenu};
use contracts::shared::envelope::ApiError;
use contracts::shared::list_query::ListQuery;
use contracts::shared::optimistic::{FetchOutcome, MoveOutcome, ReorderAck, ReorderCommand};
use contracts::shared::request_sequence::Ticket;
use contracts::shared::resource::Resource;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::crud::actions;
use crate::shared::crud::sortable::FollowUp;
use crate::shared::crud::FormViewModel;
use crate::shared::dialogs::Dialogs;
use crate::shared::resource_api::ResourceApi;
use crate::system::auth::context::AdminContext;

/// One row of the flattened tree as the screen draws it
#[derive(Debug, Clone, PartialEq)]
pub struct MenuRow {
    pub node: MenuNode,
    pub depth: u8,
}

/// Drag-and-drop editor of the site menus, one location at a time
///
/// Every location keeps its own optimistic state, so a reorder still running
/// for one location never blocks loading another.
#[derive(Clone)]
pub struct MenuTreeViewModel {
    pub location: RwSignal<MenuLocation>,
    pub tree: RwSignal<Vec<MenuNode>>,
    pub loading: RwSignal<bool>,
    pub saving_order: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub dragging_id: RwSignal<Option<i64>>,
    pub form: FormViewModel<MenuNode>,
    menus: Rc<RefCell<HashMap<MenuLocation, OptimisticMenu>>>,
    api: ResourceApi<MenuNode>,
    dialogs: Arc<dyn Dialogs>,
}

impl MenuTreeViewModel {
    pub fn new(context: &AdminContext) -> Self {
        let api = ResourceApi::<MenuNode>::new(context.client.clone());
        Self {
            location: RwSignal::new(MenuLocation::default()),
            tree: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            saving_order: RwSignal::new(false),
            error: RwSignal::new(None),
            dragging_id: RwSignal::new(None),
            form: FormViewModel::new(api.clone(), context.dialogs.clone()),
            menus: Rc::new(RefCell::new(HashMap::new())),
            api,
            dialogs: context.dialogs.clone(),
        }
    }

    /// Pre-order rows: each root followed by its children
    pub fn rows(&self) -> Vec<MenuRow> {
        self.tree.with(|nodes| {
            tree::flatten(nodes)
                .into_iter()
                .map(|node| MenuRow {
                    depth: if node.is_root() { 0 } else { 1 },
                    node,
                })
                .collect()
        })
    }

    /// Roots that the edited item may be placed under
    pub fn parent_options(&self) -> Vec<(i64, String)> {
        let editing_id = self.form.editing_id.get();
        self.tree.with(|roots| {
            roots
                .iter()
                .filter(|root| Some(root.id) != editing_id)
                .map(|root| (root.id, root.title.clone()))
                .collect()
        })
    }

    fn sync(&self, location: MenuLocation) {
        if location != self.location.get_untracked() {
            return;
        }
        let menus = self.menus.borrow();
        match menus.get(&location) {
            Some(menu) => {
                self.tree.set(menu.tree().to_vec());
                self.saving_order.set(menu.is_busy());
            }
            None => {
                self.tree.set(Vec::new());
                self.saving_order.set(false);
            }
        }
    }

    pub fn set_location(&self, location: MenuLocation) {
        if location == self.location.get_untracked() {
            return;
        }
        self.location.set(location);
        self.dragging_id.set(None);
        self.form.start_create();
        self.sync(location);
        self.load();
    }

    pub fn load(&self) {
        self.load_location(self.location.get_untracked());
    }

    fn follow(&self, location: MenuLocation, next: FollowUp<MenuReorderEntry>) {
        match next {
            FollowUp::Nothing => {}
            FollowUp::Load => self.load_location(location),
            FollowUp::Reorder(command) => self.send_reorder(location, command),
        }
    }

    fn load_location(&self, location: MenuLocation) {
        let ticket = self.begin_load(location);
        let query = ListQuery {
            location: Some(location.as_str().to_string()),
            ..ListQuery::default()
        };

        let this = self.clone();
        spawn_local(async move {
            let result = this.api.list(&query).await;
            let next = this.finish_load(location, ticket, result.map(|page| page.items));
            this.follow(location, next);
        });
    }

    fn begin_load(&self, location: MenuLocation) -> Ticket {
        self.loading.set(true);
        self.menus.borrow_mut().entry(location).or_default().begin_fetch()
    }

    fn finish_load(
        &self,
        location: MenuLocation,
        ticket: Ticket,
        result: Result<Vec<MenuNode>, ApiError>,
    ) -> FollowUp<MenuReorderEntry> {
        if location == self.location.get_untracked() {
            self.loading.set(false);
        }
        match result {
            Ok(nodes) => {
                let outcome = self
                    .menus
                    .borrow_mut()
                    .entry(location)
                    .or_default()
                    .finish_fetch(ticket, nodes);
                match outcome {
                    FetchOutcome::Applied => {
                        self.error.set(None);
                        self.sync(location);
                        FollowUp::Nothing
                    }
                    FetchOutcome::Stale => {
                        log::debug!("menus/{}: dropping stale tree {:?}", location.as_str(), ticket);
                        FollowUp::Nothing
                    }
                    FetchOutcome::Refetch => {
                        log::debug!("menus/{}: tree {:?} predates a saved drop, loading again", location.as_str(), ticket);
                        FollowUp::Load
                    }
                }
            }
            Err(err) => {
                log::error!("menus/{}: load failed: {}", location.as_str(), err);
                self.error.set(Some(format!("Failed to load {} menu: {}", location.label(), err)));
                let cleared = self.menus.borrow_mut().entry(location).or_default().fail_fetch(ticket);
                if cleared {
                    self.sync(location);
                }
                FollowUp::Nothing
            }
        }
    }

    pub fn drag_start(&self, id: i64) {
        self.dragging_id.set(Some(id));
    }

    pub fn drag_end(&self) {
        self.dragging_id.set(None);
    }

    /// Drop the dragged node onto the row of `target_id`
    pub fn drop_on(&self, target_id: i64) {
        let location = self.location.get_untracked();
        let next = self.plan_drop_on(target_id);
        self.follow(location, next);
    }

    fn plan_drop_on(&self, target_id: i64) -> FollowUp<MenuReorderEntry> {
        let Some(dragged_id) = self.dragging_id.get_untracked() else {
            return FollowUp::Nothing;
        };
        self.dragging_id.set(None);

        let location = self.location.get_untracked();
        let planned = self
            .menus
            .borrow_mut()
            .entry(location)
            .or_default()
            .apply_drop(dragged_id, target_id);
        match planned {
            Err(err) => {
                log::warn!("menus/{}: drop of {} on {} refused: {}", location.as_str(), dragged_id, target_id, err);
                self.dialogs.alert(&err.to_string());
                FollowUp::Nothing
            }
            Ok(MoveOutcome::Unchanged) => FollowUp::Nothing,
            Ok(MoveOutcome::Queued) => {
                self.sync(location);
                FollowUp::Nothing
            }
            Ok(MoveOutcome::Send(command)) => {
                self.sync(location);
                FollowUp::Reorder(command)
            }
        }
    }

    fn send_reorder(&self, location: MenuLocation, command: ReorderCommand<MenuReorderEntry>) {
        let this = self.clone();
        spawn_local(async move {
            let result = this.api.reorder(&command.payload).await;
            let next = this.finish_reorder(location, command.ticket, result);
            this.follow(location, next);
        });
    }

    fn finish_reorder(
        &self,
        location: MenuLocation,
        ticket: Ticket,
        result: Result<(), ApiError>,
    ) -> FollowUp<MenuReorderEntry> {
        if let Err(err) = &result {
            log::error!("menus/{}: reorder failed: {}", location.as_str(), err);
        }
        let ack = self
            .menus
            .borrow_mut()
            .entry(location)
            .or_default()
            .finish_reorder(ticket, result.is_ok());
        self.sync(location);
        match ack {
            ReorderAck::Confirmed | ReorderAck::Ignored => FollowUp::Nothing,
            ReorderAck::Reload => FollowUp::Load,
            ReorderAck::SendNext(next) => FollowUp::Reorder(next),
            ReorderAck::Rollback => {
                log::warn!("menus/{}: order not saved, reloading", location.as_str());
                if let Err(err) = result {
                    if !err.is_unauthorized() {
                        self.dialogs.alert(&format!("Failed to save menu order: {}", err));
                    }
                }
                FollowUp::Load
            }
        }
    }

    /// New root item in the current location
    pub fn start_create(&self) {
        self.start_create_under(None);
    }

    pub fn start_create_under(&self, parent_id: Option<i64>) {
        let location = self.location.get_untracked();
        self.form.start_create();
        self.form.update_form(|form| {
            form.location = location;
            form.parent_id = parent_id;
        });
    }

    pub fn start_edit(&self, node: &MenuNode) {
        self.form.start_edit(node);
    }

    /// Parent must be a root of this location and never the item itself
    pub fn submit(&self) {
        let roots = self.tree.get_untracked();
        let this = self.clone();
        self.form.submit_checked(
            move |form, editing_id| tree::validate_parent(form, editing_id, &roots),
            Rc::new(move || this.load()),
        );
    }

    /// Deleting a root also deletes its sub-items
    pub fn delete(&self, node: &MenuNode) {
        let mut prompt = actions::delete_prompt::<MenuNode>(node);
        if node.has_children() {
            prompt = format!(
                "{} Its {} sub-item(s) will be deleted too.",
                prompt,
                node.all_children.len()
            );
        }
        let this = self.clone();
        actions::confirm_and_delete(self.api.clone(), self.dialogs.clone(), node.id, &prompt, move || this.load());
    }

    pub fn toggle_active(&self, node: &MenuNode) {
        let mut form = MenuNode::to_form(node);
        form.is_active = !form.is_active;
        let id = node.id;

        let this = self.clone();
        spawn_local(async move {
            match this.api.update(id, &form).await {
                Ok(_) => {
                    log::info!("menus: item {} active={}", id, form.is_active);
                    this.load();
                }
                Err(err) => {
                    log::error!("menus: toggle of {} failed: {}", id, err);
                    if !err.is_unauthorized() {
                        this.dialogs.alert(&format!("Failed to update menu item: {}", err));
                    }
                }
            }
        });
    }
}
