//! Optimistic reordering of a flat list
//!
//! The list is updated locally first, then the full order is sent to
//! `POST /{resource}/reorder`. A failed request is undone by re-fetching
//! the list from the server. This type does no I/O: it tells the caller
//! which request to send and whether a response may be applied.

use super::ordering::{self, Direction, Orderable, ReorderEntry};
use super::request_sequence::{FetchVerdict, MutationFinish, MutationGuard, MutationStart, Ticket};

/// Reorder request to send now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderCommand<E = ReorderEntry> {
    pub ticket: Ticket,
    pub payload: Vec<E>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome<E = ReorderEntry> {
    /// Target out of bounds; nothing changed, nothing to send
    Unchanged,
    Send(ReorderCommand<E>),
    /// Applied locally; will be sent when the running request finishes
    Queued,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderAck<E = ReorderEntry> {
    Confirmed,
    /// Saved; a load came back while it ran, so load the list again
    Reload,
    SendNext(ReorderCommand<E>),
    /// Discard local order: call `begin_fetch` and load the list again
    Rollback,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Stale,
    /// Started before a local change that has since been saved: load again
    Refetch,
}

#[derive(Debug, Clone)]
pub struct OptimisticList<T> {
    items: Vec<T>,
    guard: MutationGuard,
}

impl<T> Default for OptimisticList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            guard: MutationGuard::new(),
        }
    }
}

impl<T: Orderable + Clone> OptimisticList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Up/down buttons
    pub fn apply_move(&mut self, index: usize, direction: Direction) -> MoveOutcome {
        match ordering::move_item(&self.items, index, direction) {
            Some(moved) => self.commit(moved),
            None => MoveOutcome::Unchanged,
        }
    }

    pub fn apply_move_by_id(&mut self, id: i64, direction: Direction) -> MoveOutcome {
        match ordering::index_of(&self.items, id) {
            Some(index) => self.apply_move(index, direction),
            None => MoveOutcome::Unchanged,
        }
    }

    /// Drag `dragged_id` onto the row of `target_id`
    pub fn apply_drag(&mut self, dragged_id: i64, target_id: i64) -> MoveOutcome {
        let from = ordering::index_of(&self.items, dragged_id);
        let to = ordering::index_of(&self.items, target_id);
        let moved = match (from, to) {
            (Some(from), Some(to)) => ordering::move_to(&self.items, from, to),
            _ => None,
        };
        match moved {
            Some(moved) => self.commit(moved),
            None => MoveOutcome::Unchanged,
        }
    }

    fn commit(&mut self, mut moved: Vec<T>) -> MoveOutcome {
        ordering::renumber(&mut moved);
        self.items = moved;
        match self.guard.record_change() {
            MutationStart::Send(ticket) => MoveOutcome::Send(self.command(ticket)),
            MutationStart::Queued => MoveOutcome::Queued,
        }
    }

    fn command(&self, ticket: Ticket) -> ReorderCommand {
        ReorderCommand {
            ticket,
            payload: ordering::reorder_payload(&self.items),
        }
    }

    pub fn finish_reorder(&mut self, ticket: Ticket, succeeded: bool) -> ReorderAck {
        match self.guard.finish(ticket, succeeded) {
            MutationFinish::Confirmed => ReorderAck::Confirmed,
            MutationFinish::Reload => ReorderAck::Reload,
            MutationFinish::SendNext(next) => ReorderAck::SendNext(self.command(next)),
            MutationFinish::Rollback => ReorderAck::Rollback,
            MutationFinish::Unknown => ReorderAck::Ignored,
        }
    }

    pub fn begin_fetch(&mut self) -> Ticket {
        self.guard.begin_fetch()
    }

    /// Replace the list with server data unless the response is stale
    pub fn finish_fetch(&mut self, ticket: Ticket, mut items: Vec<T>) -> FetchOutcome {
        match self.guard.settle_fetch(ticket) {
            FetchVerdict::Drop => FetchOutcome::Stale,
            FetchVerdict::Retry => FetchOutcome::Refetch,
            FetchVerdict::Apply => {
                ordering::sort_for_display(&mut items);
                self.items = items;
                FetchOutcome::Applied
            }
        }
    }

    /// Empty the list after the newest load failed, so no unsaved order
    /// stays on screen. Returns false when the failure no longer matters.
    pub fn fail_fetch(&mut self, ticket: Ticket) -> bool {
        if !self.guard.accepts_failed_fetch(ticket) {
            return false;
        }
        self.items.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ordering::tests::{abc, Row};

    fn loaded(rows: Vec<Row>) -> OptimisticList<Row> {
        let mut list = OptimisticList::new();
        let ticket = list.begin_fetch();
        assert_eq!(list.finish_fetch(ticket, rows), FetchOutcome::Applied);
        list
    }

    fn ids(list: &OptimisticList<Row>) -> Vec<i64> {
        list.items().iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_move_up_second_item() {
        let mut list = loaded(abc());
        let MoveOutcome::Send(cmd) = list.apply_move(1, Direction::Up) else {
            panic!("expected a reorder request");
        };

        assert_eq!(ids(&list), vec![2, 1, 3]);
        assert_eq!(
            cmd.payload,
            vec![
                ReorderEntry { id: 2, sort_order: 1 },
                ReorderEntry { id: 1, sort_order: 2 },
                ReorderEntry { id: 3, sort_order: 3 },
            ]
        );
        let orders: Vec<i32> = list.items().iter().map(|r| r.sort_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_move_first_up_sends_nothing() {
        let mut list = loaded(abc());
        assert_eq!(list.apply_move(0, Direction::Up), MoveOutcome::Unchanged);
        assert_eq!(ids(&list), vec![1, 2, 3]);
        assert!(!list.is_busy());
    }

    #[test]
    fn test_failure_rolls_back_to_server_order() {
        let mut list = loaded(abc());
        let MoveOutcome::Send(cmd) = list.apply_move(2, Direction::Up) else {
            panic!("expected a reorder request");
        };
        assert_eq!(ids(&list), vec![1, 3, 2]);

        assert_eq!(list.finish_reorder(cmd.ticket, false), ReorderAck::Rollback);
        let ticket = list.begin_fetch();
        assert_eq!(list.finish_fetch(ticket, abc()), FetchOutcome::Applied);
        assert_eq!(ids(&list), vec![1, 2, 3]);
    }

    #[test]
    fn test_rapid_moves_coalesce_into_latest_order() {
        let mut list = loaded(abc());
        let MoveOutcome::Send(first) = list.apply_move(0, Direction::Down) else {
            panic!("expected a reorder request");
        };
        assert_eq!(list.apply_move(1, Direction::Down), MoveOutcome::Queued);
        assert_eq!(ids(&list), vec![2, 3, 1]);

        let ReorderAck::SendNext(next) = list.finish_reorder(first.ticket, true) else {
            panic!("expected the queued order to be sent");
        };
        let sent: Vec<i64> = next.payload.iter().map(|e| e.id).collect();
        assert_eq!(sent, vec![2, 3, 1]);
        assert_eq!(list.finish_reorder(next.ticket, true), ReorderAck::Confirmed);
    }

    #[test]
    fn test_late_fetch_does_not_clobber_move() {
        let mut list = loaded(abc());
        let stale = list.begin_fetch();
        let MoveOutcome::Send(cmd) = list.apply_drag(3, 1) else {
            panic!("expected a reorder request");
        };
        list.finish_reorder(cmd.ticket, true);

        assert_eq!(list.finish_fetch(stale, abc()), FetchOutcome::Refetch);
        assert_eq!(ids(&list), vec![3, 1, 2]);
    }

    #[test]
    fn test_reload_racing_a_saved_move_is_fetched_again() {
        let mut list = loaded(abc());
        // reload after a create, answered only after the move is saved
        let reload = list.begin_fetch();
        let MoveOutcome::Send(cmd) = list.apply_move(1, Direction::Up) else {
            panic!("expected a reorder request");
        };
        assert_eq!(list.finish_reorder(cmd.ticket, true), ReorderAck::Confirmed);

        let mut with_d = abc();
        with_d.push(Row { id: 4, name: "D", sort_order: 4 });
        assert_eq!(list.finish_fetch(reload, with_d.clone()), FetchOutcome::Refetch);

        let again = list.begin_fetch();
        assert_eq!(list.finish_fetch(again, with_d), FetchOutcome::Applied);
        assert_eq!(ids(&list), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_reload_landing_during_move_is_asked_for_after_save() {
        let mut list = loaded(abc());
        let reload = list.begin_fetch();
        let MoveOutcome::Send(cmd) = list.apply_move(1, Direction::Up) else {
            panic!("expected a reorder request");
        };
        assert_eq!(list.finish_fetch(reload, abc()), FetchOutcome::Stale);
        assert_eq!(list.finish_reorder(cmd.ticket, true), ReorderAck::Reload);
    }

    #[test]
    fn test_failed_reload_after_rollback_clears_unsaved_order() {
        let mut list = loaded(abc());
        let MoveOutcome::Send(cmd) = list.apply_move(2, Direction::Up) else {
            panic!("expected a reorder request");
        };
        assert_eq!(list.finish_reorder(cmd.ticket, false), ReorderAck::Rollback);

        let reload = list.begin_fetch();
        assert!(list.fail_fetch(reload));
        assert!(list.items().is_empty());
    }

    #[test]
    fn test_superseded_failure_keeps_items() {
        let mut list = loaded(abc());
        let first = list.begin_fetch();
        let _second = list.begin_fetch();
        assert!(!list.fail_fetch(first));
        assert_eq!(ids(&list), vec![1, 2, 3]);
    }

    #[test]
    fn test_fetched_items_are_sorted() {
        let list = loaded(vec![
            Row { id: 5, name: "E", sort_order: 2 },
            Row { id: 6, name: "F", sort_order: 0 },
        ]);
        assert_eq!(ids(&list), vec![6, 5]);
    }

    #[test]
    fn test_drag_unknown_id_is_noop() {
        let mut list = loaded(abc());
        assert_eq!(list.apply_drag(42, 1), MoveOutcome::Unchanged);
        assert_eq!(list.apply_move_by_id(42, Direction::Up), MoveOutcome::Unchanged);
    }
}
