//! Request ids for a single screen
//!
//! The browser never cancels a request, so responses can land out of
//! order. Every request takes a ticket from a monotonically increasing
//! sequence, and a response is only applied when its ticket is still the
//! one the screen is waiting for.

/// Monotonically increasing request id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    last: u64,
    latest_load: Option<Ticket>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        self.last += 1;
        Ticket(self.last)
    }

    /// Ticket for a list load; supersedes every earlier load
    pub fn begin_load(&mut self) -> Ticket {
        let ticket = self.issue();
        self.latest_load = Some(ticket);
        ticket
    }

    /// Whether a load response may still be applied
    pub fn is_current_load(&self, ticket: Ticket) -> bool {
        self.latest_load == Some(ticket)
    }
}

/// What to do right after a local reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStart {
    /// Nothing in flight: send now with this ticket
    Send(Ticket),
    /// A reorder is in flight; the current order goes out once it finishes
    Queued,
}

/// What to do once a reorder request finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationFinish {
    Confirmed,
    /// Moves were queued meanwhile: send the current order with this ticket
    SendNext(Ticket),
    /// Saved, but a fetch was dropped while the request ran: fetch again
    Reload,
    /// The request failed and nothing newer is queued: re-fetch
    Rollback,
    /// The ticket is not the request in flight
    Unknown,
}

/// What to do with a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchVerdict {
    Apply,
    /// Superseded, or held back until the running reorder settles
    Drop,
    /// Newest load, but it started before the last local change
    Retry,
}

/// Serialises reorder mutations of one list and guards fetches against
/// clobbering newer local state.
///
/// Only one reorder request is in flight at a time. Moves made while it
/// runs are coalesced: the full order is sent once afterwards, so the last
/// user intent wins. A failure is only rolled back when no newer intent is
/// queued. The newest fetch is never lost: one that lands while a reorder
/// runs is asked for again once the reorder is saved.
#[derive(Debug, Clone, Default)]
pub struct MutationGuard {
    sequence: RequestSequence,
    in_flight: Option<Ticket>,
    queued: bool,
    last_change: Option<Ticket>,
    reload_pending: bool,
}

impl MutationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_change(&mut self) -> MutationStart {
        let ticket = self.sequence.issue();
        self.last_change = Some(ticket);
        if self.in_flight.is_some() {
            self.queued = true;
            MutationStart::Queued
        } else {
            self.in_flight = Some(ticket);
            MutationStart::Send(ticket)
        }
    }

    pub fn finish(&mut self, ticket: Ticket, succeeded: bool) -> MutationFinish {
        if self.in_flight != Some(ticket) {
            return MutationFinish::Unknown;
        }
        self.in_flight = None;

        if self.queued {
            self.queued = false;
            let next = self.sequence.issue();
            self.in_flight = Some(next);
            return MutationFinish::SendNext(next);
        }

        if !succeeded {
            self.reload_pending = false;
            MutationFinish::Rollback
        } else if std::mem::take(&mut self.reload_pending) {
            MutationFinish::Reload
        } else {
            MutationFinish::Confirmed
        }
    }

    pub fn begin_fetch(&mut self) -> Ticket {
        self.sequence.begin_load()
    }

    /// A fetch is applied only if it is the newest one, started after the
    /// last local change, and no reorder is in flight.
    pub fn settle_fetch(&mut self, ticket: Ticket) -> FetchVerdict {
        if !self.sequence.is_current_load(ticket) {
            return FetchVerdict::Drop;
        }
        if self.in_flight.is_some() {
            self.reload_pending = true;
            return FetchVerdict::Drop;
        }
        if self.last_change.map_or(false, |change| ticket < change) {
            return FetchVerdict::Retry;
        }
        self.reload_pending = false;
        FetchVerdict::Apply
    }

    /// Whether a failed fetch should discard the shown state
    pub fn accepts_failed_fetch(&self, ticket: Ticket) -> bool {
        self.sequence.is_current_load(ticket) && self.in_flight.is_none()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_load_is_current() {
        let mut seq = RequestSequence::new();
        let first = seq.begin_load();
        let second = seq.begin_load();

        assert!(!seq.is_current_load(first));
        assert!(seq.is_current_load(second));
    }

    #[test]
    fn test_single_change_sends_and_confirms() {
        let mut guard = MutationGuard::new();
        let MutationStart::Send(ticket) = guard.record_change() else {
            panic!("expected send");
        };
        assert!(guard.is_busy());
        assert_eq!(guard.finish(ticket, true), MutationFinish::Confirmed);
        assert!(!guard.is_busy());
    }

    #[test]
    fn test_changes_during_flight_are_coalesced() {
        let mut guard = MutationGuard::new();
        let MutationStart::Send(first) = guard.record_change() else {
            panic!("expected send");
        };
        assert_eq!(guard.record_change(), MutationStart::Queued);
        assert_eq!(guard.record_change(), MutationStart::Queued);

        // failure of the first does not roll back: the queued order wins
        let MutationFinish::SendNext(next) = guard.finish(first, false) else {
            panic!("expected follow-up send");
        };
        assert_eq!(guard.finish(next, false), MutationFinish::Rollback);
    }

    #[test]
    fn test_unknown_ticket_is_ignored() {
        let mut guard = MutationGuard::new();
        let stale = guard.begin_fetch();
        assert_eq!(guard.finish(stale, true), MutationFinish::Unknown);
    }

    #[test]
    fn test_fetch_started_before_change_is_stale() {
        let mut guard = MutationGuard::new();
        let fetch = guard.begin_fetch();
        let MutationStart::Send(ticket) = guard.record_change() else {
            panic!("expected send");
        };
        guard.finish(ticket, true);

        assert_eq!(guard.settle_fetch(fetch), FetchVerdict::Retry);
        let refetch = guard.begin_fetch();
        assert_eq!(guard.settle_fetch(refetch), FetchVerdict::Apply);
    }

    #[test]
    fn test_superseded_fetch_is_dropped() {
        let mut guard = MutationGuard::new();
        let first = guard.begin_fetch();
        let second = guard.begin_fetch();
        assert_eq!(guard.settle_fetch(first), FetchVerdict::Drop);
        assert!(!guard.accepts_failed_fetch(first));
        assert_eq!(guard.settle_fetch(second), FetchVerdict::Apply);
    }

    #[test]
    fn test_fetch_held_during_flight_is_asked_for_after_save() {
        let mut guard = MutationGuard::new();
        let MutationStart::Send(ticket) = guard.record_change() else {
            panic!("expected send");
        };
        let fetch = guard.begin_fetch();
        assert_eq!(guard.settle_fetch(fetch), FetchVerdict::Drop);
        assert!(!guard.accepts_failed_fetch(fetch));

        assert_eq!(guard.finish(ticket, true), MutationFinish::Reload);
        let MutationStart::Send(ticket) = guard.record_change() else {
            panic!("expected send");
        };
        assert_eq!(guard.finish(ticket, true), MutationFinish::Confirmed);
    }

    #[test]
    fn test_rollback_absorbs_held_fetch() {
        let mut guard = MutationGuard::new();
        let MutationStart::Send(ticket) = guard.record_change() else {
            panic!("expected send");
        };
        let fetch = guard.begin_fetch();
        guard.settle_fetch(fetch);
        assert_eq!(guard.finish(ticket, false), MutationFinish::Rollback);

        let refetch = guard.begin_fetch();
        assert_eq!(guard.settle_fetch(refetch), FetchVerdict::Apply);
    }

    #[test]
    fn test_fetch_during_flight_is_stale() {
        let mut guard = MutationGuard::new();
        guard.record_change();
        let fetch = guard.begin_fetch();
        assert_eq!(guard.settle_fetch(fetch), FetchVerdict::Drop);
    }
}
