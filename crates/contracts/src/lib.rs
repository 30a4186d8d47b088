//! Wire contracts and client-side core of the NextTrip admin dashboard.
//!
//! Everything here is plain Rust without browser bindings, so the ordering
//! core, the menu tree and the envelope decoding are tested natively.

pub mod domain;
pub mod shared;
pub mod system;
