//! Client core of the NextTrip admin dashboard.
//!
//! Holds the REST client and the reactive view models behind every admin
//! screen. Markup, routing and login live in the shell that mounts them.

pub mod domain;
pub mod screens;
pub mod shared;
pub mod system;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    log::info!("nexttrip admin core loaded");
}
