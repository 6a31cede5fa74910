//! # site
//!
//! WASM interactivity for the hobby tracker's static pages: the light/dark
//! theme toggle, the dashboard menu, the dashboard entry animation flag, the
//! hobby detail fill, and the section-by-section scroll snapping provided by
//! the `panels` crate.
//!
//! Decision logic lives in plain modules that build and test natively.
//! Everything that touches `web-sys` is behind the `browser` feature and is
//! mounted once by [`start`] when the module is instantiated. Every feature is
//! independent: a page missing a feature's elements simply skips it.

pub mod dash_entry;
pub mod hobby;
pub mod logging;
pub mod menu;
pub mod storage;
pub mod theme;

#[cfg(feature = "browser")]
pub mod boot;
#[cfg(feature = "browser")]
pub mod dom;
#[cfg(feature = "browser")]
pub mod scheduler;

#[cfg(feature = "browser")]
use wasm_bindgen::prelude::wasm_bindgen;

/// Module entry point. Installs logging and mounts every page feature.
#[cfg(feature = "browser")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init(logging::level_from_page());
    boot::mount();
}

/// Remove every listener, disconnect the visibility observer and cancel
/// pending timers.
#[cfg(feature = "browser")]
#[wasm_bindgen]
pub fn teardown() {
    boot::unmount();
}
