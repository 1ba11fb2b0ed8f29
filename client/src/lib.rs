//! # client
//!
//! Leptos + WASM frontend for the Ayudhra practice portal.
//!
//! This crate contains the session store, the auth state controller, the
//! route guard, the protected-route wrapper, the portal pages and the REST
//! client for the backend auth API. Route views declare which roles may see
//! them; everything else about access control lives in `state` and `util`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
