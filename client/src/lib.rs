//! # client
//!
//! Leptos + WASM frontend for the auth flow: landing page, login/signup
//! form, third-party callback and the gated dashboard.
//!
//! Form and session decisions come from the `authflow` crate; this crate
//! renders them and implements the browser side of the provider gateway
//! (`net::gateway`).

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
