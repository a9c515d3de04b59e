//! fit-checkout Web Frontend
//!
//! Leptos-based WASM frontend for the membership payment dialog. The
//! hosting page must load `https://js.stripe.com/v3/` before this bundle.

mod api;
mod app;
mod checkout;
mod pages;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
