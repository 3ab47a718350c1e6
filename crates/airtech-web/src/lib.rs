//! Browser entry point for the AirTech cart.
//!
//! Compiled to WebAssembly, this crate wires [`CartView`](airtech_view::CartView)
//! to the real page: `localStorage`, the DOM through `web-sys` and
//! `window.setTimeout`. On load it reads the optional inline configuration
//! (`<script id="cart-config" type="application/json">`), initializes the
//! cart and exports the global functions page markup calls, such as
//! `addToCart`, `removeItem`, `increaseQuantity`, `decreaseQuantity` and
//! `clearCart`.
//!
//! Configuration parsing, product input validation and view assembly are
//! target independent and tested natively.

pub mod bootstrap;
pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(target_arch = "wasm32")]
mod exports;

pub use bootstrap::{build_view, config_from_inline, CONFIG_ELEMENT_ID};
pub use input::ProductInput;

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserDocument, BrowserTimers};
