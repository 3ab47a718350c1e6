//! Global functions for page markup and scripts.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use airtech_commerce::cart::Cart;
use airtech_commerce::store::wire;
use airtech_observability::StructuredLogger;
use airtech_storage::LocalStorage;
use airtech_view::{CartView, NotificationKind, ViewPhase};

use crate::bootstrap::{build_view, config_from_inline, CONFIG_ELEMENT_ID};
use crate::browser::{BrowserDocument, BrowserTimers};
use crate::input::ProductInput;

type PageView = CartView<LocalStorage, BrowserDocument, BrowserTimers>;

thread_local! {
    static VIEW: RefCell<Option<Rc<PageView>>> = const { RefCell::new(None) };
}

fn page_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

fn create_view() -> Option<Rc<PageView>> {
    let document = BrowserDocument::current()?;
    let page = page_path();
    let logger = StructuredLogger::new()
        .with_component("cart-web")
        .with_page(page.clone());

    let inline = document.text_of(CONFIG_ELEMENT_ID);
    let config = config_from_inline(inline.as_deref(), &logger);
    Some(Rc::new(build_view(
        &config,
        LocalStorage::new(),
        document,
        BrowserTimers,
        &page,
    )))
}

/// The page's view, created on first use and initialized before it is
/// handed out.
fn with_view<R>(f: impl FnOnce(&Rc<PageView>) -> R) -> Option<R> {
    let view = VIEW.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            *slot = create_view();
        }
        slot.clone()
    })?;

    if view.phase() == ViewPhase::Init {
        // Errors are logged by the view.
        let _ = view.init();
    }
    Some(f(&view))
}

fn cart_to_js(cart: &Cart) -> JsValue {
    serde_json::to_string(&wire::encode(cart))
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or_else(|| js_sys::Array::new().into())
}

fn current_cart() -> JsValue {
    with_view(|view| cart_to_js(&view.cart())).unwrap_or_else(|| js_sys::Array::new().into())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(document) = BrowserDocument::current() else {
        return;
    };
    if !document.is_loading() {
        with_view(|_| ());
        return;
    }

    let on_ready = Closure::once_into_js(|| {
        with_view(|_| ());
    });
    let _ = document
        .raw()
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
}

/// Load the cart and paint the page; repaints if already initialized.
#[wasm_bindgen(js_name = initCart)]
pub fn init_cart() {
    with_view(|view| {
        if view.phase() != ViewPhase::Loaded {
            let _ = view.refresh();
        }
    });
}

/// Add one unit of `{id, name, price, image}`; returns the cart.
#[wasm_bindgen(js_name = addToCart)]
pub fn add_to_cart(product: JsValue) -> JsValue {
    with_view(|view| {
        let json = js_sys::JSON::stringify(&product)
            .ok()
            .and_then(|s| s.as_string())
            .unwrap_or_default();
        let item = ProductInput::from_json(&json)
            .and_then(|input| input.into_item(view.store().currency()));
        match item {
            Ok(item) => {
                let _ = view.add_to_cart(item);
            }
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
                view.notify(&view.config().labels.add_failed, NotificationKind::Error);
            }
        }
        cart_to_js(&view.cart())
    })
    .unwrap_or_else(|| js_sys::Array::new().into())
}

#[wasm_bindgen(js_name = removeItem)]
pub fn remove_item(id: String) {
    with_view(|view| view.remove_item(id));
}

/// Remove an item; returns the cart.
#[wasm_bindgen(js_name = removeFromCart)]
pub fn remove_from_cart(id: String) -> JsValue {
    remove_item(id);
    current_cart()
}

#[wasm_bindgen(js_name = increaseQuantity)]
pub fn increase_quantity(id: String) {
    with_view(|view| view.increase_quantity(id));
}

#[wasm_bindgen(js_name = decreaseQuantity)]
pub fn decrease_quantity(id: String) {
    with_view(|view| view.decrease_quantity(id));
}

/// Set an exact quantity; below 1 removes the item. Non-finite values are
/// ignored. Returns the cart.
#[wasm_bindgen(js_name = updateQuantity)]
pub fn update_quantity(id: String, quantity: f64) -> JsValue {
    if quantity.is_finite() {
        with_view(|view| view.set_quantity(id, quantity.trunc() as i64));
    }
    current_cart()
}

#[wasm_bindgen(js_name = clearCart)]
pub fn clear_cart() {
    with_view(|view| view.clear());
}

#[wasm_bindgen(js_name = getTotalItems)]
pub fn get_total_items() -> f64 {
    with_view(|view| view.total_item_count() as f64).unwrap_or(0.0)
}

/// Subtotal in major currency units.
#[wasm_bindgen(js_name = getTotalPrice)]
pub fn get_total_price() -> f64 {
    with_view(|view| view.subtotal().to_decimal()).unwrap_or(0.0)
}

#[wasm_bindgen(js_name = updateCartIcon)]
pub fn update_cart_icon() {
    with_view(|view| view.refresh_badge());
}

/// Re-read the persisted cart and repaint the cart page.
#[wasm_bindgen(js_name = updateCartPage)]
pub fn update_cart_page() {
    with_view(|view| view.refresh());
}

/// Show a toast; `kind` is `"success"` (default) or anything else for an
/// error toast.
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: String, kind: Option<String>) {
    let kind = kind
        .as_deref()
        .map(NotificationKind::from_name)
        .unwrap_or_default();
    with_view(|view| view.notify(&message, kind));
}
