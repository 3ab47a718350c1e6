//! `web-sys` implementations of the view ports.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use airtech_view::{Document, EventKind, Listener, Propagation, Timers};

/// The page's `document`.
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    /// The document of the current window, if there is one.
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    /// Underlying `web_sys` handle.
    pub fn raw(&self) -> &web_sys::Document {
        &self.document
    }

    /// Whether the document is still parsing.
    pub fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    /// Text of the element with `id`.
    pub fn text_of(&self, id: &str) -> Option<String> {
        self.document.get_element_by_id(id)?.text_content()
    }
}

impl Document for BrowserDocument {
    type Element = web_sys::Element;

    fn element_by_id(&self, id: &str) -> Option<web_sys::Element> {
        self.document.get_element_by_id(id)
    }

    fn query_selector(&self, selector: &str) -> Option<web_sys::Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<web_sys::Element> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .collect()
    }

    fn closest(&self, element: &web_sys::Element, selector: &str) -> Option<web_sys::Element> {
        element.closest(selector).ok().flatten()
    }

    fn create_element(&self, tag: &str) -> Option<web_sys::Element> {
        self.document.create_element(tag).ok()
    }

    fn append_to_body(&self, element: &web_sys::Element) {
        if let Some(body) = self.document.body() {
            let _ = body.append_child(element);
        }
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.document.document_element()?.get_attribute(name)
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute(name, value);
        }
    }

    fn set_text(&self, element: &web_sys::Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn inner_html(&self, element: &web_sys::Element) -> String {
        element.inner_html()
    }

    fn set_inner_html(&self, element: &web_sys::Element, html: &str) {
        element.set_inner_html(html);
    }

    fn attribute(&self, element: &web_sys::Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &web_sys::Element, name: &str, value: &str) {
        let _ = element.set_attribute(name, value);
    }

    fn remove_attribute(&self, element: &web_sys::Element, name: &str) {
        let _ = element.remove_attribute(name);
    }

    fn add_class(&self, element: &web_sys::Element, class: &str) {
        let _ = element.class_list().add_1(class);
    }

    fn remove_class(&self, element: &web_sys::Element, class: &str) {
        let _ = element.class_list().remove_1(class);
    }

    fn has_class(&self, element: &web_sys::Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn set_class_name(&self, element: &web_sys::Element, class_name: &str) {
        element.set_class_name(class_name);
    }

    fn set_disabled(&self, element: &web_sys::Element, disabled: bool) {
        if disabled {
            let _ = element.set_attribute("disabled", "");
        } else {
            let _ = element.remove_attribute("disabled");
        }
    }

    fn is_checked(&self, element: &web_sys::Element) -> bool {
        element
            .dyn_ref::<web_sys::HtmlInputElement>()
            .is_some_and(|input| input.checked())
    }

    fn set_style(&self, element: &web_sys::Element, property: &str, value: &str) {
        if let Some(html) = element.dyn_ref::<web_sys::HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }

    fn add_listener(&self, kind: EventKind, listener: Listener<web_sys::Element>) {
        let callback = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };
            if listener(&target) == Propagation::Stop {
                event.prevent_default();
                event.stop_propagation();
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        if self
            .document
            .add_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref())
            .is_ok()
        {
            // Lives as long as the page.
            callback.forget();
        }
    }
}

/// `window.setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

impl Timers for BrowserTimers {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(move || callback());
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            i32::try_from(delay_ms).unwrap_or(i32::MAX),
        );
    }
}
