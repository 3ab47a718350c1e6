//! DOM port.
//!
//! The view only needs a small slice of the DOM: lookups by id or simple
//! selector, text and markup, classes, a handful of attributes and
//! document-level (delegated) event listeners.

pub mod memory;

pub use memory::{MemoryDocument, NodeId};

/// Events the view listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
}

impl EventKind {
    /// DOM event type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Change => "change",
        }
    }
}

/// What a listener wants done with the event after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Leave the event alone.
    Continue,
    /// Prevent the default action and stop propagation.
    Stop,
}

/// Document-level listener, called with the event target.
pub type Listener<E> = Box<dyn Fn(&E) -> Propagation>;

/// Access to the page document.
///
/// Selectors are limited to a single simple selector: `#id`, `.class`,
/// `[attr]` or a tag name. Every method tolerates elements that have since
/// been detached.
pub trait Document: Clone + 'static {
    /// Element handle.
    type Element: Clone + 'static;

    /// Look up a connected element by id.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// First connected element matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// All connected elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Nearest ancestor-or-self of `element` matching `selector`.
    fn closest(&self, element: &Self::Element, selector: &str) -> Option<Self::Element>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Option<Self::Element>;

    /// Append an element to the document body.
    fn append_to_body(&self, element: &Self::Element);

    /// Attribute on the document root (`<html>`).
    fn root_attribute(&self, name: &str) -> Option<String>;

    /// Set an attribute on the document root.
    fn set_root_attribute(&self, name: &str, value: &str);

    fn set_text(&self, element: &Self::Element, text: &str);
    fn inner_html(&self, element: &Self::Element) -> String;
    fn set_inner_html(&self, element: &Self::Element, html: &str);

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);
    fn remove_attribute(&self, element: &Self::Element, name: &str);

    fn add_class(&self, element: &Self::Element, class: &str);
    fn remove_class(&self, element: &Self::Element, class: &str);
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
    /// Replace the whole class list.
    fn set_class_name(&self, element: &Self::Element, class_name: &str);

    fn set_disabled(&self, element: &Self::Element, disabled: bool);
    /// Checked state of a checkbox; `false` for anything else.
    fn is_checked(&self, element: &Self::Element) -> bool;

    /// Set an inline style property.
    fn set_style(&self, element: &Self::Element, property: &str, value: &str);

    /// Register a listener on the document for `kind`.
    fn add_listener(&self, kind: EventKind, listener: Listener<Self::Element>);
}

/// A parsed simple selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<'a> {
    Id(&'a str),
    Class(&'a str),
    Attribute(&'a str),
    Tag(&'a str),
}

impl<'a> Selector<'a> {
    /// Parse a simple selector; `None` for anything more complex.
    pub fn parse(selector: &'a str) -> Option<Self> {
        let selector = selector.trim();
        if selector.is_empty() || selector.contains(char::is_whitespace) {
            return None;
        }
        if let Some(id) = selector.strip_prefix('#') {
            return Some(Selector::Id(id));
        }
        if let Some(class) = selector.strip_prefix('.') {
            return Some(Selector::Class(class));
        }
        if let Some(attr) = selector.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return Some(Selector::Attribute(attr));
        }
        selector
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
            .then_some(Selector::Tag(selector))
    }
}
