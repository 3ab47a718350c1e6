//! Transient toast notifications.

use std::cell::Cell;
use std::rc::Rc;

use crate::dom::Document;
use crate::format::html_escape;
use crate::timers::Timers;

/// Class marking the toast element.
pub const NOTIFICATION_CLASS: &str = "cart-notification";

const BASE_CLASSES: &str = "cart-notification fixed top-6 right-6 px-6 py-4 rounded-lg shadow-lg z-50 transform translate-x-full transition-transform duration-300";
const SHOWN: &str = "translateX(0)";
const HIDDEN: &str = "translateX(1000%)";

/// Toast flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

impl NotificationKind {
    /// Parse a kind name; anything but `"success"` is an error toast.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("success") {
            NotificationKind::Success
        } else {
            NotificationKind::Error
        }
    }

    fn colors(&self) -> &'static str {
        match self {
            NotificationKind::Success => "bg-green-500 text-white",
            NotificationKind::Error => "bg-red-500 text-white",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "check-circle",
            NotificationKind::Error => "exclamation-circle",
        }
    }
}

/// Shows toasts in a single reusable element.
///
/// Each toast bumps a generation counter; a timer only touches the element
/// if no newer toast was shown since it was scheduled.
#[derive(Clone)]
pub struct Notifier<D, T> {
    document: D,
    timers: T,
    show_delay_ms: u32,
    hide_delay_ms: u32,
    generation: Rc<Cell<u64>>,
}

impl<D: Document, T: Timers> Notifier<D, T> {
    pub fn new(document: D, timers: T, show_delay_ms: u32, hide_delay_ms: u32) -> Self {
        Self {
            document,
            timers,
            show_delay_ms,
            hide_delay_ms,
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Show `message`. Returns `false` if no element could be created.
    pub fn notify(&self, message: &str, kind: NotificationKind) -> bool {
        let Some(element) = self.element() else {
            return false;
        };
        let doc = &self.document;

        doc.set_class_name(&element, &format!("{} {}", BASE_CLASSES, kind.colors()));
        doc.set_inner_html(
            &element,
            &format!(
                r#"<div class="flex items-center"><i class="fas fa-{} mr-3"></i><span>{}</span></div>"#,
                kind.icon(),
                html_escape(message)
            ),
        );

        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        self.schedule_transform(self.show_delay_ms, generation, &element, SHOWN);
        self.schedule_transform(self.hide_delay_ms, generation, &element, HIDDEN);
        true
    }

    /// Hide the toast right away.
    pub fn dismiss(&self, element: &D::Element) {
        self.generation.set(self.generation.get().wrapping_add(1));
        self.document.set_style(element, "transform", HIDDEN);
    }

    fn element(&self) -> Option<D::Element> {
        let selector = format!(".{}", NOTIFICATION_CLASS);
        if let Some(existing) = self.document.query_selector(&selector) {
            return Some(existing);
        }
        let created = self.document.create_element("div")?;
        self.document.set_class_name(&created, BASE_CLASSES);
        self.document.append_to_body(&created);
        Some(created)
    }

    fn schedule_transform(
        &self,
        delay_ms: u32,
        generation: u64,
        element: &D::Element,
        transform: &'static str,
    ) {
        let doc = self.document.clone();
        let element = element.clone();
        let current = self.generation.clone();
        self.timers.set_timeout(
            delay_ms,
            Box::new(move || {
                if current.get() == generation {
                    doc.set_style(&element, "transform", transform);
                }
            }),
        );
    }
}
