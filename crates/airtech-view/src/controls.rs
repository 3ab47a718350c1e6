//! Add-to-cart controls.

use crate::command::ProductAttributes;
use crate::dom::Document;
use crate::format::html_escape;
use crate::timers::Timers;

/// Class marking an add-to-cart control.
pub const ADD_TO_CART_CLASS: &str = "add-to-cart-btn";

/// Set on a control while it shows its confirmation state.
pub const FEEDBACK_ATTRIBUTE: &str = "data-feedback-active";

const IDLE_CLASSES: [&str; 3] = ["bg-gradient-to-r", "from-blue-600", "to-purple-600"];
const CONFIRMED_CLASS: &str = "bg-green-500";

/// Read the `data-*` product attributes of a control.
pub fn product_attributes<D: Document>(document: &D, control: &D::Element) -> ProductAttributes {
    ProductAttributes {
        id: document.attribute(control, "data-id"),
        name: document.attribute(control, "data-name"),
        price: document.attribute(control, "data-price"),
        image: document.attribute(control, "data-image"),
    }
}

/// Swap a control into its confirmation state and schedule the revert.
///
/// A control already confirming is left alone, so its original markup is
/// never replaced by the confirmation markup. Returns `true` if feedback
/// started.
pub fn show_added_feedback<D: Document, T: Timers>(
    document: &D,
    timers: &T,
    control: &D::Element,
    label: &str,
    revert_ms: u32,
) -> bool {
    if document.attribute(control, FEEDBACK_ATTRIBUTE).is_some() {
        return false;
    }

    let original = document.inner_html(control);
    document.set_attribute(control, FEEDBACK_ATTRIBUTE, "true");
    document.set_inner_html(
        control,
        &format!(r#"<i class="fas fa-check mr-2"></i>{}"#, html_escape(label)),
    );
    for class in IDLE_CLASSES {
        document.remove_class(control, class);
    }
    document.add_class(control, CONFIRMED_CLASS);

    let doc = document.clone();
    let control = control.clone();
    timers.set_timeout(
        revert_ms,
        Box::new(move || {
            doc.set_inner_html(&control, &original);
            doc.remove_class(&control, CONFIRMED_CLASS);
            for class in IDLE_CLASSES {
                doc.add_class(&control, class);
            }
            doc.remove_attribute(&control, FEEDBACK_ATTRIBUTE);
        }),
    );
    true
}
