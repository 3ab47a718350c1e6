//! Cart badge in the page header.

use crate::dom::Document;
use crate::format::badge_text;

/// Ids of the badge elements (desktop and mobile navigation).
pub const BADGE_IDS: [&str; 2] = ["cart-count", "mobile-cart-count"];

/// Class that hides an element.
pub const HIDDEN_CLASS: &str = "hidden";

/// Reflect `count` into every badge present on the page.
///
/// A zero count hides the badge and leaves its text alone.
pub fn refresh_badge<D: Document>(document: &D, count: i64, cap: i64) {
    let text = badge_text(count, cap);
    for id in BADGE_IDS {
        let Some(element) = document.element_by_id(id) else {
            continue;
        };
        match &text {
            Some(text) => {
                document.set_text(&element, text);
                document.remove_class(&element, HIDDEN_CLASS);
            }
            None => document.add_class(&element, HIDDEN_CLASS),
        }
    }
}
