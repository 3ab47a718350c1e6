//! View settings.

use serde::{Deserialize, Serialize};

/// Delays, caps and labels used by the cart view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// How long an add-to-cart control shows its confirmation state.
    pub feedback_revert_ms: u32,
    /// Delay before a toast slides in.
    pub toast_show_delay_ms: u32,
    /// Delay before a toast slides out.
    pub toast_hide_delay_ms: u32,
    /// Largest count the badge shows before switching to `"<cap>+"`.
    pub badge_cap: i64,
    /// User-facing text.
    pub labels: Labels,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            feedback_revert_ms: 2000,
            toast_show_delay_ms: 100,
            toast_hide_delay_ms: 1500,
            badge_cap: 99,
            labels: Labels::default(),
        }
    }
}

/// User-facing text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Singular, few and many forms of the item word.
    pub item_forms: [String; 3],
    /// Confirmation text on an add-to-cart control.
    pub added: String,
    /// Remove action on a cart row.
    pub remove: String,
    /// Suffix after a unit price.
    pub per_unit: String,
    /// Toast after a successful add.
    pub added_to_cart: String,
    /// Toast when a control carries unusable product data.
    pub add_failed: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            item_forms: [
                "товар".to_string(),
                "товара".to_string(),
                "товаров".to_string(),
            ],
            added: "Добавлено".to_string(),
            remove: "Удалить".to_string(),
            per_unit: "за шт.".to_string(),
            added_to_cart: "Товар добавлен в корзину".to_string(),
            add_failed: "Не удалось добавить товар".to_string(),
        }
    }
}
