//! Product objects passed to `addToCart` from page scripts.

use serde::Deserialize;
use serde_json::Value;

use airtech_commerce::cart::NewLineItem;
use airtech_commerce::Currency;
use airtech_view::{ProductAttributes, ViewError};

/// `{id, name, price, image}` as page scripts pass it.
///
/// `id` and `price` may be strings or numbers, the way they come out of
/// `dataset` or a literal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductInput {
    /// Parse the JSON text of a product object.
    pub fn from_json(json: &str) -> Result<Self, ViewError> {
        serde_json::from_str(json).map_err(|e| ViewError::InvalidProduct(e.to_string()))
    }

    /// Validate into an item to add.
    pub fn into_item(self, currency: Currency) -> Result<NewLineItem, ViewError> {
        ProductAttributes {
            id: scalar_text(&self.id),
            name: self.name,
            price: scalar_text(&self.price),
            image: self.image,
        }
        .into_item(currency)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
