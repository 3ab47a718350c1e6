//! Persisted cart format.
//!
//! The cart is stored as a JSON array of
//! `{"id", "name", "price", "image", "quantity"}` objects, `price` being a
//! number in major currency units. Markup-provided carts may omit `name` or
//! `image`.

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, LineItem};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// One persisted line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedLineItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price: serde_json::Number,
    #[serde(default)]
    pub image: String,
    pub quantity: i64,
}

impl PersistedLineItem {
    /// Convert to a domain line item priced in `currency`.
    pub fn into_line_item(self, currency: Currency) -> Result<LineItem, CommerceError> {
        let unit_price = price_from_number(&self.id, &self.price, currency)?;
        Ok(LineItem {
            id: ProductId::new(self.id),
            name: self.name,
            unit_price,
            image_url: self.image,
            quantity: self.quantity,
        })
    }
}

impl From<&LineItem> for PersistedLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            price: price_to_number(&item.unit_price),
            image: item.image_url.clone(),
            quantity: item.quantity,
        }
    }
}

/// Decode a persisted array into a cart, checking every cart invariant.
pub fn decode(items: Vec<PersistedLineItem>, currency: Currency) -> Result<Cart, CommerceError> {
    let items = items
        .into_iter()
        .map(|item| item.into_line_item(currency))
        .collect::<Result<Vec<_>, _>>()?;
    Cart::from_items(items, currency)
}

/// Encode a cart as its persisted array.
pub fn encode(cart: &Cart) -> Vec<PersistedLineItem> {
    cart.items().iter().map(PersistedLineItem::from).collect()
}

fn price_from_number(
    id: &str,
    price: &serde_json::Number,
    currency: Currency,
) -> Result<Money, CommerceError> {
    let invalid = |reason: &str| CommerceError::InvalidPrice {
        id: id.to_string(),
        reason: reason.to_string(),
    };

    if let Some(whole) = price.as_i64() {
        return whole
            .checked_mul(currency.minor_per_major())
            .map(|minor| Money::new(minor, currency))
            .ok_or_else(|| invalid("out of range"));
    }

    let value = price.as_f64().ok_or_else(|| invalid("not a number"))?;
    let minor = value * currency.minor_per_major() as f64;
    if !minor.is_finite() || minor.abs() >= i64::MAX as f64 {
        return Err(invalid("out of range"));
    }
    Ok(Money::from_decimal(value, currency))
}

fn price_to_number(price: &Money) -> serde_json::Number {
    match price.whole_major() {
        Some(whole) => serde_json::Number::from(whole),
        None => serde_json::Number::from_f64(price.to_decimal())
            .unwrap_or_else(|| serde_json::Number::from(price.rounded_major())),
    }
}
