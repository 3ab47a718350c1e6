//! Cart commands and their parsing from page markup.

use airtech_commerce::cart::NewLineItem;
use airtech_commerce::{Currency, Money, ProductId};

use crate::error::ViewError;

/// Attribute carrying a cart-row action name.
pub const ACTION_ATTRIBUTE: &str = "data-cart-action";

/// A user intent against the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Add one unit of a product.
    Add(NewLineItem),
    /// Remove a product entirely.
    Remove(ProductId),
    /// One more unit of a product already in the cart.
    Increase(ProductId),
    /// One unit less; the item goes away below 1.
    Decrease(ProductId),
    /// Set an exact quantity; below 1 removes the item.
    SetQuantity { id: ProductId, quantity: i64 },
    /// Empty the cart.
    Clear,
    /// Re-read the persisted cart and repaint.
    Refresh,
}

impl CartCommand {
    /// Command name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::Add(_) => "add",
            CartCommand::Remove(_) => "remove",
            CartCommand::Increase(_) => "increase",
            CartCommand::Decrease(_) => "decrease",
            CartCommand::SetQuantity { .. } => "set_quantity",
            CartCommand::Clear => "clear",
            CartCommand::Refresh => "refresh",
        }
    }

    /// Build a command from a cart-row action attribute.
    ///
    /// Row actions other than `clear` need a product id.
    pub fn from_action(action: &str, id: Option<&str>) -> Option<Self> {
        let id = id.map(str::trim).filter(|id| !id.is_empty());
        match (action.trim(), id) {
            ("clear", _) => Some(CartCommand::Clear),
            ("remove", Some(id)) => Some(CartCommand::Remove(ProductId::new(id))),
            ("increase", Some(id)) => Some(CartCommand::Increase(ProductId::new(id))),
            ("decrease", Some(id)) => Some(CartCommand::Decrease(ProductId::new(id))),
            _ => None,
        }
    }
}

/// Raw product attributes of an add-to-cart control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductAttributes {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl ProductAttributes {
    /// Turn the attributes into an item to add.
    ///
    /// The id must be non-empty and the price a finite, non-negative decimal
    /// number. Spaces used as thousands separators and a decimal comma are
    /// accepted. Missing name or image become empty strings.
    pub fn into_item(self, currency: Currency) -> Result<NewLineItem, ViewError> {
        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ViewError::InvalidProduct("missing data-id".to_string()))?;

        let raw_price = self
            .price
            .ok_or_else(|| ViewError::InvalidProduct(format!("{}: missing data-price", id)))?;
        let price = parse_price(&raw_price).ok_or_else(|| {
            ViewError::InvalidProduct(format!("{}: bad data-price {:?}", id, raw_price))
        })?;

        Ok(
            NewLineItem::new(id, self.name.unwrap_or_default(), Money::from_decimal(price, currency))
                .with_image(self.image.unwrap_or_default()),
        )
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    let value: f64 = cleaned.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
