//! Cart and line item types.

use std::collections::HashSet;

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A shopping cart.
///
/// Items keep insertion order and are unique by product id; every stored
/// item has a quantity of at least 1.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart in the default currency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cart priced in `currency`.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Build a cart from existing items, checking every cart invariant.
    ///
    /// Returns an error if:
    /// - an item has a quantity below 1
    /// - an item has a negative price, a price above [`MAX_UNIT_PRICE_MINOR`]
    ///   or a price in another currency
    /// - two items share a product id
    pub fn from_items(items: Vec<LineItem>, currency: Currency) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.quantity < 1 {
                return Err(CommerceError::InvalidQuantity(item.quantity));
            }
            check_price(&item.id, &item.unit_price, currency)?;
            if !seen.insert(&item.id) {
                return Err(CommerceError::DuplicateItem(item.id.to_string()));
            }
        }
        Ok(Self { items, currency })
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Add one unit of a product.
    ///
    /// An existing line item gets its quantity incremented by 1 and keeps its
    /// name, price and image; a new product is appended with quantity 1.
    pub fn add_item(&mut self, item: NewLineItem) -> Result<AddOutcome, CommerceError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return Ok(AddOutcome::Incremented {
                quantity: existing.quantity,
            });
        }

        check_price(&item.id, &item.unit_price, self.currency)?;
        self.items.push(LineItem {
            id: item.id,
            name: item.name,
            unit_price: item.unit_price,
            image_url: item.image_url,
            quantity: 1,
        });
        Ok(AddOutcome::Added)
    }

    /// Set the quantity of an item to exactly `quantity`.
    ///
    /// A quantity below 1 removes the item. Unknown ids leave the cart
    /// untouched.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> QuantityChange {
        let Some(index) = self.items.iter().position(|i| &i.id == id) else {
            return QuantityChange::NotFound;
        };

        if quantity < 1 {
            self.items.remove(index);
            return QuantityChange::Removed;
        }

        self.items[index].quantity = quantity;
        QuantityChange::Updated { quantity }
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get total item count (sum of quantities).
    pub fn total_item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |total, i| total.saturating_add(i.quantity))
    }

    /// Sum of `unit_price * quantity` over all items.
    ///
    /// Saturates instead of overflowing; use
    /// [`Cart::calculate_pricing`](crate::cart::Cart::calculate_pricing) for
    /// the checked breakdown.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(self.currency), |total, i| {
                total.saturating_add(&i.saturating_total())
            })
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by product id.
    pub fn get_item(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }
}

/// Largest unit price, in minor units. Fractional prices are persisted as
/// decimal major units and stay exact up to this bound.
pub const MAX_UNIT_PRICE_MINOR: i64 = 100_000_000_000_000;

fn check_price(id: &ProductId, price: &Money, currency: Currency) -> Result<(), CommerceError> {
    if price.currency != currency {
        return Err(CommerceError::CurrencyMismatch {
            expected: currency.code().to_string(),
            got: price.currency.code().to_string(),
        });
    }
    if price.is_negative() {
        return Err(CommerceError::InvalidPrice {
            id: id.to_string(),
            reason: "negative".to_string(),
        });
    }
    if price.amount_minor > MAX_UNIT_PRICE_MINOR {
        return Err(CommerceError::InvalidPrice {
            id: id.to_string(),
            reason: "out of range".to_string(),
        });
    }
    Ok(())
}

/// A line item in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Product id, unique within the cart.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Product image URL.
    pub image_url: String,
    /// Quantity, at least 1.
    pub quantity: i64,
}

impl LineItem {
    /// Line total (`unit_price * quantity`), `None` on overflow.
    pub fn total(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity)
    }

    fn saturating_total(&self) -> Money {
        self.unit_price.saturating_multiply(self.quantity)
    }
}

/// Product attributes for adding one unit to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLineItem {
    /// Product id.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Product image URL.
    pub image_url: String,
}

impl NewLineItem {
    /// Create an item without an image.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            image_url: String::new(),
        }
    }

    /// Set the image URL.
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }
}

/// Result of [`Cart::add_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was appended.
    Added,
    /// An existing line item's quantity went up by one.
    Incremented { quantity: i64 },
}

/// Result of [`Cart::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The quantity was set.
    Updated { quantity: i64 },
    /// The requested quantity was below 1 and the item was removed.
    Removed,
    /// No item with that id.
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rub(major: i64) -> Money {
        Money::from_major(major, Currency::RUB)
    }

    fn item(id: &str, price: i64) -> NewLineItem {
        NewLineItem::new(id, format!("Product {}", id), rub(price))
            .with_image(format!("/img/{}.jpg", id))
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.currency(), Currency::RUB);
        assert_eq!(cart.total_item_count(), 0);
        assert!(cart.subtotal().is_zero());
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let outcome = cart.add_item(item("A", 100)).unwrap();

        assert_eq!(outcome, AddOutcome::Added);
        assert_eq!(cart.total_item_count(), 1);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.items()[0].image_url, "/img/A.jpg");
    }

    #[test]
    fn test_add_same_item_keeps_first_seen_fields() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 100)).unwrap();

        let mut second = item("A", 200);
        second.name = "Renamed".to_string();
        second.image_url = "/other.jpg".to_string();
        let outcome = cart.add_item(second).unwrap();

        assert_eq!(outcome, AddOutcome::Incremented { quantity: 2 });
        let line = cart.get_item(&ProductId::new("A")).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, rub(100));
        assert_eq!(line.name, "Product A");
        assert_eq!(line.image_url, "/img/A.jpg");
        assert_eq!(cart.subtotal(), rub(200));
    }

    #[test]
    fn test_repeated_adds_count_calls() {
        let mut cart = Cart::new();
        for n in 1..=7 {
            cart.add_item(item("A", 10 * n)).unwrap();
        }

        let line = cart.get_item(&ProductId::new("A")).unwrap();
        assert_eq!(line.quantity, 7);
        assert_eq!(line.unit_price, rub(10));
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(item("B", 1)).unwrap();
        cart.add_item(item("A", 1)).unwrap();
        cart.add_item(item("B", 1)).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_add_rejects_negative_price() {
        let mut cart = Cart::new();
        let result = cart.add_item(item("A", -5));
        assert!(matches!(result, Err(CommerceError::InvalidPrice { .. })));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_price_range() {
        let mut cart = Cart::new();
        let limit = Money::new(MAX_UNIT_PRICE_MINOR, Currency::RUB);
        assert!(cart.add_item(NewLineItem::new("A", "A", limit)).is_ok());

        let above = Money::new(MAX_UNIT_PRICE_MINOR + 1, Currency::RUB);
        let result = cart.add_item(NewLineItem::new("B", "B", above));
        assert!(matches!(result, Err(CommerceError::InvalidPrice { .. })));
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_add_rejects_other_currency() {
        let mut cart = Cart::new();
        let result = cart.add_item(NewLineItem::new("A", "A", Money::from_major(5, Currency::USD)));
        assert!(matches!(result, Err(CommerceError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 100)).unwrap();

        let change = cart.set_quantity(&ProductId::new("A"), 5);
        assert_eq!(change, QuantityChange::Updated { quantity: 5 });
        assert_eq!(cart.total_item_count(), 5);
    }

    #[test]
    fn test_set_quantity_below_one_removes() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 100)).unwrap();
        cart.add_item(item("B", 100)).unwrap();

        assert_eq!(cart.set_quantity(&ProductId::new("A"), 0), QuantityChange::Removed);
        assert_eq!(cart.set_quantity(&ProductId::new("B"), -3), QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_id() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 100)).unwrap();
        let before = cart.clone();

        assert_eq!(cart.set_quantity(&ProductId::new("Z"), 3), QuantityChange::NotFound);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 100)).unwrap();

        assert!(!cart.remove_item(&ProductId::new("missing")));
        assert!(cart.remove_item(&ProductId::new("A")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_aggregates() {
        let mut cart = Cart::new();
        cart.add_item(item("B", 1000)).unwrap();
        cart.set_quantity(&ProductId::new("B"), 3);
        cart.add_item(item("C", 250)).unwrap();

        assert_eq!(cart.total_item_count(), 4);
        assert_eq!(cart.subtotal(), rub(3250));
    }

    #[test]
    fn test_from_items_validates() {
        let line = |id: &str, quantity: i64| LineItem {
            id: ProductId::new(id),
            name: id.to_string(),
            unit_price: rub(10),
            image_url: String::new(),
            quantity,
        };

        assert!(Cart::from_items(vec![line("A", 1), line("B", 2)], Currency::RUB).is_ok());
        assert!(matches!(
            Cart::from_items(vec![line("A", 0)], Currency::RUB),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(matches!(
            Cart::from_items(vec![line("A", 1), line("A", 1)], Currency::RUB),
            Err(CommerceError::DuplicateItem(id)) if id == "A"
        ));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 100)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }
}
