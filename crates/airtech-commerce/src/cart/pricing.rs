//! Cart pricing calculations.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// An optional flat-fee service (installation, extended warranty, ...).
///
/// Selected add-ons are charged in full; there is no partial pricing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddOn {
    /// Identifier, also the id of the checkbox that selects it.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Flat fee.
    pub price: Money,
}

impl AddOn {
    /// Create a new add-on.
    pub fn new(id: impl Into<String>, label: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            price,
        }
    }
}

/// Flat delivery fee, waived from a subtotal threshold upward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DeliveryPolicy {
    /// Fee charged below the threshold.
    pub fee: Money,
    /// Subtotal from which delivery is free.
    pub free_threshold: Money,
}

impl DeliveryPolicy {
    /// Delivery fee for a given subtotal: zero at or above the threshold,
    /// the full fee otherwise.
    pub fn fee_for(&self, subtotal: &Money) -> Money {
        if subtotal.amount_minor >= self.free_threshold.amount_minor {
            Money::zero(self.fee.currency)
        } else {
            self.fee
        }
    }
}

/// Business constants for the cart page totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingRules {
    /// Currency of every amount below.
    pub currency: Currency,
    /// Selectable add-on services.
    pub add_ons: Vec<AddOn>,
    /// Delivery fee policy.
    pub delivery: DeliveryPolicy,
}

impl Default for PricingRules {
    fn default() -> Self {
        let rub = |major| Money::from_major(major, Currency::RUB);
        Self {
            currency: Currency::RUB,
            add_ons: vec![
                AddOn::new("installation", "Монтаж", rub(5000)),
                AddOn::new("warranty", "Расширенная гарантия", rub(3000)),
                AddOn::new("delivery", "Доставка и подъём", rub(2500)),
            ],
            delivery: DeliveryPolicy {
                fee: rub(2500),
                free_threshold: rub(50000),
            },
        }
    }
}

impl PricingRules {
    /// Get an add-on by id.
    pub fn add_on(&self, id: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|a| a.id == id)
    }

    /// Total of the selected add-ons.
    ///
    /// Unknown ids are ignored and an id selected twice is charged once.
    pub fn add_ons_total(&self, selected: &[String]) -> Result<Money, CommerceError> {
        let chosen = self
            .add_ons
            .iter()
            .filter(|a| selected.iter().any(|s| s == &a.id))
            .map(|a| &a.price);
        Money::try_sum(chosen, self.currency).ok_or(CommerceError::Overflow)
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Total of selected add-on services.
    pub add_ons_total: Money,
    /// Delivery fee after the free-delivery threshold.
    pub delivery_fee: Money,
    /// subtotal + add-ons + delivery.
    pub grand_total: Money,
    /// Per-line-item pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// All-zero pricing for an empty cart.
    pub fn empty(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            subtotal: zero,
            add_ons_total: zero,
            delivery_fee: zero,
            grand_total: zero,
            line_items: Vec::new(),
        }
    }

    /// Check if delivery is free.
    pub fn has_free_delivery(&self) -> bool {
        self.delivery_fee.is_zero()
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Product id.
    pub id: ProductId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// unit_price * quantity.
    pub total: Money,
}

impl Cart {
    /// Calculate the cart page totals.
    ///
    /// An empty cart prices to zero regardless of selected add-ons: nothing
    /// is delivered or installed. Returns an error on overflow or when the
    /// rules are in a different currency than the cart.
    pub fn calculate_pricing(
        &self,
        rules: &PricingRules,
        selected_add_ons: &[String],
    ) -> Result<CartPricing, CommerceError> {
        if rules.currency != self.currency() {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency().code().to_string(),
                got: rules.currency.code().to_string(),
            });
        }
        if self.is_empty() {
            return Ok(CartPricing::empty(self.currency()));
        }

        let line_items = self
            .items()
            .iter()
            .map(|item| {
                item.total()
                    .map(|total| LineItemPricing {
                        id: item.id.clone(),
                        unit_price: item.unit_price,
                        quantity: item.quantity,
                        total,
                    })
                    .ok_or(CommerceError::Overflow)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = Money::try_sum(line_items.iter().map(|l| &l.total), self.currency())
            .ok_or(CommerceError::Overflow)?;
        let add_ons_total = rules.add_ons_total(selected_add_ons)?;
        let delivery_fee = rules.delivery.fee_for(&subtotal);

        let grand_total = subtotal
            .try_add(&add_ons_total)
            .and_then(|m| m.try_add(&delivery_fee))
            .ok_or(CommerceError::Overflow)?;

        Ok(CartPricing {
            subtotal,
            add_ons_total,
            delivery_fee,
            grand_total,
            line_items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{NewLineItem, MAX_UNIT_PRICE_MINOR};

    fn rub(major: i64) -> Money {
        Money::from_major(major, Currency::RUB)
    }

    fn cart_with(id: &str, price: i64, quantity: i64) -> Cart {
        let mut cart = Cart::new();
        cart.add_item(NewLineItem::new(id, id, rub(price))).unwrap();
        cart.set_quantity(&ProductId::new(id), quantity);
        cart
    }

    #[test]
    fn test_delivery_charged_below_threshold() {
        let cart = cart_with("B", 1000, 3);
        let pricing = cart.calculate_pricing(&PricingRules::default(), &[]).unwrap();

        assert_eq!(pricing.subtotal, rub(3000));
        assert_eq!(pricing.delivery_fee, rub(2500));
        assert!(!pricing.has_free_delivery());
        assert_eq!(pricing.grand_total, rub(5500));
    }

    #[test]
    fn test_delivery_free_at_threshold() {
        let rules = PricingRules::default();
        assert!(rules.delivery.fee_for(&rub(50000)).is_zero());
        assert!(rules.delivery.fee_for(&rub(50001)).is_zero());
        assert_eq!(rules.delivery.fee_for(&rub(49999)), rub(2500));
    }

    #[test]
    fn test_add_ons_are_flat_fees() {
        let cart = cart_with("A", 60000, 1);
        let selected = vec!["installation".to_string(), "warranty".to_string()];
        let pricing = cart
            .calculate_pricing(&PricingRules::default(), &selected)
            .unwrap();

        assert_eq!(pricing.add_ons_total, rub(8000));
        assert!(pricing.has_free_delivery());
        assert_eq!(pricing.grand_total, rub(68000));
    }

    #[test]
    fn test_add_ons_ignore_unknown_and_duplicates() {
        let rules = PricingRules::default();
        let selected = vec![
            "warranty".to_string(),
            "warranty".to_string(),
            "gift-wrap".to_string(),
        ];
        assert_eq!(rules.add_ons_total(&selected).unwrap(), rub(3000));
    }

    #[test]
    fn test_empty_cart_prices_to_zero() {
        let selected = vec!["installation".to_string()];
        let pricing = Cart::new()
            .calculate_pricing(&PricingRules::default(), &selected)
            .unwrap();

        assert_eq!(pricing, CartPricing::empty(Currency::RUB));
    }

    #[test]
    fn test_line_item_breakdown() {
        let mut cart = cart_with("A", 100, 2);
        cart.add_item(NewLineItem::new("B", "B", rub(50))).unwrap();

        let pricing = cart.calculate_pricing(&PricingRules::default(), &[]).unwrap();
        assert_eq!(pricing.line_items.len(), 2);
        assert_eq!(pricing.line_items[0].total, rub(200));
        assert_eq!(pricing.line_items[1].quantity, 1);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut cart = Cart::new();
        let price = Money::new(MAX_UNIT_PRICE_MINOR, Currency::RUB);
        cart.add_item(NewLineItem::new("A", "A", price)).unwrap();
        cart.set_quantity(&ProductId::new("A"), 1_000_000);

        let result = cart.calculate_pricing(&PricingRules::default(), &[]);
        assert!(matches!(result, Err(CommerceError::Overflow)));
    }

    #[test]
    fn test_rules_currency_must_match() {
        let rules = PricingRules {
            currency: Currency::EUR,
            ..PricingRules::default()
        };
        let result = cart_with("A", 1, 1).calculate_pricing(&rules, &[]);
        assert!(matches!(result, Err(CommerceError::CurrencyMismatch { .. })));
    }
}
