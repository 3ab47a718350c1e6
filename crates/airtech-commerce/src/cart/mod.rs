//! Shopping cart module.
//!
//! Contains the cart, its line items and the pricing rules applied on the
//! cart page.

mod cart;
mod pricing;

pub use cart::{AddOutcome, Cart, LineItem, NewLineItem, QuantityChange, MAX_UNIT_PRICE_MINOR};
pub use pricing::{AddOn, CartPricing, DeliveryPolicy, LineItemPricing, PricingRules};
