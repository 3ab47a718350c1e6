//! Cart domain types and logic for the AirTech storefront.
//!
//! - **Money**: integer minor units tagged with a currency
//! - **Cart**: ordered line items, unique by product id
//! - **Pricing**: add-on services, delivery fee, grand total
//! - **Store**: the cart persisted under a single storage key
//!
//! # Example
//!
//! ```rust
//! use airtech_commerce::prelude::*;
//! use airtech_storage::MemoryStorage;
//!
//! let store = CartStore::new(MemoryStorage::new());
//! let cart = store.load();
//!
//! let cart = store.add_item(
//!     cart,
//!     NewLineItem::new("ac-12", "Split system", Money::from_decimal(45990.0, Currency::RUB)),
//! );
//!
//! assert_eq!(cart.total_item_count(), 1);
//! assert_eq!(store.load(), cart);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod store;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        AddOn, AddOutcome, Cart, CartPricing, DeliveryPolicy, LineItem, LineItemPricing,
        NewLineItem, PricingRules, QuantityChange,
    };

    // Store
    pub use crate::store::{CartStore, DEFAULT_STORAGE_KEY};
}
