//! The cart persisted under a single storage key.
//!
//! Every mutator writes the whole cart through to storage before returning.
//! Storage failures never reach the caller: they are logged and the
//! in-memory cart stays authoritative for the rest of the page.

pub mod wire;

use airtech_observability::StructuredLogger;
use airtech_storage::{JsonStore, Storage, StorageError};

use crate::cart::{AddOutcome, Cart, NewLineItem, QuantityChange};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

use wire::PersistedLineItem;

/// Storage key used by the storefront pages.
pub const DEFAULT_STORAGE_KEY: &str = "airtech_cart";

/// Cart persistence and mutation.
pub struct CartStore<S> {
    store: JsonStore<S>,
    key: String,
    currency: Currency,
    logger: StructuredLogger,
}

impl<S: Storage> CartStore<S> {
    /// Create a store over `storage` using the default key and currency.
    pub fn new(storage: S) -> Self {
        Self {
            store: JsonStore::new(storage),
            key: DEFAULT_STORAGE_KEY.to_string(),
            currency: Currency::default(),
            logger: StructuredLogger::new().with_component("cart-store"),
        }
    }

    /// Set the storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the currency persisted prices are expressed in.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set the logger.
    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Access the storage backend.
    pub fn storage(&self) -> &S {
        self.store.backend()
    }

    /// Read the persisted cart.
    ///
    /// A missing, unparsable or invariant-violating value yields an empty
    /// cart, which is written back immediately. A failed read yields an
    /// empty cart and leaves storage untouched.
    pub fn load(&self) -> Cart {
        match self.try_load() {
            Ok(Some(cart)) => cart,
            Ok(None) => {
                self.logger
                    .debug_builder("no persisted cart, starting empty")
                    .field("key", self.key.as_str())
                    .emit();
                self.reset()
            }
            Err(CommerceError::Storage(
                e @ (StorageError::Unavailable(_)
                | StorageError::QuotaExceeded(_)
                | StorageError::OperationFailed(_)),
            )) => {
                self.logger
                    .warn_builder("failed to read cart, starting empty")
                    .field("key", self.key.as_str())
                    .error(&e)
                    .emit();
                Cart::with_currency(self.currency)
            }
            Err(e) => {
                self.logger
                    .warn_builder("persisted cart is malformed, resetting")
                    .field("key", self.key.as_str())
                    .error(&e)
                    .emit();
                self.reset()
            }
        }
    }

    /// Read the persisted cart without self-healing.
    ///
    /// `Ok(None)` means nothing is stored under the key.
    pub fn try_load(&self) -> Result<Option<Cart>, CommerceError> {
        match self.store.get::<Vec<PersistedLineItem>>(&self.key)? {
            Some(items) => Ok(Some(wire::decode(items, self.currency)?)),
            None => Ok(None),
        }
    }

    fn reset(&self) -> Cart {
        let cart = Cart::with_currency(self.currency);
        self.save(&cart);
        cart
    }

    /// Persist the full cart, replacing any previous value.
    pub fn try_save(&self, cart: &Cart) -> Result<(), CommerceError> {
        self.store.set(&self.key, &wire::encode(cart))?;
        Ok(())
    }

    /// Persist the full cart; failures are logged and ignored.
    pub fn save(&self, cart: &Cart) {
        if let Err(e) = self.try_save(cart) {
            self.logger
                .warn_builder("failed to persist cart")
                .field("key", self.key.as_str())
                .field_i64("items", cart.unique_item_count() as i64)
                .error(&e)
                .emit();
        }
    }

    /// Add one unit of a product and persist.
    ///
    /// An item the cart rejects (negative price, wrong currency) is logged
    /// and the cart is returned unchanged.
    pub fn add_item(&self, mut cart: Cart, item: NewLineItem) -> Cart {
        let id = item.id.clone();
        match cart.add_item(item) {
            Ok(outcome) => {
                let quantity = match outcome {
                    AddOutcome::Added => 1,
                    AddOutcome::Incremented { quantity } => quantity,
                };
                self.logger
                    .debug_builder("item added")
                    .field("id", id.as_str())
                    .field_i64("quantity", quantity)
                    .emit();
                self.save(&cart);
            }
            Err(e) => {
                self.logger
                    .warn_builder("item rejected")
                    .field("id", id.as_str())
                    .error(&e)
                    .emit();
            }
        }
        cart
    }

    /// Remove an item and persist. Unknown ids are a no-op.
    pub fn remove_item(&self, mut cart: Cart, id: &ProductId) -> Cart {
        if cart.remove_item(id) {
            self.logger
                .debug_builder("item removed")
                .field("id", id.as_str())
                .emit();
        }
        self.save(&cart);
        cart
    }

    /// Set an item's quantity and persist.
    ///
    /// Below 1 removes the item; unknown ids are a no-op.
    pub fn set_quantity(&self, mut cart: Cart, id: &ProductId, quantity: i64) -> Cart {
        match cart.set_quantity(id, quantity) {
            QuantityChange::Updated { quantity } => self
                .logger
                .debug_builder("quantity updated")
                .field("id", id.as_str())
                .field_i64("quantity", quantity)
                .emit(),
            QuantityChange::Removed => self
                .logger
                .debug_builder("item removed by quantity")
                .field("id", id.as_str())
                .emit(),
            QuantityChange::NotFound => {}
        }
        self.save(&cart);
        cart
    }

    /// Empty the cart and persist.
    pub fn clear(&self, mut cart: Cart) -> Cart {
        cart.clear();
        self.save(&cart);
        cart
    }

    /// Sum of quantities.
    pub fn total_item_count(&self, cart: &Cart) -> i64 {
        cart.total_item_count()
    }

    /// Sum of price x quantity.
    pub fn subtotal(&self, cart: &Cart) -> Money {
        cart.subtotal()
    }
}
