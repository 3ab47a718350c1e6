//! Page-side rendering and interaction for the AirTech cart.
//!
//! [`CartView`] owns the in-memory cart for one page, writes every change
//! through a [`CartStore`](airtech_commerce::store::CartStore) and keeps the
//! header badge, the cart page, add-to-cart controls and toasts in sync.
//!
//! The page is reached through two ports: [`Document`] for the DOM and
//! [`Timers`] for deferred visual feedback. [`MemoryDocument`] and
//! [`ManualTimers`] implement them without a browser.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use airtech_commerce::store::CartStore;
//! use airtech_storage::MemoryStorage;
//! use airtech_view::{CartView, ManualTimers, MemoryDocument};
//!
//! let doc = MemoryDocument::new();
//! let badge = doc.append_to_root("span", &[("id", "cart-count"), ("class", "hidden")]);
//! let button = doc.append_to_root(
//!     "button",
//!     &[("class", "add-to-cart-btn"), ("data-id", "ac-12"), ("data-price", "45990")],
//! );
//!
//! let view = Rc::new(CartView::new(
//!     CartStore::new(MemoryStorage::new()),
//!     doc.clone(),
//!     ManualTimers::new(),
//! ));
//! view.init().unwrap();
//!
//! doc.click(button);
//! assert_eq!(doc.content(badge), "1");
//! ```

pub mod badge;
pub mod command;
pub mod config;
pub mod controls;
pub mod dom;
pub mod error;
pub mod format;
pub mod lifecycle;
pub mod notify;
pub mod page;
pub mod timers;
pub mod view;

pub use command::{CartCommand, ProductAttributes};
pub use config::{Labels, ViewConfig};
pub use dom::{Document, EventKind, Listener, MemoryDocument, NodeId, Propagation};
pub use error::ViewError;
pub use lifecycle::ViewPhase;
pub use notify::{NotificationKind, Notifier};
pub use timers::{ManualTimers, Timers};
pub use view::CartView;
