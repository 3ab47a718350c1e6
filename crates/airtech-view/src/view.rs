//! The cart view: keeps the page in sync with the persisted cart.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use airtech_commerce::cart::{Cart, NewLineItem, PricingRules};
use airtech_commerce::store::CartStore;
use airtech_commerce::{Money, ProductId};
use airtech_observability::StructuredLogger;
use airtech_storage::Storage;

use crate::badge;
use crate::command::{CartCommand, ACTION_ATTRIBUTE};
use crate::config::ViewConfig;
use crate::controls::{self, ADD_TO_CART_CLASS};
use crate::dom::{Document, EventKind, Propagation};
use crate::error::ViewError;
use crate::lifecycle::ViewPhase;
use crate::notify::{NotificationKind, Notifier, NOTIFICATION_CLASS};
use crate::page;
use crate::timers::Timers;

/// Root attribute set once the delegated listeners are installed.
pub const BOUND_ATTRIBUTE: &str = "data-cart-bound";

/// Cart state bound to one page.
///
/// Handlers installed by [`CartView::bind_add_to_cart_controls`] hold a weak
/// reference, so the view is shared as `Rc<CartView<..>>`.
pub struct CartView<S, D: Document, T> {
    store: CartStore<S>,
    document: D,
    timers: T,
    rules: PricingRules,
    config: ViewConfig,
    notifier: Notifier<D, T>,
    logger: StructuredLogger,
    cart: RefCell<Cart>,
    phase: Cell<ViewPhase>,
}

impl<S, D, T> CartView<S, D, T>
where
    S: Storage + 'static,
    D: Document,
    T: Timers,
{
    /// Create a view with default pricing rules and settings.
    pub fn new(store: CartStore<S>, document: D, timers: T) -> Self {
        let config = ViewConfig::default();
        let notifier = Notifier::new(
            document.clone(),
            timers.clone(),
            config.toast_show_delay_ms,
            config.toast_hide_delay_ms,
        );
        let cart = Cart::with_currency(store.currency());
        Self {
            store,
            document,
            timers,
            rules: PricingRules::default(),
            config,
            notifier,
            logger: StructuredLogger::new().with_component("cart-view"),
            cart: RefCell::new(cart),
            phase: Cell::new(ViewPhase::Init),
        }
    }

    /// Set the pricing rules used on the cart page.
    pub fn with_rules(mut self, rules: PricingRules) -> Self {
        self.rules = rules;
        self
    }

    /// Set delays, caps and labels.
    pub fn with_config(mut self, config: ViewConfig) -> Self {
        self.notifier = Notifier::new(
            self.document.clone(),
            self.timers.clone(),
            config.toast_show_delay_ms,
            config.toast_hide_delay_ms,
        );
        self.config = config;
        self
    }

    /// Set the logger.
    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase.get()
    }

    /// Snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.cart.borrow().clone()
    }

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Sum of quantities in the current cart.
    pub fn total_item_count(&self) -> i64 {
        self.store.total_item_count(&self.cart.borrow())
    }

    /// Subtotal of the current cart.
    pub fn subtotal(&self) -> Money {
        self.store.subtotal(&self.cart.borrow())
    }

    /// Load the cart, paint the page and bind the page controls.
    ///
    /// Only valid once per view.
    pub fn init(self: &Rc<Self>) -> Result<(), ViewError> {
        let next = self.checked_transition(ViewPhase::Loaded)?;

        let cart = self.store.load();
        *self.cart.borrow_mut() = cart;
        self.phase.set(next);

        self.repaint();
        self.bind_add_to_cart_controls();

        self.logger
            .info_builder("cart view ready")
            .field_i64("items", self.total_item_count())
            .emit();
        Ok(())
    }

    /// Apply a command, persist it and repaint.
    pub fn dispatch(&self, command: CartCommand) -> Result<(), ViewError> {
        let mutated = self.checked_transition(ViewPhase::Mutated)?;
        self.phase.set(mutated);

        let name = command.name();
        let current = self.cart();
        let next = match command {
            CartCommand::Add(item) => self.apply_add(current, item),
            CartCommand::Remove(id) => self.store.remove_item(current, &id),
            CartCommand::Increase(id) => self.step_quantity(current, &id, 1),
            CartCommand::Decrease(id) => self.step_quantity(current, &id, -1),
            CartCommand::SetQuantity { id, quantity } => {
                self.store.set_quantity(current, &id, quantity)
            }
            CartCommand::Clear => self.store.clear(current),
            CartCommand::Refresh => self.store.load(),
        };
        *self.cart.borrow_mut() = next;

        self.repaint();
        self.phase.set(ViewPhase::Rendered);

        self.logger
            .debug_builder("command applied")
            .field("command", name)
            .field_i64("items", self.total_item_count())
            .emit();
        Ok(())
    }

    pub fn add_to_cart(&self, item: NewLineItem) -> Result<(), ViewError> {
        self.dispatch(CartCommand::Add(item))
    }

    pub fn remove_item(&self, id: impl Into<ProductId>) -> Result<(), ViewError> {
        self.dispatch(CartCommand::Remove(id.into()))
    }

    pub fn increase_quantity(&self, id: impl Into<ProductId>) -> Result<(), ViewError> {
        self.dispatch(CartCommand::Increase(id.into()))
    }

    pub fn decrease_quantity(&self, id: impl Into<ProductId>) -> Result<(), ViewError> {
        self.dispatch(CartCommand::Decrease(id.into()))
    }

    pub fn set_quantity(&self, id: impl Into<ProductId>, quantity: i64) -> Result<(), ViewError> {
        self.dispatch(CartCommand::SetQuantity {
            id: id.into(),
            quantity,
        })
    }

    pub fn clear(&self) -> Result<(), ViewError> {
        self.dispatch(CartCommand::Clear)
    }

    /// Re-read the persisted cart and repaint.
    pub fn refresh(&self) -> Result<(), ViewError> {
        self.dispatch(CartCommand::Refresh)
    }

    /// Reflect the item count into the header badges.
    pub fn refresh_badge(&self) {
        badge::refresh_badge(&self.document, self.total_item_count(), self.config.badge_cap);
    }

    /// Paint the cart page; `false` when this page has none.
    pub fn render_cart_page(&self) -> bool {
        let cart = self.cart.borrow();
        match page::render_cart_page(&self.document, &cart, &self.rules, &self.config.labels) {
            Ok(rendered) => rendered,
            Err(e) => {
                self.logger
                    .error_builder("cart totals could not be computed")
                    .error(&e)
                    .emit();
                true
            }
        }
    }

    /// Show a toast.
    pub fn notify(&self, message: &str, kind: NotificationKind) -> bool {
        self.notifier.notify(message, kind)
    }

    /// Install the delegated click and change listeners on the document.
    ///
    /// Handles add-to-cart controls, cart-row actions, add-on checkboxes and
    /// toast dismissal. Installing twice on the same document is a no-op;
    /// returns `true` if listeners were installed.
    pub fn bind_add_to_cart_controls(self: &Rc<Self>) -> bool {
        if self.document.root_attribute(BOUND_ATTRIBUTE).is_some() {
            self.logger.debug("controls already bound");
            return false;
        }
        self.document.set_root_attribute(BOUND_ATTRIBUTE, "true");

        let view = Rc::downgrade(self);
        self.document.add_listener(
            EventKind::Click,
            Box::new(move |target| match view.upgrade() {
                Some(view) => view.handle_click(target),
                None => Propagation::Continue,
            }),
        );

        let view = Rc::downgrade(self);
        self.document.add_listener(
            EventKind::Change,
            Box::new(move |target| match view.upgrade() {
                Some(view) => view.handle_change(target),
                None => Propagation::Continue,
            }),
        );

        let controls = self
            .document
            .query_selector_all(&format!(".{}", ADD_TO_CART_CLASS))
            .len();
        self.logger
            .debug_builder("controls bound")
            .field_i64("add_to_cart_controls", controls as i64)
            .emit();
        true
    }

    fn handle_click(&self, target: &D::Element) -> Propagation {
        let doc = &self.document;

        if let Some(control) = doc.closest(target, &format!(".{}", ADD_TO_CART_CLASS)) {
            let attributes = controls::product_attributes(doc, &control);
            match attributes.into_item(self.store.currency()) {
                Ok(item) => {
                    if self.add_to_cart(item).is_ok() {
                        controls::show_added_feedback(
                            doc,
                            &self.timers,
                            &control,
                            &self.config.labels.added,
                            self.config.feedback_revert_ms,
                        );
                    }
                }
                Err(e) => {
                    self.logger
                        .warn_builder("add-to-cart control ignored")
                        .error(&e)
                        .emit();
                    self.notify(&self.config.labels.add_failed, NotificationKind::Error);
                }
            }
            return Propagation::Stop;
        }

        if let Some(row) = doc.closest(target, &format!("[{}]", ACTION_ATTRIBUTE)) {
            let action = doc.attribute(&row, ACTION_ATTRIBUTE).unwrap_or_default();
            let id = doc.attribute(&row, "data-id");
            match CartCommand::from_action(&action, id.as_deref()) {
                Some(command) => {
                    // Failures are logged by dispatch.
                    let _ = self.dispatch(command);
                }
                None => self
                    .logger
                    .warn_builder("unknown cart action")
                    .field("action", action)
                    .emit(),
            }
            return Propagation::Stop;
        }

        if let Some(toast) = doc.closest(target, &format!(".{}", NOTIFICATION_CLASS)) {
            self.notifier.dismiss(&toast);
        }
        Propagation::Continue
    }

    fn handle_change(&self, target: &D::Element) -> Propagation {
        let is_add_on = self
            .document
            .attribute(target, "id")
            .map(|id| self.rules.add_on(&id).is_some())
            .unwrap_or(false);
        if is_add_on && self.phase.get().is_ready() {
            self.render_cart_page();
        }
        Propagation::Continue
    }

    fn apply_add(&self, current: Cart, item: NewLineItem) -> Cart {
        let before = current.total_item_count();
        let next = self.store.add_item(current, item);
        if next.total_item_count() > before {
            self.notify(&self.config.labels.added_to_cart, NotificationKind::Success);
        } else {
            self.notify(&self.config.labels.add_failed, NotificationKind::Error);
        }
        next
    }

    fn step_quantity(&self, current: Cart, id: &ProductId, step: i64) -> Cart {
        match current.get_item(id).map(|item| item.quantity) {
            Some(quantity) => self
                .store
                .set_quantity(current, id, quantity.saturating_add(step)),
            None => current,
        }
    }

    fn repaint(&self) {
        self.refresh_badge();
        self.render_cart_page();
    }

    fn checked_transition(&self, next: ViewPhase) -> Result<ViewPhase, ViewError> {
        self.phase.get().transition(next).map_err(|e| {
            self.logger.warn_builder("rejected view transition").error(&e).emit();
            e
        })
    }
}
