//! End-to-end cart flows over in-memory storage, document and timers.

use std::rc::Rc;

use airtech_commerce::store::{CartStore, DEFAULT_STORAGE_KEY};
use airtech_observability::StructuredLogger;
use airtech_storage::{MemoryStorage, MockStorage, StorageError};
use airtech_view::page::ids;
use airtech_view::{CartView, Document, ManualTimers, MemoryDocument, NodeId, ViewConfig};

struct Storefront {
    storage: MemoryStorage,
    doc: MemoryDocument,
    timers: ManualTimers,
    view: Rc<CartView<MemoryStorage, MemoryDocument, ManualTimers>>,
}

impl Storefront {
    fn open(storage: MemoryStorage, doc: MemoryDocument) -> Self {
        let timers = ManualTimers::new();
        let store = CartStore::new(storage.clone()).with_logger(StructuredLogger::silent());
        let view = Rc::new(
            CartView::new(store, doc.clone(), timers.clone())
                .with_logger(StructuredLogger::silent()),
        );
        view.init().unwrap();
        Self {
            storage,
            doc,
            timers,
            view,
        }
    }

    fn text(&self, id: &str) -> String {
        self.doc
            .element_by_id(id)
            .map(|e| self.doc.content(e))
            .unwrap_or_default()
    }

    fn persisted(&self) -> serde_json::Value {
        let raw = self.storage.raw(DEFAULT_STORAGE_KEY).unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}

fn catalog_page() -> (MemoryDocument, NodeId, NodeId) {
    let doc = MemoryDocument::new();
    doc.append_to_root("span", &[("id", "cart-count"), ("class", "hidden")]);
    doc.append_to_root("span", &[("id", "mobile-cart-count"), ("class", "hidden")]);
    let split = doc.append_to_root(
        "button",
        &[
            ("class", "add-to-cart-btn bg-gradient-to-r from-blue-600 to-purple-600"),
            ("data-id", "split-9"),
            ("data-name", "Сплит-система 9000 BTU"),
            ("data-price", "45990"),
            ("data-image", "/images/split-9.jpg"),
        ],
    );
    let pump = doc.append_to_root(
        "button",
        &[
            ("class", "add-to-cart-btn"),
            ("data-id", "pump-2"),
            ("data-name", "Тепловой насос"),
            ("data-price", "1999.5"),
        ],
    );
    (doc, split, pump)
}

fn cart_page() -> MemoryDocument {
    let doc = MemoryDocument::new();
    doc.append_to_root("span", &[("id", "cart-count")]);
    doc.append_to_root("div", &[("id", ids::CART_ITEMS)]);
    doc.append_to_root("div", &[("id", ids::EMPTY_CART), ("class", "hidden")]);
    for id in [
        ids::TOTAL_ITEMS,
        ids::SUBTOTAL,
        ids::SERVICES_TOTAL,
        ids::DELIVERY_COST,
        ids::TOTAL_PRICE,
    ] {
        doc.append_to_root("span", &[("id", id)]);
    }
    doc.append_to_root("button", &[("id", ids::CHECKOUT_BUTTON)]);
    for add_on in ["installation", "warranty", "delivery"] {
        doc.append_to_root("input", &[("id", add_on), ("type", "checkbox")]);
    }
    doc
}

#[test]
fn test_catalog_to_cart_page() {
    let (doc, split, pump) = catalog_page();
    let shop = Storefront::open(MemoryStorage::new(), doc);

    shop.doc.click(split);
    shop.doc.click(split);
    shop.doc.click(pump);

    assert_eq!(shop.text("cart-count"), "3");
    assert_eq!(shop.text("mobile-cart-count"), "3");
    let toast = shop.doc.query_selector(".cart-notification").unwrap();
    assert!(shop.doc.content(toast).contains("Товар добавлен в корзину"));

    let persisted = shop.persisted();
    assert_eq!(persisted[0]["id"], "split-9");
    assert_eq!(persisted[0]["quantity"], 2);
    assert_eq!(persisted[0]["price"], 45990);
    assert_eq!(persisted[1]["price"], 1999.5);
    assert_eq!(persisted[1]["image"], "");

    // Navigate to the cart page with the same storage.
    let cart = Storefront::open(shop.storage.clone(), cart_page());
    assert_eq!(cart.text(ids::TOTAL_ITEMS), "3 товара");
    assert_eq!(cart.text(ids::SUBTOTAL), "93 980 \u{20bd}");
    assert_eq!(cart.text(ids::DELIVERY_COST), "0 \u{20bd}");
    assert_eq!(cart.text(ids::TOTAL_PRICE), "93 980 \u{20bd}");

    let warranty = cart.doc.element_by_id("warranty").unwrap();
    cart.doc.set_checked(warranty, true);
    assert_eq!(cart.text(ids::SERVICES_TOTAL), "3 000 \u{20bd}");
    assert_eq!(cart.text(ids::TOTAL_PRICE), "96 980 \u{20bd}");
}

#[test]
fn test_feedback_reverts_after_delay() {
    let (doc, split, _) = catalog_page();
    let original = "<i class=\"fas fa-cart-plus\"></i>В корзину";
    doc.set_inner_html(&split, original);
    let shop = Storefront::open(MemoryStorage::new(), doc);

    shop.doc.click(split);
    assert!(shop.doc.content(split).contains("Добавлено"));
    assert!(shop.doc.has_class(&split, "bg-green-500"));

    shop.timers.advance(1000);
    shop.doc.click(split);
    assert!(shop.doc.content(split).contains("Добавлено"));

    shop.timers.advance(1000);
    assert_eq!(shop.doc.content(split), original);
    assert!(shop.doc.has_class(&split, "from-blue-600"));
    assert_eq!(shop.view.total_item_count(), 2);
}

#[test]
fn test_cart_page_shrinks_to_empty() {
    let storage = MemoryStorage::with_entry(
        DEFAULT_STORAGE_KEY,
        r#"[{"id":"B","name":"Fan","price":1000,"image":"/b.jpg","quantity":3}]"#,
    );
    let shop = Storefront::open(storage, cart_page());

    assert_eq!(shop.text(ids::SUBTOTAL), "3 000 \u{20bd}");
    assert_eq!(shop.text(ids::DELIVERY_COST), "2 500 \u{20bd}");
    assert_eq!(shop.text(ids::TOTAL_PRICE), "5 500 \u{20bd}");

    shop.view.set_quantity("B", 0).unwrap();

    assert_eq!(shop.text(ids::TOTAL_ITEMS), "0 товаров");
    assert_eq!(shop.text(ids::TOTAL_PRICE), "0 \u{20bd}");
    let empty = shop.doc.element_by_id(ids::EMPTY_CART).unwrap();
    assert!(!shop.doc.has_class(&empty, "hidden"));
    let checkout = shop.doc.element_by_id(ids::CHECKOUT_BUTTON).unwrap();
    assert!(shop.doc.is_disabled(checkout));
    let badge = shop.doc.element_by_id("cart-count").unwrap();
    assert!(shop.doc.has_class(&badge, "hidden"));
    assert_eq!(shop.persisted(), serde_json::json!([]));
}

#[test]
fn test_corrupt_storage_heals_on_init() {
    let storage = MemoryStorage::with_entry(DEFAULT_STORAGE_KEY, "not json at all");
    let shop = Storefront::open(storage, cart_page());

    assert!(shop.view.cart().is_empty());
    assert_eq!(shop.persisted(), serde_json::json!([]));
}

#[test]
fn test_custom_badge_cap() {
    let doc = MemoryDocument::new();
    let badge = doc.append_to_root("span", &[("id", "cart-count")]);
    let storage = MemoryStorage::with_entry(
        DEFAULT_STORAGE_KEY,
        r#"[{"id":"A","name":"A","price":1,"image":"","quantity":12}]"#,
    );

    let config = ViewConfig {
        badge_cap: 9,
        ..ViewConfig::default()
    };
    let store = CartStore::new(storage).with_logger(StructuredLogger::silent());
    let view = Rc::new(
        CartView::new(store, doc.clone(), ManualTimers::new())
            .with_config(config)
            .with_logger(StructuredLogger::silent()),
    );
    view.init().unwrap();

    assert_eq!(doc.content(badge), "9+");
}

#[test]
fn test_storage_failures_keep_the_page_working() {
    let mut storage = MockStorage::new();
    storage.expect_get_item().returning(|_| Ok(None));
    storage
        .expect_set_item()
        .returning(|key, _| Err(StorageError::QuotaExceeded(key.to_string())));

    let (doc, split, _) = catalog_page();
    let store = CartStore::new(storage).with_logger(StructuredLogger::silent());
    let view = Rc::new(
        CartView::new(store, doc.clone(), ManualTimers::new())
            .with_logger(StructuredLogger::silent()),
    );
    view.init().unwrap();

    doc.click(split);
    doc.click(split);

    assert_eq!(view.total_item_count(), 2);
    let badge = doc.element_by_id("cart-count").unwrap();
    assert_eq!(doc.content(badge), "2");
}
