//! Page bootstrap: configuration and view assembly.

use airtech_commerce::cart::PricingRules;
use airtech_commerce::store::CartStore;
use airtech_config::StorefrontConfig;
use airtech_observability::StructuredLogger;
use airtech_storage::Storage;
use airtech_view::{CartView, Document, Timers};

/// Id of the optional inline configuration script.
pub const CONFIG_ELEMENT_ID: &str = "cart-config";

/// Parse the inline configuration, falling back to defaults.
///
/// A missing or blank document is not an error; an unparsable or invalid
/// one is logged and ignored.
pub fn config_from_inline(raw: Option<&str>, logger: &StructuredLogger) -> StorefrontConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return StorefrontConfig::default();
    };

    let parsed = StorefrontConfig::from_json_str(raw).and_then(|config| {
        config.validate()?;
        Ok(config)
    });
    match parsed {
        Ok(config) => config,
        Err(e) => {
            logger
                .warn_builder("inline cart config ignored")
                .field("error", format!("{:#}", e))
                .emit();
            StorefrontConfig::default()
        }
    }
}

/// Build the cart view for a page from its configuration.
pub fn build_view<S, D, T>(
    config: &StorefrontConfig,
    storage: S,
    document: D,
    timers: T,
    page: &str,
) -> CartView<S, D, T>
where
    S: Storage + 'static,
    D: Document,
    T: Timers,
{
    let logger = |component: &str| config.logger(component).with_page(page);
    let bootstrap = logger("cart-web");

    let rules = match config.pricing_rules() {
        Ok(rules) => rules,
        Err(e) => {
            bootstrap
                .warn_builder("pricing config rejected, using defaults")
                .field("error", format!("{:#}", e))
                .emit();
            PricingRules::default()
        }
    };

    let store = CartStore::new(storage)
        .with_key(config.storage.key.clone())
        .with_currency(rules.currency)
        .with_logger(logger("cart-store"));

    CartView::new(store, document, timers)
        .with_rules(rules)
        .with_config(config.view_config())
        .with_logger(logger("cart-view"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use airtech_commerce::Currency;
    use airtech_observability::LogSink;
    use airtech_storage::MemoryStorage;
    use airtech_view::{ManualTimers, MemoryDocument};
    use std::rc::Rc;

    #[test]
    fn test_missing_inline_config_is_default() {
        let logger = StructuredLogger::silent();
        assert_eq!(config_from_inline(None, &logger), StorefrontConfig::default());
        assert_eq!(config_from_inline(Some("  \n"), &logger), StorefrontConfig::default());
    }

    #[test]
    fn test_bad_inline_config_is_logged() {
        let (sink, entries) = LogSink::memory();
        let logger = StructuredLogger::new().with_sink(sink);

        let config = config_from_inline(Some(r#"{"pricing": {"currency": "XYZ"}}"#), &logger);
        assert_eq!(config, StorefrontConfig::default());

        let config = config_from_inline(Some("{oops"), &logger);
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(entries.borrow().len(), 2);
    }

    #[test]
    fn test_view_follows_config() {
        let config = config_from_inline(
            Some(r#"{"storage": {"key": "eu_cart"}, "pricing": {"currency": "EUR"}, "logging": {"level": "error"}}"#),
            &StructuredLogger::silent(),
        );
        let storage = MemoryStorage::new();
        let doc = MemoryDocument::new();
        let view = Rc::new(build_view(
            &config,
            storage.clone(),
            doc,
            ManualTimers::new(),
            "/cart.html",
        ));
        view.init().unwrap();

        assert_eq!(view.store().key(), "eu_cart");
        assert_eq!(view.store().currency(), Currency::EUR);
        assert_eq!(view.rules().currency, Currency::EUR);
        assert_eq!(storage.raw("eu_cart").as_deref(), Some("[]"));
    }
}
