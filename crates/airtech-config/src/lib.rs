//! Storefront configuration.
//!
//! Loaded from a `.toml` or `.json` file, or from a JSON document embedded
//! in the page. Every field is optional; omitted values fall back to the
//! storefront's defaults.
//!
//! ```toml
//! [storage]
//! key = "airtech_cart"
//!
//! [pricing]
//! currency = "RUB"
//! delivery_fee = 2500
//! free_delivery_threshold = 50000
//!
//! [[pricing.add_ons]]
//! id = "installation"
//! label = "Монтаж"
//! price = 5000
//!
//! [view]
//! feedback_revert_ms = 2000
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use airtech_commerce::cart::{AddOn, DeliveryPolicy, PricingRules};
use airtech_commerce::store::DEFAULT_STORAGE_KEY;
use airtech_commerce::{Currency, Money};
use airtech_observability::{LogFormat, LogLevel, StructuredLogger};
use airtech_view::ViewConfig;

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Cart persistence.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Add-ons and delivery.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Delays, badge cap and labels.
    #[serde(default)]
    pub view: ViewConfig,

    /// Log level and format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            Self::from_toml_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to a file, as JSON or TOML by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Check values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<()> {
        if self.storage.key.trim().is_empty() {
            bail!("storage.key must not be empty");
        }
        self.pricing_rules()?;
        if self.view.badge_cap < 1 {
            bail!("view.badge_cap must be at least 1, got {}", self.view.badge_cap);
        }
        Ok(())
    }

    /// Cart currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.pricing.currency)
            .with_context(|| format!("Unknown currency: {}", self.pricing.currency))
    }

    /// Pricing rules for the cart page.
    pub fn pricing_rules(&self) -> Result<PricingRules> {
        let currency = self.currency()?;
        let money = |field: &str, amount: f64| -> Result<Money> {
            if !amount.is_finite() || amount < 0.0 {
                bail!("pricing.{} must be a non-negative number, got {}", field, amount);
            }
            Ok(Money::from_decimal(amount, currency))
        };

        let mut add_ons = Vec::with_capacity(self.pricing.add_ons.len());
        for add_on in &self.pricing.add_ons {
            if add_ons.iter().any(|a: &AddOn| a.id == add_on.id) {
                bail!("Duplicate add-on id: {}", add_on.id);
            }
            let price = money(&format!("add_ons.{}.price", add_on.id), add_on.price)?;
            add_ons.push(AddOn::new(add_on.id.clone(), add_on.label.clone(), price));
        }

        Ok(PricingRules {
            currency,
            add_ons,
            delivery: DeliveryPolicy {
                fee: money("delivery_fee", self.pricing.delivery_fee)?,
                free_threshold: money(
                    "free_delivery_threshold",
                    self.pricing.free_delivery_threshold,
                )?,
            },
        })
    }

    /// View settings.
    pub fn view_config(&self) -> ViewConfig {
        self.view.clone()
    }

    /// Logger for `component` with the configured level and format.
    pub fn logger(&self, component: &str) -> StructuredLogger {
        StructuredLogger::new()
            .with_component(component)
            .with_min_level(self.logging.level)
            .with_format(self.logging.format)
    }
}

/// Cart persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage key holding the cart.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
        }
    }
}

/// Pricing settings, amounts in major currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Delivery fee below the threshold.
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: f64,

    /// Subtotal from which delivery is free.
    #[serde(default = "default_free_delivery_threshold")]
    pub free_delivery_threshold: f64,

    /// Selectable add-on services.
    #[serde(default = "default_add_ons")]
    pub add_ons: Vec<AddOnConfig>,
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

fn default_delivery_fee() -> f64 {
    2500.0
}

fn default_free_delivery_threshold() -> f64 {
    50000.0
}

fn default_add_ons() -> Vec<AddOnConfig> {
    PricingRules::default()
        .add_ons
        .into_iter()
        .map(|a| AddOnConfig {
            id: a.id,
            label: a.label,
            price: a.price.to_decimal(),
        })
        .collect()
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            delivery_fee: default_delivery_fee(),
            free_delivery_threshold: default_free_delivery_threshold(),
            add_ons: default_add_ons(),
        }
    }
}

/// One add-on service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnConfig {
    /// Id, also the id of its checkbox.
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Flat fee.
    pub price: f64,
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_built_in_rules() {
        let config = StorefrontConfig::default();
        assert_eq!(config.storage.key, "airtech_cart");
        assert_eq!(config.pricing_rules().unwrap(), PricingRules::default());
        assert_eq!(config.view_config(), ViewConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_documents_use_defaults() {
        assert_eq!(
            StorefrontConfig::from_toml_str("").unwrap(),
            StorefrontConfig::default()
        );
        assert_eq!(
            StorefrontConfig::from_json_str("{}").unwrap(),
            StorefrontConfig::default()
        );
    }

    #[test]
    fn test_toml_overrides() {
        let config = StorefrontConfig::from_toml_str(
            r#"
            [storage]
            key = "demo_cart"

            [pricing]
            currency = "EUR"
            delivery_fee = 9.5
            free_delivery_threshold = 100

            [[pricing.add_ons]]
            id = "gift-wrap"
            label = "Gift wrap"
            price = 3

            [view]
            badge_cap = 9

            [view.labels]
            added = "Added"

            [logging]
            level = "debug"
            format = "human"
            "#,
        )
        .unwrap();

        let rules = config.pricing_rules().unwrap();
        assert_eq!(rules.currency, Currency::EUR);
        assert_eq!(rules.add_ons.len(), 1);
        assert_eq!(rules.add_ons[0].price, Money::from_major(3, Currency::EUR));
        assert_eq!(rules.delivery.fee, Money::new(950, Currency::EUR));
        assert_eq!(config.storage.key, "demo_cart");
        assert_eq!(config.view.badge_cap, 9);
        assert_eq!(config.view.labels.added, "Added");
        assert_eq!(config.view.labels.remove, "Удалить");
        assert_eq!(config.view.feedback_revert_ms, 2000);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_json_inline_config() {
        let config = StorefrontConfig::from_json_str(
            r#"{"pricing": {"free_delivery_threshold": 30000}, "view": {"toast_hide_delay_ms": 3000}}"#,
        )
        .unwrap();

        let rules = config.pricing_rules().unwrap();
        assert_eq!(rules.delivery.free_threshold, Money::from_major(30000, Currency::RUB));
        assert_eq!(rules.add_ons.len(), 3);
        assert_eq!(config.view.toast_hide_delay_ms, 3000);
    }

    #[test]
    fn test_invalid_values() {
        let unknown_currency =
            StorefrontConfig::from_toml_str("[pricing]\ncurrency = \"XYZ\"").unwrap();
        assert!(unknown_currency.validate().is_err());

        let negative_fee = StorefrontConfig::from_toml_str("[pricing]\ndelivery_fee = -1").unwrap();
        assert!(negative_fee.pricing_rules().is_err());

        let duplicate = StorefrontConfig::from_toml_str(
            "[[pricing.add_ons]]\nid = \"a\"\nprice = 1\n[[pricing.add_ons]]\nid = \"a\"\nprice = 2",
        )
        .unwrap();
        let err = duplicate.pricing_rules().unwrap_err();
        assert!(err.to_string().contains("Duplicate add-on id"));

        let empty_key = StorefrontConfig::from_toml_str("[storage]\nkey = \" \"").unwrap();
        assert!(empty_key.validate().is_err());

        assert!(StorefrontConfig::from_toml_str("[view]\nbadge_cap = \"many\"").is_err());
    }

    #[test]
    fn test_load_and_save_round_trip() {
        let dir = std::env::temp_dir().join(format!("airtech-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        for name in ["storefront.toml", "storefront.json"] {
            let path = dir.join(name);
            let mut config = StorefrontConfig::default();
            config.storage.key = format!("cart_{}", name);
            config.save(&path).unwrap();

            let loaded = StorefrontConfig::load(&path).unwrap();
            assert_eq!(loaded, config);
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = StorefrontConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_logger_settings() {
        let config = StorefrontConfig::from_toml_str("[logging]\nlevel = \"warn\"").unwrap();
        let logger = config.logger("cart-view");
        assert!(!logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Error));
    }
}
