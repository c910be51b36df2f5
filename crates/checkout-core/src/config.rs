//! # Promotion Configuration
//!
//! Which product codes carry which promotional rule, and when the selector
//! switches each rule on.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CHECKOUT_BULK_CODE=ipd                                             │
//! │     CHECKOUT_FREE_GROUP_SIZE=4                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/promo-checkout/promotions.toml (Linux)                   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ipd @ 499.99 from 4 units, atv buy-4-pay-3 from 3 units            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # promotions.toml
//! [bulk_discount]
//! code = "ipd"
//! unit_price_cents = 49999
//! min_quantity = 4
//!
//! [buy_n_get_one_free]
//! code = "atv"
//! group_size = 4      # every 4th unit is free
//! min_quantity = 3
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::strategy::{
    BulkDiscountPricing, BuyNGetOneFreePricing, CombinePricing, DesignatedRule,
};

// =============================================================================
// Bulk Discount Rule
// =============================================================================

/// Flat discounted unit price for one product code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDiscountRule {
    /// Designated product code. Surrounding whitespace is trimmed.
    #[serde(default = "default_bulk_code", deserialize_with = "deserialize_code")]
    pub code: String,

    /// Unit price charged for every unit once the rule applies.
    #[serde(default = "default_bulk_unit_price")]
    pub unit_price_cents: i64,

    /// Selector threshold: total units of `code` needed to apply the rule.
    #[serde(default = "default_bulk_min_quantity")]
    pub min_quantity: i64,
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(|code| code.trim().to_string())
}

fn default_bulk_code() -> String {
    "ipd".to_string()
}

fn default_bulk_unit_price() -> i64 {
    49999
}

fn default_bulk_min_quantity() -> i64 {
    4
}

impl Default for BulkDiscountRule {
    fn default() -> Self {
        BulkDiscountRule {
            code: default_bulk_code(),
            unit_price_cents: default_bulk_unit_price(),
            min_quantity: default_bulk_min_quantity(),
        }
    }
}

impl BulkDiscountRule {
    /// Discounted unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Buy-N-Get-One-Free Rule
// =============================================================================

/// Every `group_size`-th unit of one product code is free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyNGetOneFreeRule {
    /// Designated product code. Surrounding whitespace is trimmed.
    #[serde(default = "default_free_code", deserialize_with = "deserialize_code")]
    pub code: String,

    /// N: one unit in every N is free. Zero is rejected when parsing.
    #[serde(default = "default_group_size")]
    pub group_size: NonZeroU32,

    /// Selector threshold: total units of `code` needed to apply the rule.
    #[serde(default = "default_free_min_quantity")]
    pub min_quantity: i64,
}

fn default_free_code() -> String {
    "atv".to_string()
}

const DEFAULT_GROUP_SIZE: NonZeroU32 = match NonZeroU32::new(4) {
    Some(n) => n,
    None => NonZeroU32::MIN,
};

fn default_group_size() -> NonZeroU32 {
    DEFAULT_GROUP_SIZE
}

fn default_free_min_quantity() -> i64 {
    3
}

impl Default for BuyNGetOneFreeRule {
    fn default() -> Self {
        BuyNGetOneFreeRule {
            code: default_free_code(),
            group_size: default_group_size(),
            min_quantity: default_free_min_quantity(),
        }
    }
}

// =============================================================================
// Main Promotion Configuration
// =============================================================================

/// Complete promotion configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionConfig {
    #[serde(default)]
    pub bulk_discount: BulkDiscountRule,

    #[serde(default)]
    pub buy_n_get_one_free: BuyNGetOneFreeRule,
}

impl PromotionConfig {
    /// The reference promotions (same as `Default`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (promotions.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CoreResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`PromotionConfig::load`], reading overrides through `lookup`
    /// instead of the process environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading promotion config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load promotion config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> CoreResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to a TOML document.
    pub fn to_toml_string(&self) -> CoreResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = self.to_toml_string()?;
        std::fs::write(&path, contents).map_err(|e| CoreError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Promotion config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CoreResult<()> {
        let bulk = &self.bulk_discount;
        let free = &self.buy_n_get_one_free;

        if bulk.code.trim().is_empty() || free.code.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "promotion codes must not be empty".into(),
            ));
        }

        if bulk.code.trim() != bulk.code || free.code.trim() != free.code {
            return Err(CoreError::InvalidConfig(
                "promotion codes must not carry surrounding whitespace".into(),
            ));
        }

        if bulk.code == free.code {
            return Err(CoreError::InvalidConfig(format!(
                "code '{}' cannot carry both promotions",
                bulk.code
            )));
        }

        if bulk.unit_price_cents < 0 {
            return Err(CoreError::InvalidConfig(
                "bulk unit_price_cents must be non-negative".into(),
            ));
        }

        if bulk.min_quantity < 0 || free.min_quantity < 0 {
            return Err(CoreError::InvalidConfig(
                "min_quantity must be non-negative".into(),
            ));
        }

        Ok(())
    }

    /// Applies `CHECKOUT_*` overrides read through `lookup`.
    ///
    /// Codes are trimmed. Unparseable numbers are logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(code) = lookup("CHECKOUT_BULK_CODE") {
            let code = code.trim();
            debug!(code, "Overriding bulk discount code from environment");
            self.bulk_discount.code = code.to_string();
        }

        let bulk = &mut self.bulk_discount;
        override_number(&lookup, "CHECKOUT_BULK_UNIT_PRICE_CENTS", &mut bulk.unit_price_cents);
        override_number(&lookup, "CHECKOUT_BULK_MIN_QUANTITY", &mut bulk.min_quantity);

        if let Some(code) = lookup("CHECKOUT_FREE_CODE") {
            let code = code.trim();
            debug!(code, "Overriding buy-n-get-one-free code from environment");
            self.buy_n_get_one_free.code = code.to_string();
        }

        let free = &mut self.buy_n_get_one_free;
        override_number(&lookup, "CHECKOUT_FREE_GROUP_SIZE", &mut free.group_size);
        override_number(&lookup, "CHECKOUT_FREE_MIN_QUANTITY", &mut free.min_quantity);
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "promo", "promo-checkout")
            .map(|dirs| dirs.config_dir().join("promotions.toml"))
    }

    // =========================================================================
    // Strategy Builders
    // =========================================================================

    /// Bulk-discount strategy for the configured code and price.
    pub fn bulk_discount_strategy(&self) -> BulkDiscountPricing {
        BulkDiscountPricing::new(&self.bulk_discount.code, self.bulk_discount.unit_price())
    }

    /// Buy-N-get-one-free strategy for the configured code and N.
    pub fn buy_n_get_one_free_strategy(&self) -> BuyNGetOneFreePricing {
        let rule = &self.buy_n_get_one_free;
        BuyNGetOneFreePricing::new(&rule.code, rule.group_size)
    }

    /// Combine strategy carrying both configured rules.
    pub fn combine_strategy(&self) -> CombinePricing {
        CombinePricing::new([
            DesignatedRule::BulkDiscount(self.bulk_discount_strategy()),
            DesignatedRule::BuyNGetOneFree(self.buy_n_get_one_free_strategy()),
        ])
    }
}

fn override_number<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse::<T>() {
            Ok(value) => {
                debug!(key, value = %value, "Overriding promotion setting from environment");
                *target = value;
            }
            Err(_) => warn!(key, value = %raw, "Ignoring invalid promotion setting"),
        }
    }
}
