//! # Storefront Configuration
//!
//! Container, currency, message and notice settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Hierarchy                              │
//! │                                                                         │
//! │  1. Defaults (compiled in)                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  2. Config File (~/.config/mix-and-match/storefront.toml)               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  3. Environment Variables (MNM_MAX_QTY, MNM_PRICING_MODE, etc.)         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  4. validate() ──► ContainerSettings::to_container_config()             │
//! │                    (defaults resolved ONCE, engine never re-derives)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Page parameters arrive loosely typed (numbers as strings, empty strings
//! for unset prices). The deserializers here accept both shapes so that the
//! blob is validated in one place.

use std::path::PathBuf;
use std::str::FromStr;

use mnm_core::validation::{parse_quantity, validate_price_cents};
use mnm_core::{
    ContainerConfig, CurrencyFormat, CurrencyPosition, Money, PricingMode,
    DEFAULT_CURRENCY_DECIMALS, MAX_CURRENCY_DECIMALS,
};
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{ids_from_numbers_or_strings, ChildSelection};
use crate::error::{StorefrontError, StorefrontResult};

// =============================================================================
// Container Settings
// =============================================================================

/// Stored container configuration, as an admin or page supplies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSettings {
    /// 0 = no minimum.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub min_qty: u32,

    /// 0 = unlimited.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub max_qty: u32,

    /// `fixed`, `per_item` or `base_addon`. Empty means `per_item`.
    #[serde(default = "default_pricing_mode")]
    pub pricing_mode: String,

    #[serde(default, deserialize_with = "lenient_price")]
    pub fixed_price: Decimal,

    #[serde(default, deserialize_with = "lenient_price")]
    pub base_price: Decimal,

    #[serde(default)]
    pub child_source: ChildSource,

    /// Product ids offered when `child_source = "products"`.
    #[serde(default, deserialize_with = "ids_from_numbers_or_strings")]
    pub child_products: Vec<String>,

    /// Category ids offered when `child_source = "categories"`.
    #[serde(default, deserialize_with = "ids_from_numbers_or_strings")]
    pub child_categories: Vec<String>,
}

fn default_pricing_mode() -> String {
    PricingMode::default().as_str().to_string()
}

/// Where a container's children come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildSource {
    /// Whatever records the host supplies.
    #[default]
    All,

    /// The ids listed in `child_products`.
    Products,

    /// Products in the categories listed in `child_categories`.
    Categories,
}

impl Default for ContainerSettings {
    fn default() -> Self {
        ContainerSettings {
            min_qty: 0,
            max_qty: 0,
            pricing_mode: default_pricing_mode(),
            fixed_price: Decimal::ZERO,
            base_price: Decimal::ZERO,
            child_source: ChildSource::default(),
            child_products: Vec::new(),
            child_categories: Vec::new(),
        }
    }
}

impl ContainerSettings {
    /// Reads the page-level parameter blob.
    ///
    /// Unrelated keys (product id, i18n) are ignored; the currency keys
    /// are read by [`CurrencySettings::with_params_json`].
    ///
    /// ## Example
    /// ```rust
    /// use mnm_storefront::config::ContainerSettings;
    ///
    /// let settings = ContainerSettings::from_params_json(
    ///     r#"{"product_id": 12, "min_qty": "3", "max_qty": 5, "pricing_mode": "base_addon", "base_price": "5.00"}"#,
    /// ).unwrap();
    /// assert_eq!(settings.min_qty, 3);
    /// assert_eq!(settings.max_qty, 5);
    /// ```
    pub fn from_params_json(json: &str) -> StorefrontResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves the settings into an engine config.
    ///
    /// ## Rules
    /// - Empty pricing mode → `per_item`; unknown mode → error
    /// - Prices are rounded to `decimals` places; negative → error
    /// - `fixed` with a price of 0 or less → `per_item`
    /// - `min > max > 0` → `min = max`
    pub fn to_container_config(&self, decimals: u8) -> StorefrontResult<ContainerConfig> {
        let mode = match self.pricing_mode.trim() {
            "" => PricingMode::default(),
            name => PricingMode::from_str(name)?,
        };

        let fixed_price = Money::from_decimal(self.fixed_price, decimals)?;
        let base_price = Money::from_decimal(self.base_price, decimals)?;
        validate_price_cents(fixed_price.cents())?;
        validate_price_cents(base_price.cents())?;

        let mode = if mode == PricingMode::Fixed && !fixed_price.is_positive() {
            warn!("Fixed pricing without a fixed price, falling back to per_item");
            PricingMode::PerItem
        } else {
            mode
        };

        Ok(ContainerConfig::new(self.min_qty, self.max_qty, mode)
            .with_fixed_price(fixed_price)
            .with_base_price(base_price)
            .normalized())
    }

    /// The child products this container offers.
    ///
    /// A `products` or `categories` source with nothing listed is an error.
    pub fn child_selection(&self) -> StorefrontResult<ChildSelection> {
        match self.child_source {
            ChildSource::All => Ok(ChildSelection::All),
            ChildSource::Products if self.child_products.is_empty() => Err(
                StorefrontError::InvalidConfig("select at least one child product".into()),
            ),
            ChildSource::Products => Ok(ChildSelection::Products(self.child_products.clone())),
            ChildSource::Categories if self.child_categories.is_empty() => Err(
                StorefrontError::InvalidConfig("select at least one child category".into()),
            ),
            ChildSource::Categories => {
                Ok(ChildSelection::Categories(self.child_categories.clone()))
            }
        }
    }
}

/// Accepts `3`, `"3"`, `3.0` or `""`; negative values count by magnitude.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawQuantity {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let value = match RawQuantity::deserialize(deserializer)? {
        RawQuantity::Int(n) => n,
        RawQuantity::Float(f) => f as i64,
        RawQuantity::Text(s) => parse_quantity(&s),
    };

    Ok(u32::try_from(value.unsigned_abs()).unwrap_or(u32::MAX))
}

fn lenient_optional_quantity<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_quantity(deserializer).map(Some)
}

/// Accepts `9.99`, `"9.99"` or `""` (zero).
fn lenient_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(Decimal),
        Text(String),
    }

    match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(d) => Ok(d),
        RawPrice::Text(s) if s.trim().is_empty() => Ok(Decimal::ZERO),
        RawPrice::Text(s) => Decimal::from_str(s.trim()).map_err(de::Error::custom),
    }
}

// =============================================================================
// Currency Settings
// =============================================================================

/// Shop currency display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySettings {
    #[serde(default = "default_symbol")]
    pub symbol: String,

    #[serde(default)]
    pub position: CurrencyPosition,

    #[serde(default = "default_decimals")]
    pub decimals: u8,

    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,

    #[serde(default = "default_thousand_separator")]
    pub thousand_separator: String,
}

fn default_symbol() -> String {
    "$".to_string()
}

fn default_decimals() -> u8 {
    DEFAULT_CURRENCY_DECIMALS
}

fn default_decimal_separator() -> String {
    ".".to_string()
}

fn default_thousand_separator() -> String {
    ",".to_string()
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            symbol: default_symbol(),
            position: CurrencyPosition::default(),
            decimals: default_decimals(),
            decimal_separator: default_decimal_separator(),
            thousand_separator: default_thousand_separator(),
        }
    }
}

/// Currency keys of the page parameter blob, all optional.
#[derive(Debug, Deserialize)]
struct CurrencyParams {
    currency_symbol: Option<String>,
    currency_position: Option<CurrencyPosition>,
    #[serde(default, deserialize_with = "lenient_optional_quantity")]
    price_decimals: Option<u32>,
    price_decimal_sep: Option<String>,
    price_thousand_sep: Option<String>,
}

impl CurrencySettings {
    /// These settings with any currency keys from the page parameter blob
    /// laid over them.
    ///
    /// ## Example
    /// ```rust
    /// use mnm_storefront::config::CurrencySettings;
    ///
    /// let currency = CurrencySettings::default()
    ///     .with_params_json(r#"{"currency_symbol": "€", "currency_position": "right_space"}"#)
    ///     .unwrap();
    /// assert_eq!(currency.symbol, "€");
    /// assert_eq!(currency.decimal_separator, ".");
    /// ```
    pub fn with_params_json(&self, json: &str) -> StorefrontResult<Self> {
        let params: CurrencyParams = serde_json::from_str(json)?;
        let mut currency = self.clone();

        if let Some(symbol) = params.currency_symbol {
            currency.symbol = symbol;
        }
        if let Some(position) = params.currency_position {
            currency.position = position;
        }
        if let Some(decimals) = params.price_decimals {
            currency.decimals = u8::try_from(decimals).unwrap_or(u8::MAX);
        }
        if let Some(separator) = params.price_decimal_sep {
            currency.decimal_separator = separator;
        }
        if let Some(separator) = params.price_thousand_sep {
            currency.thousand_separator = separator;
        }

        Ok(currency)
    }

    /// The formatter built from these settings.
    pub fn format(&self) -> CurrencyFormat {
        CurrencyFormat {
            symbol: self.symbol.clone(),
            position: self.position,
            decimals: self.decimals,
            decimal_separator: self.decimal_separator.clone(),
            thousand_separator: self.thousand_separator.clone(),
        }
    }
}

// =============================================================================
// Message Settings
// =============================================================================

/// Customer-facing text. `%d` placeholders are filled left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageSettings {
    pub select_items: String,
    pub need_more_items: String,
    pub empty_with_minimum: String,
    pub selection_complete: String,
    pub max_limit_reached: String,
    pub items_count: String,
    pub items_count_of_max: String,
    pub maximum_reached: String,
    pub base_price: String,
    pub addons_total: String,
    pub container_total: String,
}

impl Default for MessageSettings {
    fn default() -> Self {
        MessageSettings {
            select_items: "Please select items.".to_string(),
            need_more_items:
                "You have selected %d items total, please select %d more item(s) to continue."
                    .to_string(),
            empty_with_minimum:
                "You have selected 0 items, please select %d items total to continue."
                    .to_string(),
            selection_complete: "Selected %d items total. Ready to add to cart.".to_string(),
            max_limit_reached: "Maximum limit reached: You can select up to %d items total. \
                To add more items, please reduce quantities of other products."
                .to_string(),
            items_count: "%d items".to_string(),
            items_count_of_max: "%d/%d items".to_string(),
            maximum_reached: "(Maximum reached)".to_string(),
            base_price: "Base price:".to_string(),
            addons_total: "Add-ons total:".to_string(),
            container_total: "Container total:".to_string(),
        }
    }
}

// =============================================================================
// Notice Settings
// =============================================================================

/// Transient notice behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeSettings {
    /// Seconds before a notice hides itself.
    #[serde(default = "default_dismiss_after")]
    pub dismiss_after_secs: u64,
}

fn default_dismiss_after() -> u64 {
    5
}

/// Longest a notice may stay on screen.
pub const MAX_DISMISS_AFTER_SECS: u64 = 3600;

impl Default for NoticeSettings {
    fn default() -> Self {
        NoticeSettings {
            dismiss_after_secs: default_dismiss_after(),
        }
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
///
/// ## Example TOML
/// ```toml
/// [container]
/// min_qty = 3
/// max_qty = 6
/// pricing_mode = "base_addon"
/// base_price = "5.00"
///
/// [currency]
/// symbol = "€"
/// position = "right_space"
/// decimal_separator = ","
/// thousand_separator = "."
///
/// [notice]
/// dismiss_after_secs = 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub container: ContainerSettings,

    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub messages: MessageSettings,

    #[serde(default)]
    pub notice: NoticeSettings,
}

impl StorefrontConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StorefrontResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StorefrontResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StorefrontError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorefrontError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .map_err(|e| StorefrontError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StorefrontResult<()> {
        if self.currency.decimals > MAX_CURRENCY_DECIMALS {
            return Err(StorefrontError::InvalidConfig(format!(
                "currency decimals must be at most {}, got {}",
                MAX_CURRENCY_DECIMALS, self.currency.decimals
            )));
        }

        if self.notice.dismiss_after_secs > MAX_DISMISS_AFTER_SECS {
            return Err(StorefrontError::InvalidConfig(format!(
                "notice dismiss_after_secs must be at most {}",
                MAX_DISMISS_AFTER_SECS
            )));
        }

        if self.currency.symbol.is_empty() {
            return Err(StorefrontError::InvalidConfig(
                "currency symbol must not be empty".into(),
            ));
        }

        self.container.child_selection()?;
        self.container_config().map(|_| ())
    }

    /// The resolved engine config for the `[container]` section.
    pub fn container_config(&self) -> StorefrontResult<ContainerConfig> {
        self.container.to_container_config(self.currency.decimals)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("MNM_MIN_QTY") {
            match value.trim().parse::<u32>() {
                Ok(n) => {
                    debug!(min_qty = n, "Overriding minimum quantity from environment");
                    self.container.min_qty = n;
                }
                Err(_) => warn!(value = %value, "Invalid minimum quantity in environment"),
            }
        }

        if let Ok(value) = std::env::var("MNM_MAX_QTY") {
            match value.trim().parse::<u32>() {
                Ok(n) => {
                    debug!(max_qty = n, "Overriding maximum quantity from environment");
                    self.container.max_qty = n;
                }
                Err(_) => warn!(value = %value, "Invalid maximum quantity in environment"),
            }
        }

        if let Ok(mode) = std::env::var("MNM_PRICING_MODE") {
            debug!(mode = %mode, "Overriding pricing mode from environment");
            self.container.pricing_mode = mode;
        }

        if let Ok(price) = std::env::var("MNM_FIXED_PRICE") {
            match Decimal::from_str(price.trim()) {
                Ok(d) => self.container.fixed_price = d,
                Err(_) => warn!(price = %price, "Invalid fixed price in environment"),
            }
        }

        if let Ok(price) = std::env::var("MNM_BASE_PRICE") {
            match Decimal::from_str(price.trim()) {
                Ok(d) => self.container.base_price = d,
                Err(_) => warn!(price = %price, "Invalid base price in environment"),
            }
        }

        if let Ok(symbol) = std::env::var("MNM_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Ok(position) = std::env::var("MNM_CURRENCY_POSITION") {
            match position.trim().to_lowercase().as_str() {
                "left" => self.currency.position = CurrencyPosition::Left,
                "right" => self.currency.position = CurrencyPosition::Right,
                "left_space" => self.currency.position = CurrencyPosition::LeftSpace,
                "right_space" => self.currency.position = CurrencyPosition::RightSpace,
                _ => warn!(position = %position, "Unknown currency position in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "mixandmatch", "mix-and-match")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}
