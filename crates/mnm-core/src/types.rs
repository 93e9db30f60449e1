//! # Domain Types
//!
//! Core domain types of a Mix & Match container.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ContainerConfig │   │   ChildItem     │   │  PricingMode    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  min_quantity   │   │  id             │   │  Fixed          │       │
//! │  │  max_quantity   │   │  unit_price     │   │  PerItem        │       │
//! │  │  pricing_mode   │   │  max_per_item   │   │  BaseAddon      │       │
//! │  │  fixed / base   │   │  purchasable    │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ SelectionStatus │   │ SelectionWarning│   │    SizeHint     │       │
//! │  │  Empty          │   │ MaxTotalExceeded│   │  "Choose 3–6"   │       │
//! │  │  BelowMinimum   │   └─────────────────┘   └─────────────────┘       │
//! │  │  Ready          │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// Opaque identifier of a child item, unique within one catalog.
pub type ItemId = String;

// =============================================================================
// Pricing Mode
// =============================================================================

/// How the container price is derived from the selection.
///
/// ```text
/// Fixed     → fixed_price                  (selection does not matter)
/// PerItem   → Σ unit_price × quantity
/// BaseAddon → base_price + Σ unit_price × quantity
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Flat container price.
    Fixed,
    /// Sum of the selected items' prices.
    #[default]
    PerItem,
    /// Base fee plus the selected items' prices.
    BaseAddon,
}

impl PricingMode {
    /// Stable name used in configuration and page parameters.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PricingMode::Fixed => "fixed",
            PricingMode::PerItem => "per_item",
            PricingMode::BaseAddon => "base_addon",
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(PricingMode::Fixed),
            "per_item" | "per-item" => Ok(PricingMode::PerItem),
            "base_addon" | "base-addon" => Ok(PricingMode::BaseAddon),
            _ => Err(ValidationError::NotAllowed {
                field: "pricing_mode".to_string(),
                allowed: vec![
                    "fixed".to_string(),
                    "per_item".to_string(),
                    "base_addon".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Container Configuration
// =============================================================================

/// Configuration of one container, immutable for an engine's lifetime.
///
/// ## Zero Means "Off"
/// - `min_quantity == 0`: no minimum (but an empty selection is still invalid)
/// - `max_quantity == 0`: unlimited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ContainerConfig {
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub pricing_mode: PricingMode,
    /// Used only when `pricing_mode` is `Fixed`.
    pub fixed_price: Money,
    /// Used only when `pricing_mode` is `BaseAddon`.
    pub base_price: Money,
}

impl ContainerConfig {
    /// Creates a config with zero prices.
    pub fn new(min_quantity: u32, max_quantity: u32, pricing_mode: PricingMode) -> Self {
        ContainerConfig {
            min_quantity,
            max_quantity,
            pricing_mode,
            fixed_price: Money::zero(),
            base_price: Money::zero(),
        }
    }

    /// Sets the flat price used by `PricingMode::Fixed`.
    pub fn with_fixed_price(mut self, price: Money) -> Self {
        self.fixed_price = price;
        self
    }

    /// Sets the base fee used by `PricingMode::BaseAddon`.
    pub fn with_base_price(mut self, price: Money) -> Self {
        self.base_price = price;
        self
    }

    /// Repairs an inconsistent min/max pair instead of rejecting it.
    ///
    /// `min > max > 0` becomes `min = max`, the same repair applied when the
    /// container is saved in the shop admin.
    ///
    /// ## Example
    /// ```rust
    /// use mnm_core::{ContainerConfig, PricingMode};
    ///
    /// let config = ContainerConfig::new(8, 5, PricingMode::PerItem).normalized();
    /// assert_eq!(config.min_quantity, 5);
    ///
    /// // Unlimited maximum never lowers the minimum
    /// let config = ContainerConfig::new(8, 0, PricingMode::PerItem).normalized();
    /// assert_eq!(config.min_quantity, 8);
    /// ```
    pub fn normalized(mut self) -> Self {
        if self.max_quantity > 0 && self.min_quantity > self.max_quantity {
            warn!(
                min = self.min_quantity,
                max = self.max_quantity,
                "Minimum quantity exceeds maximum, clamping minimum"
            );
            self.min_quantity = self.max_quantity;
        }
        self
    }

    /// Describes how many items the customer must choose.
    pub fn size_hint(&self) -> SizeHint {
        match (self.min_quantity, self.max_quantity) {
            (0, 0) => SizeHint::Any,
            (min, 0) => SizeHint::AtLeast(min),
            (0, max) => SizeHint::UpTo(max),
            (min, max) if min == max => SizeHint::Exactly(min),
            (min, max) => SizeHint::Between(min, max),
        }
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        ContainerConfig::new(0, 0, PricingMode::default())
    }
}

// =============================================================================
// Size Hint
// =============================================================================

/// The container size shown above the item list ("Choose 3–6 items").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SizeHint {
    Any,
    Exactly(u32),
    AtLeast(u32),
    UpTo(u32),
    Between(u32, u32),
}

impl fmt::Display for SizeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeHint::Any => write!(f, "Choose items"),
            SizeHint::Exactly(1) => write!(f, "Choose 1 item"),
            SizeHint::Exactly(n) => write!(f, "Choose {} items", n),
            SizeHint::AtLeast(n) => write!(f, "Choose at least {} items", n),
            SizeHint::UpTo(n) => write!(f, "Choose up to {} items", n),
            SizeHint::Between(min, max) => write!(f, "Choose {}–{} items", min, max),
        }
    }
}

// =============================================================================
// Child Item
// =============================================================================

/// One selectable product inside a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChildItem {
    pub id: ItemId,

    /// Display name, if the host supplied one.
    pub name: Option<String>,

    pub unit_price: Money,

    /// The product's own quantity cap. 0 = no per-item cap.
    pub max_per_item: u32,

    pub purchasable: bool,

    pub in_stock: bool,
}

impl ChildItem {
    /// Creates a purchasable, in-stock item without a per-item cap.
    pub fn new(id: impl Into<ItemId>, unit_price: Money) -> Self {
        ChildItem {
            id: id.into(),
            name: None,
            unit_price,
            max_per_item: 0,
            purchasable: true,
            in_stock: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_max_per_item(mut self, max: u32) -> Self {
        self.max_per_item = max;
        self
    }

    pub fn purchasable(mut self, purchasable: bool) -> Self {
        self.purchasable = purchasable;
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Whether this item may appear in a selection at all.
    #[inline]
    pub fn is_selectable(&self) -> bool {
        self.purchasable && self.in_stock
    }
}

// =============================================================================
// Selection Status
// =============================================================================

/// Classification of the current selection for the descriptive message.
///
/// The engine carries the numbers; turning them into text is the
/// presentation layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionStatus {
    /// Nothing selected yet. `needed` is 0 when there is no minimum.
    Empty { minimum: u32, needed: u32 },

    /// Something selected, but fewer than the minimum.
    BelowMinimum {
        selected: u32,
        minimum: u32,
        needed: u32,
    },

    /// Enough selected.
    Ready { selected: u32 },
}

// =============================================================================
// Selection Warning
// =============================================================================

/// Transient signal for the customer, separate from ordinary state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SelectionWarning {
    /// The customer tried to go past the container-wide cap.
    MaxTotalExceeded,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_mode_parsing() {
        assert_eq!("fixed".parse::<PricingMode>().unwrap(), PricingMode::Fixed);
        assert_eq!("per_item".parse::<PricingMode>().unwrap(), PricingMode::PerItem);
        assert_eq!("Per-Item".parse::<PricingMode>().unwrap(), PricingMode::PerItem);
        assert_eq!(
            "base_addon".parse::<PricingMode>().unwrap(),
            PricingMode::BaseAddon
        );
        assert!(matches!(
            "bundle".parse::<PricingMode>(),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_pricing_mode_default_is_per_item() {
        assert_eq!(PricingMode::default(), PricingMode::PerItem);
        assert_eq!(PricingMode::BaseAddon.to_string(), "base_addon");
    }

    #[test]
    fn test_pricing_mode_serde_names() {
        let json = serde_json::to_string(&PricingMode::BaseAddon).unwrap();
        assert_eq!(json, "\"base_addon\"");
    }

    #[test]
    fn test_normalized_keeps_consistent_config() {
        let config = ContainerConfig::new(3, 5, PricingMode::PerItem);
        assert_eq!(config.clone().normalized(), config);
    }

    #[test]
    fn test_size_hint() {
        let hint = |min, max| ContainerConfig::new(min, max, PricingMode::PerItem).size_hint();

        assert_eq!(hint(0, 0), SizeHint::Any);
        assert_eq!(hint(3, 0), SizeHint::AtLeast(3));
        assert_eq!(hint(0, 6), SizeHint::UpTo(6));
        assert_eq!(hint(4, 4), SizeHint::Exactly(4));
        assert_eq!(hint(3, 6), SizeHint::Between(3, 6));
    }

    #[test]
    fn test_size_hint_display() {
        assert_eq!(SizeHint::Any.to_string(), "Choose items");
        assert_eq!(SizeHint::Exactly(1).to_string(), "Choose 1 item");
        assert_eq!(SizeHint::Exactly(4).to_string(), "Choose 4 items");
        assert_eq!(SizeHint::AtLeast(3).to_string(), "Choose at least 3 items");
        assert_eq!(SizeHint::UpTo(6).to_string(), "Choose up to 6 items");
        assert_eq!(SizeHint::Between(3, 6).to_string(), "Choose 3–6 items");
    }

    #[test]
    fn test_child_item_selectable() {
        let item = ChildItem::new("7", Money::from_cents(100));
        assert!(item.is_selectable());
        assert!(!item.clone().purchasable(false).is_selectable());
        assert!(!item.in_stock(false).is_selectable());
    }
}
