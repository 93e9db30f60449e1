//! # Selection Engine
//!
//! Holds the quantities chosen for one container and keeps every derived
//! field (total items, addons total, total price, validity) consistent
//! with them after each call returns.
//!
//! ## Quantity Change Flow
//! ```text
//! set_quantity(id, requested)
//!        │
//!        ├── id not in catalog ───────────────► Err(UnknownItem), no change
//!        │
//!        ▼
//! requested < 0 → 0
//!        │
//!        ▼
//! container cap   allowed = max - (total - previous)      → max_total_exceeded
//!        │
//!        ▼
//! per-item cap    min(requested, max_per_item)            → per_item_capped
//!        │
//!        ▼
//! 0 → remove entry, else store
//!        │
//!        ▼
//! recompute: total_items → addons_total → total_price → is_valid
//! ```
//!
//! The container cap is measured against the *other* items only, so an
//! item can always be lowered (down to 0) no matter how full the
//! container is.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::catalog::ChildCatalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::snapshot::{PriceBreakdown, SelectionLine, SelectionSnapshot};
use crate::types::{ContainerConfig, ItemId, PricingMode, SelectionStatus, SelectionWarning};
use crate::validation::{describe_selection, is_selection_valid, parse_quantity};

// =============================================================================
// Quantity Change
// =============================================================================

/// What a quantity call actually did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuantityChange {
    pub item_id: ItemId,

    /// Quantity before the call.
    pub previous: u32,

    /// Requested quantity after flooring at 0.
    pub requested: u32,

    /// Quantity stored after the call.
    pub applied: u32,

    /// The container-wide cap reduced the value (or refused an increment).
    pub max_total_exceeded: bool,

    /// The item's own cap reduced the value.
    pub per_item_capped: bool,

    /// An increment was turned away because the container was full.
    pub refused: bool,
}

impl QuantityChange {
    /// True when either cap reduced the requested value.
    pub fn clamped(&self) -> bool {
        self.max_total_exceeded || self.per_item_capped
    }

    /// The signal to surface to the customer, if any.
    ///
    /// Only the container-wide cap warns; a per-item cap clamps silently.
    pub fn warning(&self) -> Option<SelectionWarning> {
        self.max_total_exceeded
            .then_some(SelectionWarning::MaxTotalExceeded)
    }

    /// Whether the stored quantity moved.
    pub fn changed(&self) -> bool {
        self.previous != self.applied
    }
}

// =============================================================================
// Selection Engine
// =============================================================================

/// The selection state machine for one container.
///
/// One instance per container on screen; instances share nothing. Not
/// synchronized: a host that mutates one engine from several threads must
/// wrap it in a lock.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    config: ContainerConfig,
    catalog: ChildCatalog,

    /// Sparse: every stored value is at least 1.
    quantities: HashMap<ItemId, u32>,

    total_items: u32,
    addons_total: Money,
    total_price: Money,
    is_valid: bool,
}

impl SelectionEngine {
    /// Creates an engine with an empty selection.
    ///
    /// An inconsistent config (`min > max > 0`) is repaired, not rejected.
    pub fn new(config: ContainerConfig, catalog: ChildCatalog) -> Self {
        let mut engine = SelectionEngine {
            config: config.normalized(),
            catalog,
            quantities: HashMap::new(),
            total_items: 0,
            addons_total: Money::zero(),
            total_price: Money::zero(),
            is_valid: false,
        };
        engine.recompute();
        engine
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Sets one item's quantity, clamping against both caps.
    ///
    /// ## Example
    /// ```rust
    /// use mnm_core::{ChildCatalog, ChildItem, ContainerConfig, Money, PricingMode, SelectionEngine};
    ///
    /// let catalog = ChildCatalog::new(vec![
    ///     ChildItem::new("A", Money::from_cents(200)),
    ///     ChildItem::new("B", Money::from_cents(350)),
    /// ]);
    /// let mut engine = SelectionEngine::new(ContainerConfig::new(3, 5, PricingMode::PerItem), catalog);
    ///
    /// engine.set_quantity("A", 2).unwrap();
    /// let change = engine.set_quantity("B", 4).unwrap();
    ///
    /// assert_eq!(change.applied, 3);
    /// assert!(change.max_total_exceeded);
    /// assert_eq!(engine.total_items(), 5);
    /// ```
    pub fn set_quantity(&mut self, item_id: &str, requested: i64) -> CoreResult<QuantityChange> {
        let max_per_item = self
            .catalog
            .get(item_id)
            .map(|item| item.max_per_item)
            .ok_or_else(|| CoreError::UnknownItem(item_id.to_string()))?;

        let requested = u32::try_from(requested.max(0)).unwrap_or(u32::MAX);
        let previous = self.quantity(item_id);
        let mut applied = requested;
        let mut max_total_exceeded = false;
        let mut per_item_capped = false;

        let max = self.config.max_quantity;
        let others = self.total_items.saturating_sub(previous);
        if max > 0 {
            let allowed = max.saturating_sub(others);
            if applied > allowed {
                applied = allowed;
                max_total_exceeded = true;
            }
        } else {
            // Unlimited still means the item count must fit in a u32.
            applied = applied.min(u32::MAX - others);
        }

        if max_per_item > 0 && applied > max_per_item {
            applied = max_per_item;
            per_item_capped = true;
        }

        if applied == 0 {
            self.quantities.remove(item_id);
        } else {
            self.quantities.insert(item_id.to_string(), applied);
        }

        self.recompute();

        debug!(
            item_id,
            previous,
            requested,
            applied,
            max_total_exceeded,
            per_item_capped,
            total_items = self.total_items,
            total_price = self.total_price.cents(),
            "Quantity set"
        );

        Ok(QuantityChange {
            item_id: item_id.to_string(),
            previous,
            requested,
            applied,
            max_total_exceeded,
            per_item_capped,
            refused: false,
        })
    }

    /// Adds one of an item, or refuses when the container is already full.
    ///
    /// Unlike typing a number, a full container turns the increment away
    /// outright: nothing changes and the change reports `refused`.
    pub fn increment(&mut self, item_id: &str) -> CoreResult<QuantityChange> {
        if !self.catalog.contains(item_id) {
            return Err(CoreError::UnknownItem(item_id.to_string()));
        }

        let current = self.quantity(item_id);
        let max = self.config.max_quantity;

        if max > 0 && self.total_items >= max {
            debug!(
                item_id,
                current,
                total_items = self.total_items,
                max_quantity = max,
                "Increment refused, container is full"
            );

            return Ok(QuantityChange {
                item_id: item_id.to_string(),
                previous: current,
                requested: current.saturating_add(1),
                applied: current,
                max_total_exceeded: true,
                per_item_capped: false,
                refused: true,
            });
        }

        self.set_quantity(item_id, i64::from(current) + 1)
    }

    /// Removes one of an item. Never refused; stops at 0.
    pub fn decrement(&mut self, item_id: &str) -> CoreResult<QuantityChange> {
        if !self.catalog.contains(item_id) {
            return Err(CoreError::UnknownItem(item_id.to_string()));
        }

        let current = self.quantity(item_id);
        self.set_quantity(item_id, i64::from(current.saturating_sub(1)))
    }

    /// Sets a quantity from the raw text of a quantity field.
    ///
    /// Empty or non-numeric text counts as 0; so does anything negative.
    pub fn set_raw_quantity(&mut self, item_id: &str, raw: &str) -> CoreResult<QuantityChange> {
        self.set_quantity(item_id, parse_quantity(raw))
    }

    /// Drops every selected item.
    pub fn clear(&mut self) {
        let previous_total = self.total_items;
        self.quantities.clear();
        self.recompute();

        debug!(previous_total, "Selection cleared");
    }

    /// Re-derives every field from `quantities`, in dependency order.
    fn recompute(&mut self) {
        self.total_items = self.quantities.values().sum();

        self.addons_total = self
            .quantities
            .iter()
            .filter_map(|(id, &qty)| self.catalog.get(id).map(|item| item.unit_price * qty))
            .sum();

        self.total_price = match self.config.pricing_mode {
            PricingMode::Fixed => self.config.fixed_price,
            PricingMode::PerItem => self.addons_total,
            PricingMode::BaseAddon => self.config.base_price + self.addons_total,
        };

        self.is_valid = is_selection_valid(
            self.total_items,
            self.config.min_quantity,
            self.config.max_quantity,
        );
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Quantity of one item; 0 when unselected or unknown.
    pub fn quantity(&self, item_id: &str) -> u32 {
        self.quantities.get(item_id).copied().unwrap_or(0)
    }

    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    pub fn addons_total(&self) -> Money {
        self.addons_total
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Which descriptive message applies to the current selection.
    pub fn status(&self) -> SelectionStatus {
        describe_selection(self.total_items, self.config.min_quantity)
    }

    /// Whether one more item fits under the container-wide cap.
    pub fn can_add_more(&self) -> bool {
        self.config.max_quantity == 0 || self.total_items < self.config.max_quantity
    }

    /// Items left before the container-wide cap; `None` when unlimited.
    pub fn remaining_capacity(&self) -> Option<u32> {
        (self.config.max_quantity > 0)
            .then(|| self.config.max_quantity.saturating_sub(self.total_items))
    }

    /// Fill level against the container-wide cap, 0 to 100.
    pub fn progress_percent(&self) -> Option<u8> {
        let max = u64::from(self.config.max_quantity);
        if max == 0 {
            return None;
        }

        let percent = (u64::from(self.total_items) * 100 / max).min(100);
        u8::try_from(percent).ok()
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ChildCatalog {
        &self.catalog
    }

    /// Read-only copy of the current state for rendering.
    pub fn snapshot(&self) -> SelectionSnapshot {
        let can_add_more = self.can_add_more();

        let lines = self
            .catalog
            .iter()
            .map(|item| {
                let quantity = self.quantity(&item.id);
                let under_item_cap = item.max_per_item == 0 || quantity < item.max_per_item;

                SelectionLine {
                    item_id: item.id.clone(),
                    quantity,
                    unit_price: item.unit_price,
                    line_total: item.unit_price * quantity,
                    selected: quantity > 0,
                    can_increase: can_add_more && under_item_cap,
                }
            })
            .collect();

        SelectionSnapshot {
            pricing_mode: self.config.pricing_mode,
            min_quantity: self.config.min_quantity,
            max_quantity: self.config.max_quantity,
            lines,
            total_items: self.total_items,
            addons_total: self.addons_total,
            total_price: self.total_price,
            breakdown: PriceBreakdown::for_mode(
                self.config.pricing_mode,
                self.config.base_price,
                self.addons_total,
                self.total_price,
            ),
            is_valid: self.is_valid,
            status: self.status(),
            can_add_more,
            max_reached: !can_add_more,
            remaining: self.remaining_capacity(),
            progress_percent: self.progress_percent(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
