//! # Selection Snapshot
//!
//! Read-only copy of the engine state, produced after every mutating call
//! for the presentation layer. Serializable so it can cross into a page
//! script unchanged.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{ItemId, PricingMode, SelectionStatus};

/// One catalog item as it currently stands in the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectionLine {
    pub item_id: ItemId,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
    pub selected: bool,
    /// False when either the container or this item's own cap is reached.
    pub can_increase: bool,
}

/// The price fields that matter for the pricing mode.
///
/// ```text
/// Fixed     → total
/// PerItem   → addons, total
/// BaseAddon → base, addons, total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base: Option<Money>,
    pub addons: Option<Money>,
    pub total: Money,
}

impl PriceBreakdown {
    pub fn for_mode(mode: PricingMode, base_price: Money, addons: Money, total: Money) -> Self {
        match mode {
            PricingMode::Fixed => PriceBreakdown {
                base: None,
                addons: None,
                total,
            },
            PricingMode::PerItem => PriceBreakdown {
                base: None,
                addons: Some(addons),
                total,
            },
            PricingMode::BaseAddon => PriceBreakdown {
                base: Some(base_price),
                addons: Some(addons),
                total,
            },
        }
    }
}

/// Everything a page needs to redraw a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSnapshot {
    pub pricing_mode: PricingMode,
    pub min_quantity: u32,
    pub max_quantity: u32,
    /// Every catalog item, in display order, selected or not.
    pub lines: Vec<SelectionLine>,
    pub total_items: u32,
    pub addons_total: Money,
    pub total_price: Money,
    pub breakdown: PriceBreakdown,
    pub is_valid: bool,
    pub status: SelectionStatus,
    pub can_add_more: bool,
    pub max_reached: bool,
    /// Items left before the container-wide cap; `None` when unlimited.
    pub remaining: Option<u32>,
    /// 0–100 fill level against the container-wide cap; `None` when unlimited.
    pub progress_percent: Option<u8>,
}

impl SelectionSnapshot {
    /// Quantity of one item, 0 if it is not selected or unknown.
    pub fn quantity(&self, item_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.item_id == item_id)
            .map_or(0, |line| line.quantity)
    }

    /// Only the selected lines.
    pub fn selected_lines(&self) -> impl Iterator<Item = &SelectionLine> {
        self.lines.iter().filter(|line| line.selected)
    }
}
