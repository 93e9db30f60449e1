//! # View Model
//!
//! Turns a [`SelectionSnapshot`] into display-ready text and flags, and
//! defines the [`PresentationSink`] a page implements to receive them.
//!
//! ## What the page draws
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Choose 3–6 items                                 size_hint            │
//! │                                                                         │
//! │  Chocolate Truffle     [ - ]  2  [ + ]   $4.00     items[]              │
//! │  Almond Cluster        [ - ]  1  [ + ]   $3.50                          │
//! │                                                                         │
//! │  ████████████░░░░░░░░  3/6 items          progress_percent, items_label│
//! │                                                                         │
//! │  Base price:         $5.00                price_lines                   │
//! │  Add-ons total:      $7.50                                              │
//! │  Container total:   $12.50                                              │
//! │                                                                         │
//! │  Selected 3 items total. Ready to add to cart.   description + tone     │
//! │                                                                         │
//! │  [ Add to cart ]                          add_to_cart_enabled           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, Utc};
use mnm_core::{PriceFormatter, SelectionSnapshot, SelectionStatus, SizeHint};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::{MessageSettings, NoticeSettings, MAX_DISMISS_AFTER_SECS};

// =============================================================================
// Selection View
// =============================================================================

/// How the description under the item list should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Warning,
    Success,
}

/// One labelled price row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceLine {
    pub label: String,
    pub amount: String,
}

/// One child item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub item_id: String,
    pub quantity: u32,
    pub selected: bool,
    pub can_increase: bool,
    pub line_total: String,
}

/// Everything a page needs to redraw one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub size_hint: String,
    pub items: Vec<ItemView>,
    pub items_label: String,
    pub limit_reached: bool,
    pub progress_percent: Option<u8>,
    pub price_lines: Vec<PriceLine>,
    pub total_price: String,
    pub description: String,
    pub tone: Tone,
    pub add_to_cart_enabled: bool,
    pub increase_enabled: bool,
}

impl SelectionView {
    /// Renders a snapshot with the shop's formatter and text.
    pub fn render(
        snapshot: &SelectionSnapshot,
        size_hint: SizeHint,
        formatter: &dyn PriceFormatter,
        messages: &MessageSettings,
    ) -> Self {
        let items = snapshot
            .lines
            .iter()
            .map(|line| ItemView {
                item_id: line.item_id.clone(),
                quantity: line.quantity,
                selected: line.selected,
                can_increase: line.can_increase,
                line_total: formatter.format(line.line_total),
            })
            .collect();

        let (description, tone) = describe(snapshot.status, messages);

        SelectionView {
            size_hint: size_hint.to_string(),
            items,
            items_label: items_label(snapshot, messages),
            limit_reached: snapshot.max_reached,
            progress_percent: snapshot.progress_percent,
            price_lines: price_lines(snapshot, formatter, messages),
            total_price: formatter.format(snapshot.total_price),
            description,
            tone,
            add_to_cart_enabled: snapshot.is_valid,
            increase_enabled: snapshot.can_add_more,
        }
    }
}

/// "3/6 items", "6/6 items (Maximum reached)" or "3 items" when unlimited.
fn items_label(snapshot: &SelectionSnapshot, messages: &MessageSettings) -> String {
    if snapshot.max_quantity == 0 {
        return fill_template(&messages.items_count, &[snapshot.total_items]);
    }

    let label = fill_template(
        &messages.items_count_of_max,
        &[snapshot.total_items, snapshot.max_quantity],
    );

    if snapshot.max_reached {
        format!("{} {}", label, messages.maximum_reached)
    } else {
        label
    }
}

fn price_lines(
    snapshot: &SelectionSnapshot,
    formatter: &dyn PriceFormatter,
    messages: &MessageSettings,
) -> Vec<PriceLine> {
    let breakdown = &snapshot.breakdown;
    let rows = [
        (&messages.base_price, breakdown.base),
        (&messages.addons_total, breakdown.addons),
        (&messages.container_total, Some(breakdown.total)),
    ];

    rows.into_iter()
        .filter_map(|(label, amount)| {
            amount.map(|amount| PriceLine {
                label: label.clone(),
                amount: formatter.format(amount),
            })
        })
        .collect()
}

fn describe(status: SelectionStatus, messages: &MessageSettings) -> (String, Tone) {
    match status {
        SelectionStatus::Empty { minimum: 0, .. } => (messages.select_items.clone(), Tone::Neutral),
        SelectionStatus::Empty { minimum, .. } => (
            fill_template(&messages.empty_with_minimum, &[minimum]),
            Tone::Neutral,
        ),
        SelectionStatus::BelowMinimum {
            selected, needed, ..
        } => (
            fill_template(&messages.need_more_items, &[selected, needed]),
            Tone::Warning,
        ),
        SelectionStatus::Ready { selected } => (
            fill_template(&messages.selection_complete, &[selected]),
            Tone::Success,
        ),
    }
}

/// Replaces each `%d` with the next value, left to right.
///
/// Placeholders beyond the supplied values are left untouched.
///
/// ## Example
/// ```rust
/// use mnm_storefront::view::fill_template;
///
/// assert_eq!(fill_template("%d of %d", &[2, 5]), "2 of 5");
/// assert_eq!(fill_template("%d and %d", &[1]), "1 and %d");
/// ```
pub fn fill_template(template: &str, values: &[u32]) -> String {
    let mut out = String::with_capacity(template.len() + values.len() * 4);
    let mut values = values.iter();
    let mut rest = template;

    while let Some(pos) = rest.find("%d") {
        out.push_str(&rest[..pos]);
        match values.next() {
            Some(value) => out.push_str(&value.to_string()),
            None => out.push_str("%d"),
        }
        rest = &rest[pos + 2..];
    }

    out.push_str(rest);
    out
}

// =============================================================================
// Notices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    MaxLimitReached,
}

/// A transient message that hides itself after `dismiss_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,

    #[ts(type = "string")]
    pub shown_at: DateTime<Utc>,

    #[ts(type = "string")]
    pub dismiss_at: DateTime<Utc>,
}

impl Notice {
    /// The warning for a customer who tried to go past the container cap.
    pub fn max_limit_reached(
        max_quantity: u32,
        messages: &MessageSettings,
        settings: &NoticeSettings,
        now: DateTime<Utc>,
    ) -> Self {
        let secs = settings.dismiss_after_secs.min(MAX_DISMISS_AFTER_SECS);
        let lifetime = Duration::seconds(i64::try_from(secs).unwrap_or(0));

        Notice {
            kind: NoticeKind::MaxLimitReached,
            message: fill_template(&messages.max_limit_reached, &[max_quantity]),
            shown_at: now,
            dismiss_at: now + lifetime,
        }
    }

    /// Whether the notice should still be on screen at `now`.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now < self.dismiss_at
    }
}

// =============================================================================
// Presentation Sink
// =============================================================================

/// What a page (or a test double) implements to receive updates.
pub trait PresentationSink {
    fn render(&mut self, view: &SelectionView);

    fn notify(&mut self, notice: &Notice);
}
