//! # Page Events
//!
//! The discrete things a customer can do to a container, as the page
//! reports them.
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────┐
//! │ UiEvent                      │ engine call                          │
//! ├──────────────────────────────┼──────────────────────────────────────┤
//! │ QuantityInput { raw }        │ set_raw_quantity(id, raw)  (clamps)  │
//! │ IncreaseClicked              │ increment(id)              (refuses) │
//! │ DecreaseClicked              │ decrement(id)                        │
//! │ KeyPressed { ArrowUp }       │ increment(id)                        │
//! │ KeyPressed { ArrowDown }     │ decrement(id)                        │
//! │ ClearSelection               │ clear()                              │
//! │ SubmitAttempted              │ (read only: is_valid)                │
//! └──────────────────────────────┴──────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::view::{Notice, SelectionView};

/// Arrow keys handled inside a quantity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Key {
    ArrowUp,
    ArrowDown,
}

/// One customer action on a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// The text of a quantity field changed.
    #[serde(rename_all = "camelCase")]
    QuantityInput { item_id: String, raw: String },

    #[serde(rename_all = "camelCase")]
    IncreaseClicked { item_id: String },

    #[serde(rename_all = "camelCase")]
    DecreaseClicked { item_id: String },

    #[serde(rename_all = "camelCase")]
    KeyPressed { item_id: String, key: Key },

    ClearSelection,

    /// The add-to-cart button was pressed.
    SubmitAttempted,
}

impl UiEvent {
    /// The item this event targets, if any.
    pub fn item_id(&self) -> Option<&str> {
        match self {
            UiEvent::QuantityInput { item_id, .. }
            | UiEvent::IncreaseClicked { item_id }
            | UiEvent::DecreaseClicked { item_id }
            | UiEvent::KeyPressed { item_id, .. } => Some(item_id),
            UiEvent::ClearSelection | UiEvent::SubmitAttempted => None,
        }
    }
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EventOutcome {
    pub view: SelectionView,

    /// Present only when the customer ran into the container cap.
    pub notice: Option<Notice>,

    /// Set only for `SubmitAttempted`.
    pub submit_allowed: Option<bool>,
}
