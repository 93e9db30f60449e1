//! # mnm-core: Pure Selection Logic for Mix & Match Containers
//!
//! A Mix & Match container is a single purchasable product whose price and
//! validity depend on a customer-selected basket of child items. This crate
//! owns that basket: it clamps quantities against the container-wide and
//! per-item caps, derives totals and price under one of three pricing modes,
//! and reports whether checkout may proceed.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mix & Match Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Product Page (browser)                       │   │
//! │  │    quantity inputs ──► +/- buttons ──► add-to-cart button       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ UI events                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    mnm-storefront                               │   │
//! │  │    config loading, event translation, view model, notices       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mnm-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  engine   │  │ validation│  │   │
//! │  │   │  Config   │  │   Money   │  │ Selection │  │  rules    │  │   │
//! │  │   │ ChildItem │  │  Format   │  │  Engine   │  │  status   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DOM • NO GLOBAL STATE                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Container configuration, child items, pricing mode
//! - [`catalog`] - The read-only set of selectable child items
//! - [`engine`] - The selection state machine
//! - [`snapshot`] - Read-only copies of engine state for rendering
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`format`] - Price display formatting
//! - [`validation`] - Validity and message classification rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use mnm_core::{ChildCatalog, ChildItem, ContainerConfig, Money, PricingMode, SelectionEngine};
//!
//! let config = ContainerConfig::new(3, 5, PricingMode::PerItem);
//! let catalog = ChildCatalog::new(vec![
//!     ChildItem::new("A", Money::from_cents(200)),
//!     ChildItem::new("B", Money::from_cents(350)),
//! ]);
//! let mut engine = SelectionEngine::new(config, catalog);
//!
//! engine.set_quantity("A", 2).unwrap();
//! engine.set_quantity("B", 2).unwrap();
//! assert_eq!(engine.total_items(), 4);
//! assert_eq!(engine.total_price().cents(), 1100);
//! assert!(engine.is_valid());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod engine;
pub mod error;
pub mod format;
pub mod money;
pub mod snapshot;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::ChildCatalog;
pub use engine::{QuantityChange, SelectionEngine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use format::{CurrencyFormat, CurrencyPosition, PriceFormatter};
pub use money::Money;
pub use snapshot::{PriceBreakdown, SelectionLine, SelectionSnapshot};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minor-unit count of the default currency (cents).
pub const DEFAULT_CURRENCY_DECIMALS: u8 = 2;

/// Largest minor-unit count accepted for a currency.
///
/// Keeps `10^decimals` comfortably inside `i64`.
pub const MAX_CURRENCY_DECIMALS: u8 = 6;
