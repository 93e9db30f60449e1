//! # mnm-storefront: Page Adapter for Mix & Match Containers
//!
//! The thin layer that sits between a product page and
//! [`mnm_core::SelectionEngine`]. It owns no business rules: it loads
//! configuration, translates page events into engine calls, and renders
//! the resulting state into display text.
//!
//! ## Module Organization
//! ```text
//! mnm_storefront/
//! ├── lib.rs          ◄─── You are here (re-exports, tracing setup)
//! ├── config.rs       ◄─── TOML + env + page parameter configuration
//! ├── catalog.rs      ◄─── Child product records → ChildCatalog
//! ├── event.rs        ◄─── Page events and their outcome
//! ├── view.rs         ◄─── View model, notices, PresentationSink
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── One container: engine + display settings
//! │   └── registry.rs ◄─── Independent sessions keyed by SessionId
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── selection.rs◄─── open / handle / dispatch / close
//! └── error.rs        ◄─── StorefrontError and the page-facing ApiError
//! ```
//!
//! ## Example
//! ```rust
//! use mnm_storefront::{catalog_from_json, ChildSelection, ContainerSession, StorefrontConfig, UiEvent};
//!
//! let mut config = StorefrontConfig::default();
//! config.container.min_qty = 2;
//! config.container.max_qty = 3;
//!
//! let catalog = catalog_from_json(
//!     r#"[{"id": 1, "price": "2.00"}, {"id": 2, "price": "3.50"}]"#,
//!     &ChildSelection::All,
//!     2,
//! ).unwrap();
//! let mut session = ContainerSession::from_config(&config, catalog).unwrap();
//!
//! let outcome = session
//!     .handle(UiEvent::QuantityInput { item_id: "2".into(), raw: "5".into() })
//!     .unwrap();
//!
//! assert_eq!(outcome.view.items_label, "3/3 items (Maximum reached)");
//! assert_eq!(outcome.view.total_price, "$10.50");
//! assert!(outcome.notice.is_some());
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod event;
pub mod state;
pub mod view;

use tracing_subscriber::EnvFilter;

pub use catalog::{build_catalog, catalog_from_json, CatalogEntry, ChildSelection};
pub use config::{
    ChildSource, ContainerSettings, CurrencySettings, MessageSettings, NoticeSettings,
    StorefrontConfig,
};
pub use error::{ApiError, ErrorCode, StorefrontError, StorefrontResult};
pub use event::{EventOutcome, Key, UiEvent};
pub use state::{ContainerSession, SessionId, SessionRegistry, SessionState};
pub use view::{ItemView, Notice, NoticeKind, PresentationSink, PriceLine, SelectionView, Tone};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,mnm_core=debug,mnm_storefront=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=mnm_core=trace` - Show trace for the engine only
/// - Default: INFO, DEBUG for the mnm crates
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A host may already have installed its own subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }
}
