//! # Commands Module
//!
//! Entry points a page host calls. Every command takes string ids and
//! returns `Result<T, ApiError>` so the result can be handed straight to a
//! page script.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront Commands                                  │
//! │                                                                         │
//! │  SELECTION COMMANDS (selection.rs)                                      │
//! │  ├── open_container()        ─► config + catalog → new session          │
//! │  ├── open_container_with_params() ─► same, container from page params   │
//! │  ├── get_view()              ─► current view model                      │
//! │  ├── handle_event()          ─► apply one page event                    │
//! │  ├── dispatch_event()        ─► apply and push to a PresentationSink    │
//! │  └── close_container()       ─► drop the session                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod selection;

pub use selection::*;
