//! # Error Types
//!
//! Domain-specific error types for mnm-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mnm-core errors (this file)                                           │
//! │  ├── CoreError        - Engine operation failures                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  mnm-storefront errors (separate crate)                                │
//! │  ├── StorefrontError  - Config / session failures                      │
//! │  └── ApiError         - What the page sees (serialized)                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StorefrontError → ApiError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in the engine is fatal. Every failure here is a value the caller
//! can show or ignore; the selection state is left untouched when one is
//! returned.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Engine operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The item id is not part of this container's catalog.
    ///
    /// ## When This Occurs
    /// - A stale page element refers to an item that was filtered out
    ///   (not purchasable, out of stock)
    /// - The catalog was re-resolved while the page was open
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the boundary (prices, pricing mode names, currency settings)
/// before values reach the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., a price that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
