//! # Storefront Errors
//!
//! Error types for the page adapter, plus the serializable [`ApiError`]
//! the page script receives.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Mix & Match                            │
//! │                                                                         │
//! │  Page script                 Rust adapter                               │
//! │  ───────────                 ────────────                               │
//! │                                                                         │
//! │  handle_event(id, event)                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Session gone? ──── StorefrontError::SessionNotFound ──┐        │  │
//! │  │         │                                              │        │  │
//! │  │         ▼                                              ▼        │  │
//! │  │  Stale item id? ─── CoreError::UnknownItem ─────── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  // e.code = "NOT_FOUND", e.message = "Item not found: 42"              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mnm_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

/// Result type alias for storefront operations.
pub type StorefrontResult<T> = Result<T, StorefrontError>;

// =============================================================================
// Storefront Error
// =============================================================================

/// Everything that can go wrong in the adapter.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Engine or validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration is readable but not usable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// No open container session with this id.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Page parameter or catalog JSON could not be read.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ValidationError> for StorefrontError {
    fn from(err: ValidationError) -> Self {
        StorefrontError::Core(CoreError::Validation(err))
    }
}

impl From<std::io::Error> for StorefrontError {
    fn from(err: std::io::Error) -> Self {
        StorefrontError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StorefrontError {
    fn from(err: toml::de::Error) -> Self {
        StorefrontError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StorefrontError {
    fn from(err: toml::ser::Error) -> Self {
        StorefrontError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// API Error
// =============================================================================

/// Error returned to the page script.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Item not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Session or item does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Configuration could not be loaded, saved or used
    ConfigError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownItem(id) => ApiError::not_found("Item", &id),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts storefront errors to API errors.
impl From<StorefrontError> for ApiError {
    fn from(err: StorefrontError) -> Self {
        match err {
            StorefrontError::Core(e) => ApiError::from(e),
            StorefrontError::SessionNotFound(id) => ApiError::not_found("Session", &id),
            StorefrontError::InvalidConfig(msg) => ApiError::new(ErrorCode::ConfigError, msg),
            StorefrontError::ConfigLoadFailed(msg) | StorefrontError::ConfigSaveFailed(msg) => {
                tracing::error!("Configuration I/O failed: {}", msg);
                ApiError::new(ErrorCode::ConfigError, "Configuration unavailable")
            }
            StorefrontError::Json(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
