//! # Validation Module
//!
//! Rules that decide whether a selection may go to the cart, how it is
//! described to the customer, and how raw page input is normalized.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Page input                                                    │
//! │  └── parse_quantity(): "", "abc", "-2" → 0   (never an error)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine clamping                                               │
//! │  └── container-wide cap, per-item cap                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                   │
//! │  ├── is_selection_valid(): gate for the add-to-cart button             │
//! │  └── describe_selection(): which message to show                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::SelectionStatus;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Selection Rules
// =============================================================================

/// Decides whether a selection of `total` items may be added to the cart.
///
/// ## Rules
/// - Below a set minimum: invalid
/// - Above a set maximum: invalid
/// - Nothing selected while there is no minimum: invalid. Selecting nothing
///   is never an acceptable final state.
///
/// ## Example
/// ```rust
/// use mnm_core::validation::is_selection_valid;
///
/// assert!(!is_selection_valid(2, 3, 5));
/// assert!(is_selection_valid(4, 3, 5));
/// assert!(!is_selection_valid(6, 3, 5));
/// assert!(!is_selection_valid(0, 0, 0));
/// assert!(is_selection_valid(1, 0, 0));
/// ```
pub fn is_selection_valid(total: u32, min: u32, max: u32) -> bool {
    let mut valid = true;

    if min > 0 && total < min {
        valid = false;
    }

    if max > 0 && total > max {
        valid = false;
    }

    if min == 0 && total == 0 {
        valid = false;
    }

    valid
}

/// Classifies the selection for the descriptive message under the item list.
///
/// ## Example
/// ```rust
/// use mnm_core::validation::describe_selection;
/// use mnm_core::SelectionStatus;
///
/// assert_eq!(
///     describe_selection(1, 3),
///     SelectionStatus::BelowMinimum { selected: 1, minimum: 3, needed: 2 }
/// );
/// ```
pub fn describe_selection(total: u32, min: u32) -> SelectionStatus {
    let needed = min.saturating_sub(total);

    if total == 0 {
        SelectionStatus::Empty {
            minimum: min,
            needed,
        }
    } else if total < min {
        SelectionStatus::BelowMinimum {
            selected: total,
            minimum: min,
            needed,
        }
    } else {
        SelectionStatus::Ready { selected: total }
    }
}

// =============================================================================
// Input Normalization
// =============================================================================

/// Normalizes the text of a quantity field into an integer.
///
/// Reads an optional sign and the leading digits, ignoring anything after
/// them. Empty or non-numeric text is 0. Negative values come back negative;
/// the engine floors them at 0.
///
/// ## Example
/// ```rust
/// use mnm_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity("3"), 3);
/// assert_eq!(parse_quantity(" 12 "), 12);
/// assert_eq!(parse_quantity("4.7"), 4);
/// assert_eq!(parse_quantity(""), 0);
/// assert_eq!(parse_quantity("abc"), 0);
/// assert_eq!(parse_quantity("-2"), -2);
/// ```
pub fn parse_quantity(raw: &str) -> i64 {
    let s = raw.trim();

    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digit_count = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    let digits = &rest[..digit_count];

    if digits.is_empty() {
        return 0;
    }

    // All-digit text only fails to parse when it overflows
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);

    if negative {
        -value
    } else {
        value
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in minor units.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, no base fee)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_within_bounds() {
        assert!(is_selection_valid(3, 3, 5));
        assert!(is_selection_valid(5, 3, 5));
        assert!(!is_selection_valid(2, 3, 5));
        assert!(!is_selection_valid(6, 3, 5));
    }

    #[test]
    fn test_empty_selection_never_valid() {
        assert!(!is_selection_valid(0, 0, 0));
        assert!(!is_selection_valid(0, 0, 5));
        assert!(is_selection_valid(1, 0, 5));
    }

    #[test]
    fn test_unlimited_maximum() {
        assert!(is_selection_valid(1000, 2, 0));
    }

    #[test]
    fn test_describe_empty() {
        assert_eq!(
            describe_selection(0, 3),
            SelectionStatus::Empty {
                minimum: 3,
                needed: 3
            }
        );
        assert_eq!(
            describe_selection(0, 0),
            SelectionStatus::Empty {
                minimum: 0,
                needed: 0
            }
        );
    }

    #[test]
    fn test_describe_ready() {
        assert_eq!(
            describe_selection(3, 3),
            SelectionStatus::Ready { selected: 3 }
        );
        assert_eq!(
            describe_selection(1, 0),
            SelectionStatus::Ready { selected: 1 }
        );
    }

    #[test]
    fn test_parse_quantity_edge_cases() {
        assert_eq!(parse_quantity("+5"), 5);
        assert_eq!(parse_quantity("-"), 0);
        assert_eq!(parse_quantity("7abc"), 7);
        assert_eq!(parse_quantity("   "), 0);
        assert_eq!(parse_quantity("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(999).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }
}
