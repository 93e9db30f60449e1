//! # Price Formatting
//!
//! Turning [`Money`] into display text is a shop-wide convention (symbol,
//! position, separators), so the engine never does it. Presentation code
//! receives a [`PriceFormatter`]: either the standard [`CurrencyFormat`] or
//! any closure.
//!
//! ```text
//! ┌───────────────┬──────────────┐
//! │ position      │ 1234.5 USD   │
//! ├───────────────┼──────────────┤
//! │ left          │ $1,234.50    │
//! │ right         │ 1,234.50$    │
//! │ left_space    │ $ 1,234.50   │
//! │ right_space   │ 1,234.50 $   │
//! └───────────────┴──────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{DEFAULT_CURRENCY_DECIMALS, MAX_CURRENCY_DECIMALS};

/// Formats an amount for display.
pub trait PriceFormatter {
    fn format(&self, amount: Money) -> String;
}

impl<F> PriceFormatter for F
where
    F: Fn(Money) -> String,
{
    fn format(&self, amount: Money) -> String {
        self(amount)
    }
}

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyPosition {
    #[default]
    Left,
    Right,
    LeftSpace,
    RightSpace,
}

/// Standard currency formatting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    pub symbol: String,
    pub position: CurrencyPosition,
    /// Number of minor-unit digits (2 for cents, 0 for yen).
    pub decimals: u8,
    pub decimal_separator: String,
    pub thousand_separator: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            symbol: "$".to_string(),
            position: CurrencyPosition::Left,
            decimals: DEFAULT_CURRENCY_DECIMALS,
            decimal_separator: ".".to_string(),
            thousand_separator: ",".to_string(),
        }
    }
}

impl CurrencyFormat {
    /// Formats the number part only (no symbol).
    ///
    /// ## Example
    /// ```rust
    /// use mnm_core::{CurrencyFormat, Money};
    ///
    /// let format = CurrencyFormat::default();
    /// assert_eq!(format.format_number(Money::from_cents(123456)), "1,234.56");
    /// ```
    pub fn format_number(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!("{}{}", sign, self.unsigned_number(amount.cents().unsigned_abs()))
    }

    fn unsigned_number(&self, minor_units: u64) -> String {
        let decimals = self.decimals.min(MAX_CURRENCY_DECIMALS);
        let divisor = 10_u64.pow(u32::from(decimals));
        let whole = group_thousands(minor_units / divisor, &self.thousand_separator);

        if decimals == 0 {
            whole
        } else {
            format!(
                "{}{}{:0width$}",
                whole,
                self.decimal_separator,
                minor_units % divisor,
                width = usize::from(decimals)
            )
        }
    }
}

impl PriceFormatter for CurrencyFormat {
    fn format(&self, amount: Money) -> String {
        let number = self.unsigned_number(amount.cents().unsigned_abs());
        let sign = if amount.is_negative() { "-" } else { "" };
        let symbol = &self.symbol;

        match self.position {
            CurrencyPosition::Left => format!("{}{}{}", sign, symbol, number),
            CurrencyPosition::Right => format!("{}{}{}", sign, number, symbol),
            CurrencyPosition::LeftSpace => format!("{}{} {}", sign, symbol, number),
            CurrencyPosition::RightSpace => format!("{}{} {}", sign, number, symbol),
        }
    }
}

fn group_thousands(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    if separator.is_empty() || digits.len() <= 3 {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}
