//! Break-even price estimation for the add-item preview.
//!
//! The estimate answers "what must this sell for to get my money back" under
//! a percentage platform fee taken from the sale price and a flat shipping
//! cost paid by the seller:
//!
//! ```text
//! breakeven = (purchase_price + shipping_cost) / (1 - fee_rate)
//! ```

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Shown when the estimate cannot be computed.
const FALLBACK_DISPLAY: &str = "0.00";

/// Fee and shipping assumptions used by the break-even estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingAssumptions {
    /// Fraction of the sale price taken by the platform, e.g. `0.12`.
    pub fee_rate: Decimal,
    /// Flat shipping cost in the purchase currency.
    pub shipping_cost: Decimal,
}

impl Default for PricingAssumptions {
    /// 12% platform fee and 8 currency units of shipping.
    fn default() -> Self {
        Self {
            fee_rate: Decimal::new(12, 2),
            shipping_cost: Decimal::from(8),
        }
    }
}

impl PricingAssumptions {
    #[must_use]
    pub fn new(fee_rate: Decimal, shipping_cost: Decimal) -> Self {
        Self {
            fee_rate,
            shipping_cost,
        }
    }

    /// Suggested break-even sale price, rounded to two decimals.
    ///
    /// Returns `None` when the value is not representable: a fee rate of
    /// exactly 1 or an overflowing purchase price.
    #[must_use]
    pub fn breakeven(&self, purchase_price: Decimal) -> Option<Decimal> {
        let numerator = purchase_price.checked_add(self.shipping_cost)?;
        let denominator = Decimal::ONE.checked_sub(self.fee_rate)?;
        let raw = numerator.checked_div(denominator)?;
        Some(raw.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Break-even preview for free-text input, always formatted with two
    /// decimals. Unparsable input counts as a purchase price of 0; a number
    /// too large to represent shows `"0.00"`.
    #[must_use]
    pub fn breakeven_display(&self, input: &str) -> String {
        let PriceInput::Amount(price) = parse_price(input) else {
            return FALLBACK_DISPLAY.to_string();
        };
        self.breakeven(price)
            .map_or_else(|| FALLBACK_DISPLAY.to_string(), |v| format!("{v:.2}"))
    }
}

/// Free-text price input after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceInput {
    /// A usable amount. Blank and non-numeric text land here as `0`.
    Amount(Decimal),
    /// Text that is a number but too large for a `Decimal`, including
    /// `inf`.
    OutOfRange,
}

/// Coerces free-text price input into a number.
///
/// Empty, whitespace-only and non-numeric text all become `0`. Scientific
/// notation (`"1e2"`) is accepted. Numbers beyond `Decimal::MAX` are
/// reported as [`PriceInput::OutOfRange`] instead of being coerced.
#[must_use]
pub fn parse_price(input: &str) -> PriceInput {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return PriceInput::Amount(Decimal::ZERO);
    }
    if let Ok(value) = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        return PriceInput::Amount(value);
    }

    // Decimal rejected it; f64 tells us whether it was a number at all.
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_nan() => PriceInput::Amount(Decimal::ZERO),
        // Below Decimal's 28-digit scale: effectively zero.
        Ok(v) if v.is_finite() && v.abs() < 1.0 => PriceInput::Amount(Decimal::ZERO),
        Ok(_) => PriceInput::OutOfRange,
        Err(_) => PriceInput::Amount(Decimal::ZERO),
    }
}
