//! Add-item form state.
//!
//! [`ItemForm`] holds exactly what the user typed. Normalization into a
//! [`NewProduct`] happens only at submit time so a failed submission can
//! leave every field as entered.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::pricing::{parse_price, PriceInput, PricingAssumptions};
use crate::products::{Category, NewProduct, ProductStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("product name is required")]
    MissingName,

    #[error("invalid purchase date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("purchase price must not be negative (got {0})")]
    NegativePrice(Decimal),

    #[error("purchase price '{0}' is too large")]
    PriceOutOfRange(String),
}

/// Raw field values of the add-item form.
///
/// `Default` is the empty form: category Sneaker, status In Stock, every
/// text field blank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemForm {
    pub name: String,
    pub sku: String,
    pub variant: String,
    pub category: Category,
    /// Free text; blank or non-numeric means 0.
    pub purchase_price: String,
    /// `YYYY-MM-DD`; blank means "now" at submit time.
    pub purchase_date: String,
    pub status: ProductStatus,
    pub image_url: String,
}

impl ItemForm {
    /// Restores every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Break-even preview for the current purchase price text.
    #[must_use]
    pub fn breakeven_preview(&self, pricing: &PricingAssumptions) -> String {
        pricing.breakeven_display(&self.purchase_price)
    }

    /// Builds the create payload, using `now` when no purchase date is set.
    ///
    /// # Errors
    ///
    /// - [`FormError::MissingName`] if the name is blank.
    /// - [`FormError::InvalidDate`] if the purchase date is not a calendar date.
    /// - [`FormError::NegativePrice`] if the price parses to a negative number.
    /// - [`FormError::PriceOutOfRange`] if the price is a number too large to
    ///   represent.
    pub fn to_new_product(&self, now: DateTime<Utc>) -> Result<NewProduct, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        let PriceInput::Amount(purchase_price) = parse_price(&self.purchase_price) else {
            return Err(FormError::PriceOutOfRange(
                self.purchase_price.trim().to_string(),
            ));
        };
        if purchase_price.is_sign_negative() && !purchase_price.is_zero() {
            return Err(FormError::NegativePrice(purchase_price));
        }

        Ok(NewProduct {
            name: name.to_string(),
            sku: non_blank(&self.sku),
            variant: non_blank(&self.variant),
            category: self.category,
            purchase_price,
            purchase_date: parse_purchase_date(&self.purchase_date, now)?,
            status: self.status,
            image_url: non_blank(&self.image_url),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A date-only value becomes midnight UTC of that day. Full RFC 3339
/// timestamps are passed through.
fn parse_purchase_date(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(now);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| FormError::InvalidDate(trimmed.to_string()))
}
