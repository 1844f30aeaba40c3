use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Image shown for products that have no `image_url`.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/96x96?text=Item";

/// Kind of goods being resold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Sneaker,
    #[serde(rename = "TCG")]
    Tcg,
    Streetwear,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Sneaker, Category::Tcg, Category::Streetwear];

    /// Wire and display label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sneaker => "Sneaker",
            Category::Tcg => "TCG",
            Category::Streetwear => "Streetwear",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    /// Case-insensitive match on the wire label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown category '{s}' (expected Sneaker, TCG or Streetwear)"))
    }
}

/// Where an item is in the resale lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProductStatus {
    #[default]
    #[serde(rename = "In Stock")]
    InStock,
    Listed,
    Sold,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [
        ProductStatus::InStock,
        ProductStatus::Listed,
        ProductStatus::Sold,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::InStock => "In Stock",
            ProductStatus::Listed => "Listed",
            ProductStatus::Sold => "Sold",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    /// Accepts the wire label case-insensitively, plus `in-stock` and
    /// `in_stock` for command-line convenience.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', '_'], " ");
        ProductStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| format!("unknown status '{s}' (expected In Stock, Listed or Sold)"))
    }
}

/// An inventory item as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend-assigned identifier. Kept opaque; numeric ids are stored as
    /// their decimal string.
    #[serde(alias = "_id", deserialize_with = "deserialize_opaque_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase_price: Decimal,
    /// Timestamps without an offset are taken as UTC.
    #[serde(deserialize_with = "deserialize_purchase_date")]
    pub purchase_date: DateTime<Utc>,
    pub status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// The product image, or [`PLACEHOLDER_IMAGE_URL`] when none is set.
    #[must_use]
    pub fn image_or_placeholder(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE_URL)
    }
}

/// Body of a `POST /products` request.
///
/// Optional fields are omitted from the JSON entirely when `None`; the
/// backend never receives empty strings for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase_price: Decimal,
    pub purchase_date: DateTime<Utc>,
    pub status: ProductStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Backend-computed portfolio figures. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_investment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub realized_profit: Decimal,
    /// Return on investment in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub roi: Decimal,
    pub sold_count: u64,
}

fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

/// Accepts RFC 3339, offset-less ISO-8601 datetimes (`2025-03-01T00:00:00`,
/// optionally with fractional seconds or a space separator) and bare dates.
fn deserialize_purchase_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    Err(serde::de::Error::custom(format!(
        "invalid purchase_date '{raw}'"
    )))
}
