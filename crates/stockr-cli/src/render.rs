//! Plain-text rendering of the dashboard.
//!
//! Labels follow the original dashboard wording. Every function returns a
//! `String` so callers decide where output goes.

use std::fmt::Write as _;

use rust_decimal::{Decimal, RoundingStrategy};
use stockr_client::Dashboard;
use stockr_core::{ItemForm, KpiSnapshot, PricingAssumptions, Product};

/// Two-decimal amount, rounded half away from zero.
fn money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub(crate) fn breakeven_line(pricing: &PricingAssumptions, price_text: &str) -> String {
    format!("Break-even: ~€{}", pricing.breakeven_display(price_text))
}

/// KPI tiles. `None` renders a placeholder dash rather than zeros so a
/// failed load never reads as an empty portfolio.
pub(crate) fn kpi_tiles(kpis: Option<&KpiSnapshot>) -> String {
    let Some(k) = kpis else {
        return [
            "Gesamtinvestition  \u{2014}",
            "Gesamtwert         \u{2014}",
            "Real. Gewinn       \u{2014}",
            "ROI                \u{2014}",
            "Verkauft           \u{2014}",
        ]
        .join("\n");
    };

    [
        format!("Gesamtinvestition  €{}", money(k.total_investment)),
        format!("Gesamtwert         €{}", money(k.total_value)),
        format!("Real. Gewinn       €{}", money(k.realized_profit)),
        format!("ROI                {}%", money(k.roi)),
        format!("Verkauft           {}", k.sold_count),
    ]
    .join("\n")
}

/// One card per product, in the order given.
pub(crate) fn product_cards(products: &[Product]) -> String {
    if products.is_empty() {
        return "(keine Items)".to_string();
    }

    let mut out = String::new();
    for (i, p) in products.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let variant = p
            .variant
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or("-");
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}", p.name);
        let _ = writeln!(out, "  {} \u{2022} {} \u{2022} {}", p.category, variant, p.status);
        let _ = writeln!(out, "  Gekauft: €{}", money(p.purchase_price));
        let _ = write!(out, "  Bild: {}", p.image_or_placeholder());
    }
    out
}

/// Warning line for failed or stale loads; `None` when the data is current.
pub(crate) fn status_banner(has_loaded: bool, last_error: Option<&str>) -> Option<String> {
    let err = last_error?;
    if has_loaded {
        Some(format!("! showing last known data; refresh failed: {err}"))
    } else {
        Some(format!("! data could not be loaded: {err}"))
    }
}

pub(crate) fn kpi_section(dashboard: &Dashboard) -> String {
    with_banner(dashboard, &kpi_tiles(dashboard.kpis()))
}

pub(crate) fn product_section(dashboard: &Dashboard) -> String {
    let body = if dashboard.has_loaded() {
        product_cards(dashboard.products())
    } else {
        "\u{2014}".to_string()
    };
    with_banner(dashboard, &format!("Inventar\n{body}"))
}

pub(crate) fn dashboard(dashboard: &Dashboard) -> String {
    let products = if dashboard.has_loaded() {
        product_cards(dashboard.products())
    } else {
        "\u{2014}".to_string()
    };
    with_banner(
        dashboard,
        &format!(
            "{}\n\nInventar\n{products}",
            kpi_tiles(dashboard.kpis())
        ),
    )
}

/// The add-item form as entered, shown after a failed submission.
pub(crate) fn form_summary(form: &ItemForm, pricing: &PricingAssumptions) -> String {
    let show = |v: &str| {
        if v.trim().is_empty() {
            "-".to_string()
        } else {
            v.to_string()
        }
    };
    [
        format!("Produktname   {}", show(&form.name)),
        format!("SKU           {}", show(&form.sku)),
        format!("Variante      {}", show(&form.variant)),
        format!("Kategorie     {}", form.category),
        format!("Kaufpreis     {}", show(&form.purchase_price)),
        format!("Kaufdatum     {}", show(&form.purchase_date)),
        format!("Status        {}", form.status),
        format!("Bild-URL      {}", show(&form.image_url)),
        breakeven_line(pricing, &form.purchase_price),
    ]
    .join("\n")
}

fn with_banner(dashboard: &Dashboard, body: &str) -> String {
    match status_banner(dashboard.has_loaded(), dashboard.last_error()) {
        Some(banner) => format!("{banner}\n\n{body}"),
        None => body.to_string(),
    }
}
