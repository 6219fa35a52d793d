//! Cart model
//!
//! Line items and the order summary reduction shown on the cart page.

use serde::{Deserialize, Serialize};

use super::request::{require_non_negative, ValidationError};

/// Subtotal above which shipping is free
pub const FREE_SHIPPING_THRESHOLD: f64 = 200.0;
/// Flat shipping charge below the threshold
pub const FLAT_SHIPPING: f64 = 15.0;
/// Sales tax rate, applied to the pre-discount subtotal
pub const TAX_RATE: f64 = 0.08;

/// A recognized promo code and the share of the subtotal it takes off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromoCode {
    pub code: &'static str,
    pub discount_rate: f64,
}

pub const PROMO_CODES: [PromoCode; 1] = [PromoCode { code: "SAVE20", discount_rate: 0.20 }];

/// Look up a promo code, ignoring case and surrounding whitespace
pub fn find_promo_code(code: &str) -> Option<PromoCode> {
    let wanted = code.trim().to_uppercase();
    PROMO_CODES.iter().copied().find(|p| p.code == wanted)
}

/// A product line in the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Order totals for a cart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub item_count: u64,
    pub subtotal: f64,
    pub discount: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
    pub promo_code: Option<String>,
    pub promo_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_error: Option<String>,
    pub remaining_for_free_shipping: f64,
    /// Percent of the way to free shipping (0-100)
    pub free_shipping_progress: f64,
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reduce cart items to order totals
pub fn calculate_order_summary(
    items: &[CartItem],
    promo_code: Option<&str>,
) -> Result<OrderSummary, ValidationError> {
    for item in items {
        require_non_negative("price", item.price)?;
    }

    // Zero-quantity lines are removed from the cart
    let live: Vec<&CartItem> = items.iter().filter(|i| i.quantity > 0).collect();
    let item_count: u64 = live.iter().map(|i| u64::from(i.quantity)).sum();
    let subtotal = live.iter().fold(0.0, |acc, i| acc + i.line_total());

    let code = promo_code.map(str::trim).filter(|c| !c.is_empty());
    let promo = code.and_then(find_promo_code);
    let discount = promo.map(|p| subtotal * p.discount_rate).unwrap_or(0.0);
    let promo_error = match (code, promo) {
        (Some(_), None) => Some("Invalid promo code".to_string()),
        _ => None,
    };

    let shipping = if subtotal > FREE_SHIPPING_THRESHOLD { 0.0 } else { FLAT_SHIPPING };
    let tax = subtotal * TAX_RATE;
    let total = subtotal - discount + shipping + tax;

    Ok(OrderSummary {
        item_count,
        subtotal: round_cents(subtotal),
        discount: round_cents(discount),
        shipping,
        tax: round_cents(tax),
        total: round_cents(total),
        promo_code: promo.map(|p| p.code.to_string()),
        promo_applied: promo.is_some(),
        promo_error,
        remaining_for_free_shipping: round_cents((FREE_SHIPPING_THRESHOLD - subtotal).max(0.0)),
        free_shipping_progress: round_cents((subtotal / FREE_SHIPPING_THRESHOLD * 100.0).min(100.0)),
    })
}
