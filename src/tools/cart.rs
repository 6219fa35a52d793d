//! Cart MCP Tools

use crate::models::{self, CartItem, OrderSummary};

/// Compute order totals for a cart
pub fn calculate_order_summary(
    items: &[CartItem],
    promo_code: Option<&str>,
) -> Result<OrderSummary, String> {
    let summary = models::calculate_order_summary(items, promo_code).map_err(|e| e.to_string())?;

    if summary.promo_error.is_some() {
        tracing::info!(code = promo_code.unwrap_or_default(), "Rejected promo code");
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_stringified() {
        let items = vec![CartItem { name: "Tire".into(), price: f64::NAN, quantity: 1 }];
        let err = calculate_order_summary(&items, None).unwrap_err();
        assert!(err.starts_with("price must be a finite number"));
    }
}
