//! # Pricing
//!
//! Pure total computation over cart lines. No state, no side effects: safe
//! to call on every render and every cart mutation.
//!
//! ## Rounding Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Where can a fraction of a cent appear?                                 │
//! │                                                                         │
//! │  1. Decimal input ("45.50")  → Money::parse_str, rounds HALF-UP once   │
//! │  2. line_total = price × qty → integer cents × integer, EXACT          │
//! │  3. cart_total = Σ line_total → integer sum, EXACT                     │
//! │                                                                         │
//! │  Each line total is computed independently and is already a whole      │
//! │  number of cents before summation, so no fractional-cent drift can     │
//! │  accumulate across lines.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::cart::CartLine;
use crate::money::Money;

/// Total for a single line: frozen unit price × quantity.
///
/// ## Example
/// ```rust
/// use inframex_core::pricing;
/// # use inframex_core::cart::CartLine;
/// # use chrono::Utc;
/// let line = CartLine {
///     product_id: "p1".to_string(),
///     sku: "TUBO-50-PVC".to_string(),
///     name: "Tubo PVC 50mm".to_string(),
///     unit_price_cents: 4550,
///     quantity: 2,
///     added_at: Utc::now(),
/// };
/// assert_eq!(pricing::line_total(&line).cents(), 9100); // $91.00
/// ```
#[inline]
pub fn line_total(line: &CartLine) -> Money {
    line.unit_price().multiply_quantity(line.quantity)
}

/// Grand total over a set of lines: the sum of the per-line totals.
///
/// Works on any line slice - a live cart via [`crate::Cart::lines`] or the
/// frozen lines of a receipt.
pub fn cart_total(lines: &[CartLine]) -> Money {
    lines
        .iter()
        .fold(Money::zero(), |acc, line| acc + line_total(line))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn line(price_cents: i64, quantity: i64) -> CartLine {
        CartLine {
            product_id: "p".to_string(),
            sku: "SKU".to_string(),
            name: "Product".to_string(),
            unit_price_cents: price_cents,
            quantity,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_line_total() {
        // $45.50 × 2 = $91.00
        assert_eq!(line_total(&line(4550, 2)).cents(), 9100);
        // $520.00 × 12 = $6240.00
        assert_eq!(line_total(&line(52000, 12)).cents(), 624000);
    }

    #[test]
    fn test_cart_total_sums_lines() {
        let lines = vec![line(4550, 2), line(12500, 1), line(8900, 3)];
        // 9100 + 12500 + 26700
        assert_eq!(cart_total(&lines).cents(), 48300);
    }

    #[test]
    fn test_cart_total_empty_is_zero() {
        assert_eq!(cart_total(&[]).cents(), 0);
        assert!(cart_total(&[]).is_zero());
    }

    #[test]
    fn test_cart_total_never_negative_for_valid_lines() {
        // Prices are validated non-negative and quantities positive, so
        // every reachable cart total is >= 0.
        let lines = vec![line(0, 5), line(1, 1)];
        assert!(cart_total(&lines).cents() >= 0);
    }

    #[test]
    fn test_no_cross_line_drift() {
        // 100 lines of $0.99: exact integer sum, no float accumulation.
        let lines: Vec<CartLine> = (0..100).map(|_| line(99, 1)).collect();
        assert_eq!(cart_total(&lines).cents(), 9900);
    }
}
