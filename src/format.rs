//! Number formatting for printed tickets.
//!
//! Printers have no notion of locale, so every amount is rendered with a
//! fixed `.` decimal separator and exactly two decimals.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format a currency amount with exactly two decimals.
///
/// Ties round away from zero on the exact binary value, the way the shop's
/// other clients print amounts: `6.125` is `6.13`, while `1.005` (stored as
/// `1.00499…`) is `1.00`.
///
/// ```
/// use ticketera::format::format_money;
///
/// assert_eq!(format_money(0.0), "0.00");
/// assert_eq!(format_money(10.5), "10.50");
/// assert_eq!(format_money(6.125), "6.13");
/// ```
pub fn format_money(amount: f64) -> String {
    let formatted = match Decimal::from_f64_retain(amount) {
        Some(exact) => {
            let mut rounded =
                exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            if rounded.is_zero() {
                rounded.set_sign_positive(true);
            }
            rounded.to_string()
        }
        // NaN, infinities and amounts beyond 96-bit precision
        None => format!("{:.2}", amount),
    };
    // -0.0 would print as "-0.00"
    if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    }
}

/// Format a quantity: integral values without decimals, fractional values
/// in their shortest decimal form (`2`, `1.5`, `0.25`).
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}
