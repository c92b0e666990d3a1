//! Money calculation utilities using rust_decimal for precision
//!
//! Order totals are summed as `Decimal` and rounded exactly once after
//! the sum, then converted to `f64` for storage.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Sum a list of prices, rounding the final sum to 2 decimal places
pub fn sum_prices<I>(prices: I) -> Decimal
where
    I: IntoIterator<Item = f64>,
{
    let total: Decimal = prices.into_iter().map(to_decimal).sum();
    total.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_prices_exact() {
        let total = sum_prices([10.00, 15.50]);
        assert_eq!(total, Decimal::new(2550, 2));
    }

    #[test]
    fn test_sum_prices_empty_is_zero() {
        assert_eq!(sum_prices(Vec::<f64>::new()), Decimal::ZERO);
    }

    #[test]
    fn test_sum_rounds_once_after_summing() {
        // Three thirds of a cent only round at the end
        let total = sum_prices([0.333, 0.333, 0.334]);
        assert_eq!(total, Decimal::ONE);
    }

    #[test]
    fn test_to_f64_rounds_half_away_from_zero() {
        assert_eq!(to_f64(Decimal::new(12345, 3)), 12.35);
        assert_eq!(to_f64(Decimal::new(-12345, 3)), -12.35);
    }
}
