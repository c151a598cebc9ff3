//! Discount schedules
//!
//! Multi-discipline discounts are a fraction of the base price per extra
//! discipline; sibling discounts are a fraction of the combined base total.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Discount on the 2nd, 3rd and 4th discipline, as a fraction of the base price
pub const MULTI_DISCIPLINE_RATES: [Decimal; 3] = [dec!(0.50), dec!(0.25), dec!(0.25)];

/// Cumulative multi-discipline discount for one student taking `count` disciplines.
///
/// `None` if the amount does not fit in a `Decimal`.
pub fn multi_discipline_discount(base_price: Decimal, count: u32) -> Option<Decimal> {
    let extra = count.saturating_sub(1) as usize;
    MULTI_DISCIPLINE_RATES
        .iter()
        .take(extra)
        .try_fold(Decimal::ZERO, |acc, rate| {
            acc.checked_add(base_price.checked_mul(*rate)?)
        })
}

/// Sibling discount rate applied to the base total.
///
/// Four or more siblings get no discount: no tier is defined past three.
pub fn sibling_discount_rate(siblings: u32) -> Decimal {
    match siblings {
        2 => dec!(0.10),
        3 => dec!(0.15),
        _ => Decimal::ZERO,
    }
}
