//! Money totals derived from cart state. All amounts are whole KRW.

use serde::Serialize;

use crate::cart::CartLine;
use crate::error::CheckoutError;
use crate::selection::SelectionSet;

/// Sum of `unit_price_sell * quantity` over selected lines.
///
/// Original (list) prices never enter the sum.
#[must_use]
pub fn selected_total(lines: &[CartLine], selection: &SelectionSet) -> u64 {
    lines
        .iter()
        .filter(|l| selection.contains(&l.id))
        .map(CartLine::line_total)
        .fold(0u64, u64::saturating_add)
}

/// Sum of list prices over selected lines, for the struck-through subtotal.
#[must_use]
pub fn selected_original_total(lines: &[CartLine], selection: &SelectionSet) -> u64 {
    lines
        .iter()
        .filter(|l| selection.contains(&l.id))
        .map(|l| l.unit_price_original.saturating_mul(u64::from(l.quantity)))
        .fold(0u64, u64::saturating_add)
}

/// Order-level totals for a checkout draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub subtotal_price: u64,
    pub point_discount: u64,
    /// Coupon application is not wired into the total; always 0.
    pub coupon_discount: u64,
    pub total_price: u64,
}

impl OrderTotals {
    /// Applies the point discount to `subtotal`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::PointsExceedSubtotal`] when `points` is larger
    /// than `subtotal`.
    pub fn compute(subtotal: u64, points: u64) -> Result<Self, CheckoutError> {
        let coupon_discount = 0;
        let total_price = subtotal
            .checked_sub(points)
            .and_then(|rest| rest.checked_sub(coupon_discount))
            .ok_or(CheckoutError::PointsExceedSubtotal {
                points,
                subtotal,
            })?;
        Ok(Self {
            subtotal_price: subtotal,
            point_discount: points,
            coupon_discount,
            total_price,
        })
    }
}

/// Splits `discount` across `amounts` proportionally, flooring each share and
/// giving the remainder to the last non-zero amount. Shares never exceed
/// their amount when `discount <= sum(amounts)`.
#[must_use]
pub fn apportion(discount: u64, amounts: &[u64]) -> Vec<u64> {
    let total: u128 = amounts.iter().map(|&a| u128::from(a)).sum();
    if total == 0 || discount == 0 {
        return vec![0; amounts.len()];
    }
    let mut shares: Vec<u64> = amounts
        .iter()
        .map(|&a| {
            let share = u128::from(discount) * u128::from(a) / total;
            u64::try_from(share).unwrap_or(u64::MAX)
        })
        .collect();
    let assigned: u64 = shares.iter().fold(0u64, |acc, &s| acc.saturating_add(s));
    let remainder = discount.saturating_sub(assigned);
    if let Some(last) = amounts.iter().rposition(|&a| a > 0) {
        if let Some(share) = shares.get_mut(last) {
            *share = share.saturating_add(remainder);
        }
    }
    shares
}
