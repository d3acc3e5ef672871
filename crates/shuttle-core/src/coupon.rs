//! Coupon wallet entries and the "available coupons" view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `discount_type` value the backend uses for percentage coupons.
pub const RATE_DISCOUNT_TYPE: &str = "비율";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub discount_type: String,
    #[serde(default)]
    pub discount_rate: Option<u32>,
    #[serde(default)]
    pub discount_amount: Option<u64>,
    #[serde(default)]
    pub min_order_amount: u64,
    #[serde(default)]
    pub max_discount_amount: u64,
    pub valid_until: DateTime<Utc>,
}

/// How a coupon discounts an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    /// Percentage off, capped at `max` KRW.
    Rate { percent: u32, max: u64 },
    /// Fixed KRW amount.
    Amount(u64),
}

impl Coupon {
    #[must_use]
    pub fn discount(&self) -> Discount {
        if self.discount_type == RATE_DISCOUNT_TYPE {
            Discount::Rate {
                percent: self.discount_rate.unwrap_or(0),
                max: self.max_discount_amount,
            }
        } else {
            Discount::Amount(self.discount_amount.unwrap_or(0))
        }
    }

    /// Headline shown on the coupon card, e.g. `10%` or `3000원`.
    #[must_use]
    pub fn headline(&self) -> String {
        match self.discount() {
            Discount::Rate { percent, .. } => format!("{percent}%"),
            Discount::Amount(amount) => format!("{amount}원"),
        }
    }
}

/// A coupon held by the user. `coupon` is `None` when its detail could not
/// be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletEntry {
    pub id: String,
    pub coupon_id: String,
    #[serde(default)]
    pub is_used: bool,
    #[serde(default)]
    pub coupon: Option<Coupon>,
}

impl WalletEntry {
    /// Unused, with details, and not yet expired at `now`.
    #[must_use]
    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && self.coupon.as_ref().is_some_and(|c| c.valid_until > now)
    }
}

/// Wallet entries usable at `now`, in wallet order.
#[must_use]
pub fn available_coupons(wallet: &[WalletEntry], now: DateTime<Utc>) -> Vec<&WalletEntry> {
    wallet.iter().filter(|w| w.is_available(now)).collect()
}

/// Count for the "my page" badge: every unused entry, whether or not its
/// details loaded.
#[must_use]
pub fn unused_count(wallet: &[WalletEntry]) -> usize {
    wallet.iter().filter(|w| !w.is_used).count()
}
