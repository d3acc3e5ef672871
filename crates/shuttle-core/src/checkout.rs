//! Order draft assembly for cart checkout and "buy now".

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::address::AddressForm;
use crate::app_config::AppConfig;
use crate::cart::{CartLine, OptionColumns, OptionSelection};
use crate::catalog::{Catalog, Product};
use crate::error::CheckoutError;
use crate::payment::{self, PaymentProvider, PaymentRequest, CURRENCY_KRW};
use crate::totals::{self, OrderTotals};
use crate::view::CartView;

/// One order line in the shape the order endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub product_id: String,
    pub coupon_wallet_id: Option<String>,
    pub quantity: u32,
    pub unit_price: u64,
    pub coupon_discount_price: u64,
    pub point_discount_price: u64,
    pub final_price: u64,
    #[serde(flatten)]
    pub options: OptionColumns,
}

/// Payload for `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDraft {
    pub recipient_name: String,
    pub phone_number: String,
    pub zipcode: String,
    pub address_line1: String,
    pub address_line2: String,
    pub order_memo: String,
    pub subtotal_price: u64,
    pub point_discount_price: u64,
    pub coupon_discount_price: u64,
    pub total_price: u64,
    pub items: Vec<OrderItem>,
    #[serde(skip)]
    pub order_name: String,
}

/// A single product bought directly from its detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyNow {
    pub product: Product,
    pub quantity: u32,
    pub options: Vec<OptionSelection>,
}

struct DraftLine<'a> {
    product_id: &'a str,
    name: &'a str,
    quantity: u32,
    unit_price: u64,
    options: &'a [OptionSelection],
}

/// Builds [`OrderDraft`]s from a shipping address and point redemption.
#[derive(Debug, Clone)]
pub struct DraftBuilder {
    address: AddressForm,
    points: u64,
    apportion_points: bool,
}

impl DraftBuilder {
    #[must_use]
    pub fn new(address: AddressForm) -> Self {
        Self {
            address,
            points: 0,
            apportion_points: false,
        }
    }

    /// Points to redeem against the subtotal.
    #[must_use]
    pub fn points(mut self, points: u64) -> Self {
        self.points = points;
        self
    }

    /// When set, the order-level point discount is split across items and
    /// each item's `final_price` is reduced by its share. Off by default:
    /// the order endpoint expects zero per-item discounts.
    #[must_use]
    pub fn apportion_points(mut self, enabled: bool) -> Self {
        self.apportion_points = enabled;
        self
    }

    /// Draft from the cart's currently selected lines.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::NothingSelected`] when the selection is empty.
    /// - [`CheckoutError::SoldOut`] when any selected line is inactive.
    /// - [`CheckoutError::Address`] / [`CheckoutError::PointsExceedSubtotal`]
    ///   from [`Self::build`].
    pub fn from_cart(&self, view: &CartView) -> Result<OrderDraft, CheckoutError> {
        let selected = view.selected_lines();
        if selected.is_empty() {
            return Err(CheckoutError::NothingSelected);
        }
        let sold_out: Vec<String> = selected
            .iter()
            .filter(|l| !l.is_active)
            .map(|l| l.name.clone())
            .collect();
        if !sold_out.is_empty() {
            return Err(CheckoutError::SoldOut { names: sold_out });
        }

        let lines: Vec<DraftLine<'_>> = selected
            .iter()
            .map(|l| DraftLine {
                product_id: &l.product_id,
                name: &l.name,
                quantity: l.quantity,
                unit_price: l.unit_price_sell,
                options: &l.options,
            })
            .collect();
        self.build(&lines)
    }

    /// Draft for a single product bought directly.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::ZeroQuantity`] when `item.quantity` is 0.
    /// - [`CheckoutError::SoldOut`] when the product is sold out.
    /// - [`CheckoutError::Options`] when more than three options are chosen.
    /// - [`CheckoutError::Address`] / [`CheckoutError::PointsExceedSubtotal`].
    pub fn buy_now(&self, item: &BuyNow) -> Result<OrderDraft, CheckoutError> {
        if item.quantity == 0 {
            return Err(CheckoutError::ZeroQuantity);
        }
        if !item.product.is_available() {
            return Err(CheckoutError::SoldOut {
                names: vec![item.product.name.clone()],
            });
        }
        self.build(&[DraftLine {
            product_id: &item.product.id,
            name: &item.product.name,
            quantity: item.quantity,
            unit_price: item.product.price_sell,
            options: &item.options,
        }])
    }

    fn build(&self, lines: &[DraftLine<'_>]) -> Result<OrderDraft, CheckoutError> {
        self.address.validate()?;

        let line_totals: Vec<u64> = lines
            .iter()
            .map(|l| l.unit_price.saturating_mul(u64::from(l.quantity)))
            .collect();
        let subtotal = line_totals.iter().fold(0u64, |acc, &t| acc.saturating_add(t));
        let order_totals = OrderTotals::compute(subtotal, self.points)?;

        let point_shares = if self.apportion_points {
            totals::apportion(order_totals.point_discount, &line_totals)
        } else {
            vec![0; lines.len()]
        };

        let items = lines
            .iter()
            .zip(line_totals.iter().zip(point_shares))
            .map(|(l, (&line_total, share))| {
                Ok(OrderItem {
                    product_id: l.product_id.to_string(),
                    coupon_wallet_id: None,
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                    coupon_discount_price: 0,
                    point_discount_price: share,
                    final_price: line_total.saturating_sub(share),
                    options: OptionColumns::from_selections(l.options)?,
                })
            })
            .collect::<Result<Vec<_>, CheckoutError>>()?;

        let names: Vec<&str> = lines.iter().map(|l| l.name).collect();
        let form = &self.address;
        Ok(OrderDraft {
            recipient_name: form.recipient_name.clone(),
            phone_number: form.phone_number.clone(),
            zipcode: form.zipcode.clone(),
            address_line1: form.address_line1.clone(),
            address_line2: form.address_line2.clone(),
            order_memo: form.order_memo.clone(),
            subtotal_price: order_totals.subtotal_price,
            point_discount_price: order_totals.point_discount,
            coupon_discount_price: order_totals.coupon_discount,
            total_price: order_totals.total_price,
            items,
            order_name: payment::order_name(&names),
        })
    }
}

/// Re-checks selected lines against a fresh catalog snapshot before checkout.
///
/// A line is sold out when its product is gone from the catalog or marked
/// inactive.
///
/// # Errors
///
/// Returns [`CheckoutError::SoldOut`] naming every sold-out line.
pub fn ensure_available(lines: &[&CartLine], catalog: &Catalog) -> Result<(), CheckoutError> {
    let names: Vec<String> = lines
        .iter()
        .filter(|l| {
            catalog
                .lookup(&l.product_id)
                .map_or(true, |p| !p.is_available())
        })
        .map(|l| l.name.clone())
        .collect();
    if names.is_empty() {
        Ok(())
    } else {
        Err(CheckoutError::SoldOut { names })
    }
}

/// Payment SDK request for a created order.
#[must_use]
pub fn payment_request(
    draft: &OrderDraft,
    order_id: &str,
    provider: PaymentProvider,
    config: &AppConfig,
    now: DateTime<Utc>,
) -> PaymentRequest {
    PaymentRequest {
        store_id: config.payment_store_id.clone(),
        channel_key: provider.channel_key(&config.channel_keys).to_string(),
        payment_id: payment::generate_payment_id(now),
        order_name: draft.order_name.clone(),
        total_amount: draft.total_price,
        currency: CURRENCY_KRW.to_string(),
        pay_method: provider.pay_method(),
        custom_data: order_id.to_string(),
        notice_urls: config.payment_notice_url.iter().cloned().collect(),
    }
}

#[cfg(test)]
#[path = "checkout_test.rs"]
mod tests;
