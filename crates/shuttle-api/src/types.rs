//! Storefront REST wire types.
//!
//! Every response is parsed into these schema types first and converted into
//! `shuttle_core` domain types afterwards, so malformed records are caught at
//! the network boundary.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use shuttle_core::cart::{CartRecord, OptionColumns, OptionPair};
use shuttle_core::catalog::{Product, DEFAULT_BRAND};
use shuttle_core::coupon::Coupon;

use crate::error::ApiError;

// ---------------------------------------------------------------------------
// GET /products
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category_main: Option<String>,
    /// Shown as the brand.
    #[serde(default)]
    pub category_sub: Option<String>,
    #[serde(default)]
    pub price_whole: u64,
    #[serde(default)]
    pub price_sell: u64,
    #[serde(default)]
    pub discount_rate: u32,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ApiError;

    fn try_from(r: ProductRecord) -> Result<Self, Self::Error> {
        let discount_rate = u8::try_from(r.discount_rate)
            .ok()
            .filter(|rate| *rate <= 100)
            .ok_or_else(|| ApiError::InvalidRecord {
                context: format!("product {}", r.id),
                reason: format!("discount_rate {} is outside 0..=100", r.discount_rate),
            })?;
        Ok(Product {
            brand: r
                .category_sub
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| DEFAULT_BRAND.to_string()),
            id: r.id,
            name: r.name,
            price_sell: r.price_sell,
            price_original: r.price_whole,
            discount_rate,
            is_active: r.is_active,
        })
    }
}

// ---------------------------------------------------------------------------
// /cartitems
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CartItemsResponse {
    #[serde(default)]
    pub cartitems: Vec<CartItemRecord>,
    #[serde(default)]
    pub total_count: u64,
}

/// A cart entry as the backend returns it. Option columns are read under
/// both naming schemes the backend has used.
#[derive(Debug, Deserialize)]
pub struct CartItemRecord {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    #[serde(default, alias = "option_1_type")]
    pub option_type_1: Option<String>,
    #[serde(default, alias = "option_1_value")]
    pub option_1: Option<String>,
    #[serde(default, alias = "option_2_type")]
    pub option_type_2: Option<String>,
    #[serde(default, alias = "option_2_value")]
    pub option_2: Option<String>,
    #[serde(default, alias = "option_3_type")]
    pub option_type_3: Option<String>,
    #[serde(default, alias = "option_3_value")]
    pub option_3: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TryFrom<CartItemRecord> for CartRecord {
    type Error = ApiError;

    fn try_from(r: CartItemRecord) -> Result<Self, Self::Error> {
        let quantity = u32::try_from(r.quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| ApiError::InvalidRecord {
                context: format!("cart item {}", r.id),
                reason: format!("quantity {} is not a positive count", r.quantity),
            })?;
        Ok(CartRecord {
            id: r.id,
            product_id: r.product_id,
            quantity,
            options: [
                OptionPair {
                    kind: r.option_type_1,
                    value: r.option_1,
                },
                OptionPair {
                    kind: r.option_type_2,
                    value: r.option_2,
                },
                OptionPair {
                    kind: r.option_type_3,
                    value: r.option_3,
                },
            ],
            created_at: r.created_at.as_deref().and_then(parse_timestamp),
            updated_at: r.updated_at.as_deref().and_then(parse_timestamp),
        })
    }
}

/// Parses an RFC 3339 timestamp, or a zone-less one taken as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

#[derive(Debug, Serialize)]
pub struct CreateCartItemBody<'a> {
    pub user_id: &'a str,
    pub product_id: &'a str,
    pub quantity: u32,
    #[serde(flatten)]
    pub options: OptionColumns,
}

#[derive(Debug, Serialize)]
pub struct UpdateCartItemBody<'a> {
    pub cartitem_id: &'a str,
    pub user_id: &'a str,
    pub product_id: &'a str,
    pub quantity: u32,
    #[serde(flatten)]
    pub options: OptionColumns,
}

// ---------------------------------------------------------------------------
// /orders
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreatedOrder {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub orders: Vec<OrderSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderSummary {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub recipient_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    #[serde(default)]
    pub order_memo: Option<String>,
    #[serde(default)]
    pub subtotal_price: u64,
    #[serde(default)]
    pub coupon_discount_price: u64,
    #[serde(default)]
    pub point_discount_price: u64,
    #[serde(default)]
    pub total_price: u64,
}

#[derive(Debug, Deserialize)]
pub struct OrderDetailResponse {
    #[serde(default)]
    pub items: Vec<OrderedItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderedItem {
    pub id: String,
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    pub quantity: u32,
    #[serde(default)]
    pub final_price: u64,
    #[serde(default)]
    pub option_1_value: Option<String>,
    #[serde(default)]
    pub option_2_value: Option<String>,
    #[serde(default)]
    pub option_3_value: Option<String>,
}

/// A past order with its line items, for the order history screen.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub summary: OrderSummary,
    pub placed_at: Option<DateTime<Utc>>,
    pub items: Vec<OrderedItem>,
}

// ---------------------------------------------------------------------------
// /coupons
// ---------------------------------------------------------------------------

/// The wallet endpoint has answered both as a bare array and wrapped in
/// `{"coupon_wallets": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WalletResponse {
    Bare(Vec<WalletRecord>),
    Wrapped {
        #[serde(default)]
        coupon_wallets: Vec<WalletRecord>,
    },
}

impl WalletResponse {
    #[must_use]
    pub fn into_records(self) -> Vec<WalletRecord> {
        match self {
            WalletResponse::Bare(records) | WalletResponse::Wrapped { coupon_wallets: records } => {
                records
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletRecord {
    pub id: String,
    pub coupon_id: String,
    #[serde(default)]
    pub is_used: bool,
}

#[derive(Debug, Deserialize)]
pub struct CouponRecord {
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
    pub valid_until: String,
}

impl TryFrom<CouponRecord> for Coupon {
    type Error = ApiError;

    fn try_from(r: CouponRecord) -> Result<Self, Self::Error> {
        let valid_until = parse_timestamp(&r.valid_until).ok_or_else(|| ApiError::InvalidRecord {
            context: format!("coupon {}", r.id),
            reason: format!("unparseable valid_until '{}'", r.valid_until),
        })?;
        Ok(Coupon {
            id: r.id,
            code: r.code,
            description: r.description,
            discount_type: r.discount_type,
            discount_rate: r.discount_rate,
            discount_amount: r.discount_amount,
            min_order_amount: r.min_order_amount,
            max_discount_amount: r.max_discount_amount,
            valid_until,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterCouponBody<'a> {
    pub user_id: &'a str,
    pub code: &'a str,
}

// ---------------------------------------------------------------------------
// /users
// ---------------------------------------------------------------------------

/// Login responses have carried the token under three different names.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default, rename = "sessionToken")]
    pub session_token: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl LoginResponse {
    #[must_use]
    pub fn into_token(self) -> Option<String> {
        self.session_token
            .or(self.token)
            .or(self.access_token)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateAddressBody<'a> {
    pub user_address_id: &'a str,
    #[serde(flatten)]
    pub form: &'a shuttle_core::AddressForm,
}

#[derive(Debug, Serialize)]
pub struct RenameBody<'a> {
    pub name: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_item(quantity: i64) -> CartItemRecord {
        serde_json::from_value(serde_json::json!({
            "id": "ci-1",
            "product_id": "p1",
            "quantity": quantity,
            "option_type_1": "그립",
            "option_1": "G5",
            "option_2_type": "무게",
            "option_2_value": "4U",
            "created_at": "2025-07-01T12:30:00",
            "updated_at": "2025-07-01T12:30:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn cart_item_converts_both_option_column_spellings() {
        let record = CartRecord::try_from(cart_item(2)).unwrap();
        assert_eq!(record.quantity, 2);
        assert_eq!(record.options[0], OptionPair::new("그립", "G5"));
        assert_eq!(record.options[1], OptionPair::new("무게", "4U"));
        assert_eq!(record.options[2], OptionPair::default());
        assert!(record.created_at.is_some());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn zero_or_negative_quantity_is_rejected() {
        for q in [0, -3] {
            let err = CartRecord::try_from(cart_item(q)).unwrap_err();
            assert!(matches!(err, ApiError::InvalidRecord { .. }), "quantity {q}");
        }
    }

    #[test]
    fn product_maps_category_sub_and_list_price() {
        let record: ProductRecord = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "Astrox 99",
            "category_sub": "Yonex",
            "price_whole": 250_000,
            "price_sell": 199_000,
            "discount_rate": 20
        }))
        .unwrap();
        let product = Product::try_from(record).unwrap();
        assert_eq!(product.brand, "Yonex");
        assert_eq!(product.price_original, 250_000);
        assert_eq!(product.is_active, None);
    }

    #[test]
    fn product_without_brand_gets_default_and_bad_rate_is_rejected() {
        let record: ProductRecord =
            serde_json::from_value(serde_json::json!({"id": "p2", "name": "Grip"})).unwrap();
        assert_eq!(Product::try_from(record).unwrap().brand, DEFAULT_BRAND);

        let record: ProductRecord = serde_json::from_value(
            serde_json::json!({"id": "p3", "name": "X", "discount_rate": 140}),
        )
        .unwrap();
        assert!(Product::try_from(record).is_err());
    }

    #[test]
    fn wallet_response_accepts_both_shapes() {
        let bare: WalletResponse = serde_json::from_value(serde_json::json!([
            {"id": "w1", "coupon_id": "c1", "is_used": false}
        ]))
        .unwrap();
        assert_eq!(bare.into_records().len(), 1);
        let wrapped: WalletResponse = serde_json::from_value(serde_json::json!({
            "coupon_wallets": [{"id": "w1", "coupon_id": "c1"}, {"id": "w2", "coupon_id": "c2"}]
        }))
        .unwrap();
        assert_eq!(wrapped.into_records().len(), 2);
    }

    #[test]
    fn coupon_accepts_zoneless_expiry() {
        let record: CouponRecord = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "discount_type": "비율",
            "discount_rate": 10,
            "valid_until": "2025-12-31T23:59:59"
        }))
        .unwrap();
        let coupon = Coupon::try_from(record).unwrap();
        assert_eq!(coupon.valid_until.to_rfc3339(), "2025-12-31T23:59:59+00:00");
    }

    #[test]
    fn login_token_prefers_session_token() {
        let r: LoginResponse = serde_json::from_value(serde_json::json!({
            "access_token": "a", "sessionToken": "s"
        }))
        .unwrap();
        assert_eq!(r.into_token().as_deref(), Some("s"));
        let r: LoginResponse =
            serde_json::from_value(serde_json::json!({"access_token": "a", "token_type": "bearer"}))
                .unwrap();
        assert_eq!(r.into_token().as_deref(), Some("a"));
    }
}
