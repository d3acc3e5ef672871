//! Payment hand-off: provider choice, request payload for the external
//! payment SDK, and parsing of its callback.

use chrono::{DateTime, Utc};
use rand::distr::{Alphanumeric, SampleString};
use serde::{Deserialize, Serialize};

use crate::app_config::ChannelKeys;

pub const CURRENCY_KRW: &str = "CURRENCY_KRW";

/// Length of the random suffix on generated payment ids.
const PAYMENT_ID_SUFFIX_LEN: usize = 6;

/// Sub-choice under "other payment methods".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneralMethod {
    Card,
    Mobile,
}

/// The payment provider the shopper picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentProvider {
    TossPay,
    KakaoPay,
    Other(GeneralMethod),
}

impl PaymentProvider {
    /// Parses the provider and, for `other`, the card/mobile sub-choice.
    #[must_use]
    pub fn parse(provider: &str, method: Option<&str>) -> Option<Self> {
        match provider {
            "tosspay" => Some(Self::TossPay),
            "kakaopay" => Some(Self::KakaoPay),
            "other" | "normal" => match method.unwrap_or("card") {
                "card" => Some(Self::Other(GeneralMethod::Card)),
                "mobile" | "phone" => Some(Self::Other(GeneralMethod::Mobile)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Pay-method code the SDK expects for this provider.
    #[must_use]
    pub fn pay_method(self) -> PayMethod {
        match self {
            Self::TossPay | Self::KakaoPay => PayMethod::EasyPay,
            Self::Other(GeneralMethod::Card) => PayMethod::Card,
            Self::Other(GeneralMethod::Mobile) => PayMethod::Mobile,
        }
    }

    /// Channel key routing this provider's payments.
    #[must_use]
    pub fn channel_key(self, keys: &ChannelKeys) -> &str {
        match self {
            Self::TossPay => &keys.tosspay,
            Self::KakaoPay => &keys.kakaopay,
            Self::Other(GeneralMethod::Card) => &keys.card,
            Self::Other(GeneralMethod::Mobile) => &keys.mobile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayMethod {
    EasyPay,
    Card,
    Mobile,
}

/// Request object handed to the payment SDK component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub store_id: String,
    pub channel_key: String,
    pub payment_id: String,
    pub order_name: String,
    pub total_amount: u64,
    pub currency: String,
    pub pay_method: PayMethod,
    /// Backend order id, echoed back by the gateway.
    pub custom_data: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notice_urls: Vec<String>,
}

/// Generates a payment id from the wall clock and a short random suffix.
///
/// Unique enough within one device session; the gateway rejects duplicates
/// per merchant.
#[must_use]
pub fn generate_payment_id(now: DateTime<Utc>) -> String {
    let suffix = Alphanumeric.sample_string(&mut rand::rng(), PAYMENT_ID_SUFFIX_LEN);
    format!("payment-{}-{suffix}", now.timestamp_millis())
}

/// Order name shown on the payment sheet.
#[must_use]
pub fn order_name(item_names: &[&str]) -> String {
    match item_names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, rest @ ..] => format!("{first} 외 {}건", rest.len()),
    }
}

/// Callback payload from the payment SDK.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCallback {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub payment_id: String,
    #[serde(default)]
    pub tx_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Paid {
        payment_id: String,
        tx_id: Option<String>,
    },
    Failed {
        payment_id: String,
        code: String,
        message: String,
    },
}

impl From<PaymentCallback> for PaymentOutcome {
    fn from(cb: PaymentCallback) -> Self {
        match cb.code {
            Some(code) => PaymentOutcome::Failed {
                payment_id: cb.payment_id,
                code,
                message: cb.message.unwrap_or_default(),
            },
            None => PaymentOutcome::Paid {
                payment_id: cb.payment_id,
                tx_id: cb.tx_id,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn keys() -> ChannelKeys {
        ChannelKeys {
            tosspay: "ck-toss".to_string(),
            kakaopay: "ck-kakao".to_string(),
            card: "ck-card".to_string(),
            mobile: "ck-mobile".to_string(),
        }
    }

    #[test]
    fn provider_table() {
        let cases = [
            ("tosspay", None, PayMethod::EasyPay, "ck-toss"),
            ("kakaopay", None, PayMethod::EasyPay, "ck-kakao"),
            ("other", Some("card"), PayMethod::Card, "ck-card"),
            ("other", Some("mobile"), PayMethod::Mobile, "ck-mobile"),
            ("other", None, PayMethod::Card, "ck-card"),
        ];
        let keys = keys();
        for (provider, method, pay_method, channel) in cases {
            let p = PaymentProvider::parse(provider, method).expect(provider);
            assert_eq!(p.pay_method(), pay_method, "{provider}/{method:?}");
            assert_eq!(p.channel_key(&keys), channel, "{provider}/{method:?}");
        }
    }

    #[test]
    fn unknown_provider_or_method_is_none() {
        assert!(PaymentProvider::parse("paypal", None).is_none());
        assert!(PaymentProvider::parse("other", Some("vbank")).is_none());
    }

    #[test]
    fn payment_id_has_timestamp_and_suffix() {
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();
        let id = generate_payment_id(now);
        let prefix = format!("payment-{}-", now.timestamp_millis());
        assert!(id.starts_with(&prefix), "{id}");
        let suffix = &id[prefix.len()..];
        assert_eq!(suffix.len(), PAYMENT_ID_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn payment_ids_differ_within_same_millisecond() {
        let now = Utc::now();
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| generate_payment_id(now)).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn order_name_summarises_extra_items() {
        assert_eq!(order_name(&[]), "");
        assert_eq!(order_name(&["Astrox 99"]), "Astrox 99");
        assert_eq!(order_name(&["Astrox 99", "BG66", "Grip"]), "Astrox 99 외 2건");
    }

    #[test]
    fn request_serializes_camel_case() {
        let req = PaymentRequest {
            store_id: "store-1".to_string(),
            channel_key: "ck-toss".to_string(),
            payment_id: "payment-1-abc".to_string(),
            order_name: "Astrox 99".to_string(),
            total_amount: 23_250,
            currency: CURRENCY_KRW.to_string(),
            pay_method: PayMethod::EasyPay,
            custom_data: "order-9".to_string(),
            notice_urls: Vec::new(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["storeId"], "store-1");
        assert_eq!(json["payMethod"], "EASY_PAY");
        assert_eq!(json["totalAmount"], 23_250);
        assert!(json.get("noticeUrls").is_none());
    }

    #[test]
    fn callback_with_code_is_failure() {
        let cb: PaymentCallback = serde_json::from_value(serde_json::json!({
            "code": "FAILURE_TYPE_PG",
            "message": "카드 한도 초과",
            "paymentId": "payment-1-abc"
        }))
        .unwrap();
        assert_eq!(
            PaymentOutcome::from(cb),
            PaymentOutcome::Failed {
                payment_id: "payment-1-abc".to_string(),
                code: "FAILURE_TYPE_PG".to_string(),
                message: "카드 한도 초과".to_string()
            }
        );
    }

    #[test]
    fn callback_without_code_is_paid() {
        let cb: PaymentCallback = serde_json::from_value(serde_json::json!({
            "paymentId": "payment-1-abc",
            "txId": "tx-77"
        }))
        .unwrap();
        assert_eq!(
            PaymentOutcome::from(cb),
            PaymentOutcome::Paid {
                payment_id: "payment-1-abc".to_string(),
                tx_id: Some("tx-77".to_string())
            }
        );
    }
}
