use chrono::{DateTime, Utc};
use shuttle_core::coupon::{self, Coupon, WalletEntry};

use super::StoreClient;
use crate::error::ApiError;
use crate::types::{CouponRecord, RegisterCouponBody, WalletRecord, WalletResponse};

impl StoreClient {
    /// The user's coupon wallet, each entry joined with its coupon details.
    ///
    /// Details are fetched concurrently. An entry whose detail fetch fails
    /// keeps `coupon: None` and is logged, so one bad coupon does not hide
    /// the rest.
    ///
    /// # Errors
    ///
    /// Fails only if the wallet list itself cannot be fetched.
    pub async fn coupon_wallet(&self, user_id: &str) -> Result<Vec<WalletEntry>, ApiError> {
        let url = self.build_url("coupons/wallet/by_user", &[("user_id", user_id)])?;
        let response: WalletResponse = self.get_json(url, "GET /coupons/wallet/by_user").await?;

        let entries = response.into_records().into_iter().map(|w| self.join_coupon(w));
        Ok(futures::future::join_all(entries).await)
    }

    async fn join_coupon(&self, wallet: WalletRecord) -> WalletEntry {
        let coupon = match self.fetch_coupon(&wallet.coupon_id).await {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!(coupon_id = %wallet.coupon_id, error = %e, "coupon detail fetch failed");
                None
            }
        };
        WalletEntry {
            id: wallet.id,
            coupon_id: wallet.coupon_id,
            is_used: wallet.is_used,
            coupon,
        }
    }

    /// # Errors
    ///
    /// - [`ApiError::NotFound`] for an unknown coupon id.
    /// - [`ApiError::InvalidRecord`] if the expiry cannot be parsed.
    /// - [`ApiError::Http`] / status / [`ApiError::Deserialize`] otherwise.
    pub async fn fetch_coupon(&self, coupon_id: &str) -> Result<Coupon, ApiError> {
        let url = self.build_url("coupons/by_id", &[("coupon_id", coupon_id)])?;
        let record: CouponRecord = self.get_json(url, "GET /coupons/by_id").await?;
        Coupon::try_from(record)
    }

    /// Wallet entries usable at `now`: unused, with details, not expired.
    ///
    /// # Errors
    ///
    /// Same as [`Self::coupon_wallet`].
    pub async fn available_coupons(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<WalletEntry>, ApiError> {
        let wallet = self.coupon_wallet(user_id).await?;
        Ok(coupon::available_coupons(&wallet, now)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Adds a coupon to the user's wallet by its code.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] when the code does not exist.
    /// - [`ApiError::UnexpectedStatus`] with 422 when the code is already
    ///   registered or expired.
    /// - [`ApiError::Http`] otherwise.
    pub async fn register_coupon(&self, user_id: &str, code: &str) -> Result<(), ApiError> {
        let url = self.build_url("coupons/wallet/by_code", &[])?;
        let body = RegisterCouponBody { user_id, code };
        let response = self.client.post(url.clone()).json(&body).send().await?;
        Self::check_status(response, &url)?;
        Ok(())
    }
}
