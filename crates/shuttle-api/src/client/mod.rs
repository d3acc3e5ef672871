//! HTTP client for the storefront REST backend.
//!
//! Endpoint groups live in submodules as further `impl StoreClient` blocks.
//! Requests are never retried; failures surface as [`ApiError`].

mod address;
mod auth;
mod cart;
mod catalog;
mod coupons;
mod orders;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use shuttle_core::AppConfig;

use crate::error::ApiError;
use crate::token_store::{TokenStore, SESSION_TOKEN_KEY};

pub use cart::CartPage;
pub use orders::PlacedOrder;

const DEFAULT_CATALOG_PAGE_SIZE: u32 = 500;

/// Client for the storefront backend.
///
/// Use [`StoreClient::from_config`] in the binary or
/// [`StoreClient::with_base_url`] to point at a mock server in tests.
pub struct StoreClient {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
    catalog_page_size: u32,
}

impl StoreClient {
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the `reqwest::Client` cannot be built or
    /// [`ApiError::InvalidBaseUrl`] if the configured base URL does not parse.
    pub fn from_config(config: &AppConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let client = Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            tokens,
        )?;
        Ok(client.with_catalog_page_size(config.catalog_page_size))
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the `reqwest::Client` cannot be built or
    /// [`ApiError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so relative joins append to any path
        // prefix instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
            tokens,
            catalog_page_size: DEFAULT_CATALOG_PAGE_SIZE,
        })
    }

    #[must_use]
    pub fn with_catalog_page_size(mut self, size: u32) -> Self {
        self.catalog_page_size = size.max(1);
        self
    }

    #[must_use]
    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    /// Joins `path` onto the base URL and appends percent-encoded `query`
    /// pairs.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidUrl`] when `path` does not join onto the base URL.
    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Session token for bearer-authenticated calls.
    fn session_token(&self) -> Result<String, ApiError> {
        self.tokens
            .get(SESSION_TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingToken)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        Ok(request.bearer_auth(self.session_token()?))
    }

    /// Maps non-2xx statuses to typed errors. Endpoint-specific statuses
    /// (e.g. 422) must be checked by the caller first.
    fn check_status(response: Response, url: &Url) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = url.to_string();
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized { url },
            StatusCode::NOT_FOUND => ApiError::NotFound { url },
            _ => ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            },
        })
    }

    async fn parse_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, ApiError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = Self::check_status(response, &url)?;
        Self::parse_json(response, context).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
