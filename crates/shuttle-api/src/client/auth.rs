use reqwest::StatusCode;
use shuttle_core::session::{LoginProvider, UserSession};

use super::StoreClient;
use crate::error::ApiError;
use crate::token_store::SESSION_TOKEN_KEY;
use crate::types::{LoginResponse, RenameBody};

impl StoreClient {
    /// Exchanges a provider token for a session, stores the session token,
    /// then loads the profile.
    ///
    /// # Errors
    ///
    /// - [`ApiError::AccountWithdrawn`] when the backend answers 422.
    /// - [`ApiError::TokenMissingFromResponse`] when a 2xx carries no token.
    /// - [`ApiError::TokenStore`] if the token cannot be saved.
    /// - Any error from [`Self::fetch_profile`].
    pub async fn social_login(
        &self,
        provider: LoginProvider,
        provider_token: &str,
    ) -> Result<UserSession, ApiError> {
        let url = self.build_url("users/social-login", &[])?;
        let form = [
            ("grant_type", "password"),
            ("username", provider.as_form_value()),
            ("password", provider_token),
        ];
        let response = self.client.post(url.clone()).form(&form).send().await?;
        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(ApiError::AccountWithdrawn);
        }
        self.finish_login(response, &url).await
    }

    /// Email and password sign-in.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] or a status error on bad credentials.
    /// - The same token and profile errors as [`Self::social_login`].
    pub async fn password_login(&self, email: &str, password: &str) -> Result<UserSession, ApiError> {
        let url = self.build_url("users/login", &[])?;
        let form = [("username", email), ("password", password)];
        let response = self.client.post(url.clone()).form(&form).send().await?;
        self.finish_login(response, &url).await
    }

    async fn finish_login(
        &self,
        response: reqwest::Response,
        url: &reqwest::Url,
    ) -> Result<UserSession, ApiError> {
        let response = Self::check_status(response, url)?;
        let login: LoginResponse = Self::parse_json(response, url.path()).await?;
        let token = login
            .into_token()
            .ok_or_else(|| ApiError::TokenMissingFromResponse {
                url: url.to_string(),
            })?;
        self.tokens.set(SESSION_TOKEN_KEY, &token)?;

        let session = self.fetch_profile().await?;
        tracing::info!(user_id = %session.id, "signed in");
        Ok(session)
    }

    /// Profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingToken`] / [`ApiError::Unauthorized`].
    /// - [`ApiError::Http`] / [`ApiError::Deserialize`] otherwise.
    pub async fn fetch_profile(&self) -> Result<UserSession, ApiError> {
        let url = self.build_url("users", &[])?;
        let response = self.authorized(self.client.get(url.clone()))?.send().await?;
        let response = Self::check_status(response, &url)?;
        Self::parse_json(response, "GET /users").await
    }

    /// Changes the display name.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingToken`] / [`ApiError::Unauthorized`].
    /// - [`ApiError::Http`] / status errors otherwise.
    pub async fn rename(&self, name: &str) -> Result<(), ApiError> {
        let url = self.build_url("users", &[])?;
        let response = self
            .authorized(self.client.put(url.clone()))?
            .json(&RenameBody { name })
            .send()
            .await?;
        Self::check_status(response, &url)?;
        Ok(())
    }

    /// Forgets the stored session token. Nothing is sent to the backend.
    ///
    /// # Errors
    ///
    /// [`ApiError::TokenStore`] if the token cannot be removed.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.tokens.delete(SESSION_TOKEN_KEY)
    }
}
