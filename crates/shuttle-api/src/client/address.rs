use shuttle_core::address::{Address, AddressForm};

use super::StoreClient;
use crate::error::ApiError;
use crate::types::UpdateAddressBody;

const ADDRESS_PATH: &str = "users/user_address";

impl StoreClient {
    /// Lists the signed-in user's saved addresses.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingToken`] when no session token is stored.
    /// - [`ApiError::Unauthorized`] when the token is rejected.
    /// - [`ApiError::Http`] / [`ApiError::Deserialize`] otherwise.
    pub async fn list_addresses(&self) -> Result<Vec<Address>, ApiError> {
        let url = self.build_url(ADDRESS_PATH, &[])?;
        let response = self.authorized(self.client.get(url.clone()))?.send().await?;
        let response = Self::check_status(response, &url)?;
        Self::parse_json(response, "GET /users/user_address").await
    }

    /// Saves a new address. The form is validated before any request.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Address`] when a required field is blank.
    /// - [`ApiError::MissingToken`] / [`ApiError::Unauthorized`].
    /// - [`ApiError::Http`] / status errors otherwise.
    pub async fn create_address(&self, form: &AddressForm) -> Result<(), ApiError> {
        form.validate()?;
        let url = self.build_url(ADDRESS_PATH, &[])?;
        let response = self
            .authorized(self.client.post(url.clone()))?
            .json(form)
            .send()
            .await?;
        Self::check_status(response, &url)?;
        Ok(())
    }

    /// Replaces a saved address. The form is validated before any request.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_address`].
    pub async fn update_address(&self, address_id: &str, form: &AddressForm) -> Result<(), ApiError> {
        form.validate()?;
        let url = self.build_url(ADDRESS_PATH, &[])?;
        let body = UpdateAddressBody {
            user_address_id: address_id,
            form,
        };
        let response = self
            .authorized(self.client.put(url.clone()))?
            .json(&body)
            .send()
            .await?;
        Self::check_status(response, &url)?;
        Ok(())
    }

    /// # Errors
    ///
    /// - [`ApiError::MissingToken`] / [`ApiError::Unauthorized`].
    /// - [`ApiError::Http`] / status errors otherwise.
    pub async fn delete_address(&self, address_id: &str) -> Result<(), ApiError> {
        let url = self.build_url(ADDRESS_PATH, &[("user_address_id", address_id)])?;
        let response = self.authorized(self.client.delete(url.clone()))?.send().await?;
        Self::check_status(response, &url)?;
        Ok(())
    }
}
