use reqwest::StatusCode;
use shuttle_core::cart::{CartLine, CartRecord, OptionColumns, OptionSelection};
use shuttle_core::view::{CartView, LineEdit, LineUpdatePlan};

use super::StoreClient;
use crate::error::ApiError;
use crate::types::{CartItemsResponse, CreateCartItemBody, UpdateCartItemBody};

/// One fetch of the user's cart.
#[derive(Debug, Clone)]
pub struct CartPage {
    pub records: Vec<CartRecord>,
    /// Server-side count, used for the cart badge.
    pub total_count: u64,
}

impl StoreClient {
    /// Fetches the user's raw cart records.
    ///
    /// Records with a non-positive quantity are dropped with a warning.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::NotFound`] / [`ApiError::UnexpectedStatus`] on non-2xx.
    /// - [`ApiError::Deserialize`] if the body does not match.
    pub async fn fetch_cart(&self, user_id: &str) -> Result<CartPage, ApiError> {
        let url = self.build_url("cartitems", &[("user_id", user_id)])?;
        let response: CartItemsResponse = self.get_json(url, "GET /cartitems").await?;

        let records = response
            .cartitems
            .into_iter()
            .filter_map(|item| match CartRecord::try_from(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(user_id, error = %e, "skipping cart item");
                    None
                }
            })
            .collect();
        Ok(CartPage {
            records,
            total_count: response.total_count,
        })
    }

    /// Server-side cart size for the badge.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_cart`].
    pub async fn fetch_cart_count(&self, user_id: &str) -> Result<u64, ApiError> {
        Ok(self.fetch_cart(user_id).await?.total_count)
    }

    /// Fetches cart and catalog concurrently and merges them into a fresh
    /// [`CartView`] with nothing selected.
    ///
    /// # Errors
    ///
    /// Fails if either fetch fails; the cart screen reports the error rather
    /// than showing placeholder data.
    pub async fn load_cart_view(&self, user_id: &str) -> Result<CartView, ApiError> {
        let (page, catalog) = futures::try_join!(self.fetch_cart(user_id), self.fetch_catalog())?;
        Ok(CartView::from_records(&page.records, &catalog))
    }

    /// Re-fetches the cart into an existing view, keeping the selection for
    /// lines that still exist.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load_cart_view`]; on error `view` is untouched.
    pub async fn refresh_cart_view(&self, user_id: &str, view: &mut CartView) -> Result<(), ApiError> {
        let fresh = self.load_cart_view(user_id).await?;
        view.replace_lines(fresh.lines().to_vec());
        Ok(())
    }

    /// Adds a product to the cart.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidRecord`] if `quantity` is 0 (nothing is sent).
    /// - [`ApiError::Cart`] with `TooManyOptions` past three options (nothing is sent).
    /// - [`ApiError::AlreadyInCart`] when the backend answers 422.
    /// - [`ApiError::Http`] / status errors otherwise.
    pub async fn add_to_cart(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: u32,
        options: &[OptionSelection],
    ) -> Result<(), ApiError> {
        if quantity == 0 {
            return Err(ApiError::InvalidRecord {
                context: format!("add {product_id} to cart"),
                reason: "quantity must be at least 1".to_string(),
            });
        }
        let url = self.build_url("cartitems", &[])?;
        let body = CreateCartItemBody {
            user_id,
            product_id,
            quantity,
            options: OptionColumns::from_selections(options)?,
        };
        let response = self.client.post(url.clone()).json(&body).send().await?;
        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(ApiError::AlreadyInCart {
                product_id: product_id.to_string(),
            });
        }
        Self::check_status(response, &url)?;
        tracing::debug!(user_id, product_id, quantity, "added to cart");
        Ok(())
    }

    /// Deletes one cart entry on the server.
    ///
    /// # Errors
    ///
    /// [`ApiError::Http`] or a status error.
    pub async fn remove_cart_item(&self, cartitem_id: &str) -> Result<(), ApiError> {
        let url = self.build_url("cartitems", &[("cartitem_id", cartitem_id)])?;
        let response = self.client.delete(url.clone()).send().await?;
        Self::check_status(response, &url)?;
        Ok(())
    }

    /// Pushes a line's quantity and options to the server.
    ///
    /// # Errors
    ///
    /// [`ApiError::Http`] or a status error.
    pub async fn update_cart_item(&self, user_id: &str, line: &CartLine) -> Result<(), ApiError> {
        self.put_cart_item(user_id, &line.id, &line.product_id, line.quantity, &line.options)
            .await
    }

    async fn put_cart_item(
        &self,
        user_id: &str,
        cartitem_id: &str,
        product_id: &str,
        quantity: u32,
        options: &[OptionSelection],
    ) -> Result<(), ApiError> {
        let url = self.build_url("cartitems", &[])?;
        let body = UpdateCartItemBody {
            cartitem_id,
            user_id,
            product_id,
            quantity,
            options: OptionColumns::from_selections(options)?,
        };
        let response = self.client.put(url.clone()).json(&body).send().await?;
        Self::check_status(response, &url)?;
        Ok(())
    }

    /// Deletes one line on the server, then from `view`.
    ///
    /// # Errors
    ///
    /// On any server error `view` is left unchanged.
    pub async fn delete_line(&self, view: &mut CartView, line_id: &str) -> Result<(), ApiError> {
        self.remove_cart_item(line_id).await?;
        view.remove_line(line_id);
        Ok(())
    }

    /// Deletes every selected line concurrently, then removes them from
    /// `view` and its selection. Returns the number removed.
    ///
    /// # Errors
    ///
    /// On the first failure `view` is left unchanged; deletions that already
    /// went through show up on the next refresh.
    pub async fn delete_selected(&self, view: &mut CartView) -> Result<usize, ApiError> {
        let ids = view.selected_ids();
        if ids.is_empty() {
            return Ok(0);
        }
        futures::future::try_join_all(ids.iter().map(|id| self.remove_cart_item(id))).await?;
        Ok(view.remove_lines(&ids))
    }

    /// Persists a locally edited line (see [`CartView::edit_line`]).
    ///
    /// When another line already holds the same product and option set, the
    /// quantities merge into that line and the edited line is deleted, on the
    /// server and in `view`. A selected edited line leaves the surviving
    /// line selected.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Cart`] if `line_id` is not in `view`.
    /// - [`ApiError::Http`] / status errors; `view` is unchanged on failure.
    pub async fn persist_line_update(
        &self,
        user_id: &str,
        view: &mut CartView,
        line_id: &str,
    ) -> Result<LineUpdatePlan, ApiError> {
        let plan = view.plan_line_update(line_id)?;
        let edited = view
            .line(line_id)
            .cloned()
            .ok_or_else(|| shuttle_core::CartError::UnknownLine(line_id.to_string()))?;

        match &plan {
            LineUpdatePlan::Replace { .. } => {
                self.update_cart_item(user_id, &edited).await?;
            }
            LineUpdatePlan::Merge {
                into_line_id,
                quantity,
                remove_line_id,
            } => {
                self.put_cart_item(
                    user_id,
                    into_line_id,
                    &edited.product_id,
                    *quantity,
                    &edited.options,
                )
                .await?;
                self.remove_cart_item(remove_line_id).await?;
                let was_selected = view.selection().contains(remove_line_id);
                view.edit_line(
                    into_line_id,
                    LineEdit {
                        quantity: *quantity,
                        options: None,
                    },
                )?;
                view.remove_line(remove_line_id);
                if was_selected && !view.selection().contains(into_line_id) {
                    view.select_one(into_line_id);
                }
            }
        }
        tracing::debug!(user_id, line_id, ?plan, "persisted cart line");
        Ok(plan)
    }
}
