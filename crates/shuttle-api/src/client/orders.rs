use shuttle_core::checkout::{self, BuyNow, DraftBuilder, OrderDraft};
use shuttle_core::view::CartView;

use super::StoreClient;
use crate::error::ApiError;
use crate::types::{self, CreatedOrder, OrderDetailResponse, OrderRecord, OrdersResponse};

/// Orders listed per history fetch.
const ORDER_HISTORY_PAGE_SIZE: &str = "50";

/// An order the backend accepted, ready for payment hand-off.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order_id: String,
    pub draft: OrderDraft,
}

impl StoreClient {
    /// Submits a draft as a new order and returns the backend order id.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingToken`] / [`ApiError::Unauthorized`].
    /// - [`ApiError::Http`] / status / [`ApiError::Deserialize`] otherwise.
    pub async fn create_order(&self, draft: &OrderDraft) -> Result<String, ApiError> {
        let url = self.build_url("orders", &[])?;
        let response = self
            .authorized(self.client.post(url.clone()))?
            .json(draft)
            .send()
            .await?;
        let response = Self::check_status(response, &url)?;
        let created: CreatedOrder = Self::parse_json(response, "POST /orders").await?;
        tracing::info!(order_id = %created.id, total = draft.total_price, "order created");
        Ok(created.id)
    }

    /// Checks out the selected cart lines.
    ///
    /// Availability is re-checked against a freshly fetched catalog before
    /// the draft is built, so a product that sold out while the cart screen
    /// was open is caught here.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Checkout`] for empty selection, sold-out lines, address
    ///   or point problems.
    /// - Any error from [`Self::fetch_catalog`] or [`Self::create_order`].
    pub async fn place_cart_order(
        &self,
        view: &CartView,
        builder: &DraftBuilder,
    ) -> Result<PlacedOrder, ApiError> {
        let selected = view.selected_lines();
        if selected.is_empty() {
            return Err(shuttle_core::CheckoutError::NothingSelected.into());
        }
        let catalog = self.fetch_catalog().await?;
        checkout::ensure_available(&selected, &catalog)?;
        let draft = builder.from_cart(view)?;
        let order_id = self.create_order(&draft).await?;
        Ok(PlacedOrder { order_id, draft })
    }

    /// Checks out a single product directly.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Checkout`] for zero quantity, sold out, address or
    ///   point problems.
    /// - Any error from [`Self::create_order`].
    pub async fn place_buy_now_order(
        &self,
        item: &BuyNow,
        builder: &DraftBuilder,
    ) -> Result<PlacedOrder, ApiError> {
        let draft = builder.buy_now(item)?;
        let order_id = self.create_order(&draft).await?;
        Ok(PlacedOrder { order_id, draft })
    }

    /// The user's past orders with their items, newest first.
    ///
    /// Orders whose detail cannot be fetched are left out with a warning.
    ///
    /// # Errors
    ///
    /// Fails only if the order list itself cannot be fetched.
    pub async fn order_history(&self, user_id: &str) -> Result<Vec<OrderRecord>, ApiError> {
        let url = self.build_url(
            "orders",
            &[("page", "1"), ("items_per_page", ORDER_HISTORY_PAGE_SIZE)],
        )?;
        let response: OrdersResponse = self.get_json(url, "GET /orders").await?;

        let mine = response
            .orders
            .into_iter()
            .filter(|o| o.user_id.as_deref() == Some(user_id));

        let detailed = futures::future::join_all(mine.map(|summary| async move {
            let url = match self.build_url("orders/by_id", &[("order_id", &summary.id)]) {
                Ok(url) => url,
                Err(e) => {
                    tracing::error!(order_id = %summary.id, error = %e, "order detail URL rejected");
                    return None;
                }
            };
            match self
                .get_json::<OrderDetailResponse>(url, "GET /orders/by_id")
                .await
            {
                Ok(detail) => Some(OrderRecord {
                    placed_at: summary.created_at.as_deref().and_then(types::parse_timestamp),
                    items: detail.items,
                    summary,
                }),
                Err(ApiError::NotFound { .. }) => {
                    tracing::warn!(order_id = %summary.id, "order detail missing; skipping");
                    None
                }
                Err(e) => {
                    tracing::error!(order_id = %summary.id, error = %e, "order detail fetch failed");
                    None
                }
            }
        }))
        .await;

        let mut orders: Vec<OrderRecord> = detailed.into_iter().flatten().collect();
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        Ok(orders)
    }
}
