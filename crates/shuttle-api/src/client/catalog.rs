use shuttle_core::catalog::{self, Catalog, Product};

use super::StoreClient;
use crate::error::ApiError;
use crate::types::ProductsResponse;

impl StoreClient {
    /// Fetches a catalog snapshot: the first `catalog_page_size` products.
    ///
    /// Records that fail conversion (e.g. an out-of-range discount rate) are
    /// dropped with a warning.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::NotFound`] / [`ApiError::UnexpectedStatus`] on non-2xx.
    /// - [`ApiError::Deserialize`] if the body is not a product list.
    pub async fn fetch_catalog(&self) -> Result<Catalog, ApiError> {
        let page_size = self.catalog_page_size.to_string();
        let url = self.build_url("products", &[("page", "1"), ("items_per_page", &page_size)])?;
        let response: ProductsResponse = self.get_json(url, "GET /products").await?;

        let products = response
            .products
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                Product::try_from(record)
                    .map_err(|e| tracing::warn!(product_id = %id, error = %e, "skipping product"))
                    .ok()
            })
            .collect();
        Ok(Catalog::new(products))
    }

    /// Products for the home listing. Falls back to placeholder products when
    /// the catalog cannot be fetched; this is the only screen that degrades
    /// instead of reporting the error.
    pub async fn home_listing(&self) -> Vec<Product> {
        match self.fetch_catalog().await {
            Ok(catalog) => catalog.products().to_vec(),
            Err(e) => {
                tracing::warn!(error = %e, "catalog fetch failed; showing fallback listing");
                catalog::fallback_listing()
            }
        }
    }
}
