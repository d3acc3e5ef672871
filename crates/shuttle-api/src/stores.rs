//! Shared state containers for values several screens read, such as the
//! cart badge count.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::client::StoreClient;
use crate::error::ApiError;

/// Anything that can report the server-side cart size.
pub trait CartCountSource {
    fn cart_count(&self, user_id: &str) -> impl Future<Output = Result<u64, ApiError>> + Send;
}

impl CartCountSource for StoreClient {
    async fn cart_count(&self, user_id: &str) -> Result<u64, ApiError> {
        self.fetch_cart_count(user_id).await
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartCountState {
    pub count: u64,
    pub loading: bool,
    /// Message from the last failed refresh, cleared by the next attempt.
    pub error: Option<String>,
}

/// Cart badge count, shared by cloning the handle.
#[derive(Debug, Clone, Default)]
pub struct CartCountStore {
    state: Arc<Mutex<CartCountState>>,
}

impl CartCountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CartCountState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> CartCountState {
        self.lock().clone()
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.lock().count
    }

    pub fn set_count(&self, count: u64) {
        self.lock().count = count;
    }

    pub fn reset(&self) {
        *self.lock() = CartCountState::default();
    }

    /// Re-fetches the count. Failures are recorded in the state, not
    /// returned; the previous count is kept.
    pub async fn refresh<S: CartCountSource>(&self, source: &S, user_id: &str) {
        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }
        let result = source.cart_count(user_id).await;
        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(count) => state.count = count,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "cart count refresh failed");
                state.error = Some(e.to_string());
            }
        }
    }
}
