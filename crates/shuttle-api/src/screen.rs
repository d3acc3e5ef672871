//! Lifetime of one screen visit.
//!
//! Fetches started for a screen run through its [`ScreenScope`]; once the
//! scope is closed or dropped they resolve to [`ApiError::Cancelled`] and
//! their results are never applied.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::ApiError;

#[derive(Debug, Default)]
pub struct ScreenScope {
    cancel: CancellationToken,
}

impl ScreenScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `work` until it finishes or the scope closes, whichever is first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Cancelled`] if the scope is closed before `work`
    /// completes, otherwise whatever `work` returns.
    pub async fn run<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(ApiError::Cancelled),
            result = work => result,
        }
    }

    /// A token that fires when this scope closes, for work spawned onto
    /// other tasks.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.cancel.child_token()
    }

    pub fn close(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
