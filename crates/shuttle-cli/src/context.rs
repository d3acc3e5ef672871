//! Shared state for one CLI invocation.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context as _;
use shuttle_api::{ApiError, FileTokenStore, ScreenScope, StoreClient, TokenStore};
use shuttle_core::AppConfig;

pub(crate) struct Context {
    pub(crate) config: AppConfig,
    pub(crate) client: StoreClient,
    scope: Arc<ScreenScope>,
    user_override: Option<String>,
}

impl Context {
    /// Builds the client over the file token store and arms Ctrl-C to
    /// cancel in-flight requests.
    pub(crate) fn new(config: AppConfig, user_override: Option<String>) -> anyhow::Result<Self> {
        let tokens: Arc<dyn TokenStore> =
            Arc::new(FileTokenStore::new(config.token_store_path.clone()));
        let client = StoreClient::from_config(&config, tokens)?;

        let scope = Arc::new(ScreenScope::new());
        let watcher = Arc::clone(&scope);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupted; cancelling requests");
                watcher.close();
            }
        });

        Ok(Self {
            config,
            client,
            scope,
            user_override,
        })
    }

    /// Runs a request so that Ctrl-C resolves it to [`ApiError::Cancelled`].
    pub(crate) async fn call<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.scope.run(work).await
    }

    /// User id from `--user`, then `SHUTTLE_USER_ID`, then the signed-in
    /// profile.
    pub(crate) async fn user_id(&self) -> anyhow::Result<String> {
        if let Some(id) = self
            .user_override
            .as_deref()
            .or(self.config.user_id.as_deref())
        {
            return Ok(id.to_string());
        }
        let profile = self
            .call(self.client.fetch_profile())
            .await
            .context("no user id given; pass --user, set SHUTTLE_USER_ID or sign in")?;
        Ok(profile.id)
    }
}
