use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Channel keys for each payment route, as issued by the payment gateway
/// console for this store.
#[derive(Clone, PartialEq, Eq)]
pub struct ChannelKeys {
    pub tosspay: String,
    pub kakaopay: String,
    pub card: String,
    pub mobile: String,
}

impl std::fmt::Debug for ChannelKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelKeys")
            .field("tosspay", &"[redacted]")
            .field("kakaopay", &"[redacted]")
            .field("card", &"[redacted]")
            .field("mobile", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub api_base_url: String,
    pub image_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub catalog_page_size: u32,
    pub token_store_path: PathBuf,
    pub user_id: Option<String>,
    pub payment_store_id: String,
    pub channel_keys: ChannelKeys,
    pub payment_notice_url: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("api_base_url", &self.api_base_url)
            .field("image_base_url", &self.image_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("catalog_page_size", &self.catalog_page_size)
            .field("token_store_path", &self.token_store_path)
            .field("user_id", &self.user_id)
            .field("payment_store_id", &self.payment_store_id)
            .field("channel_keys", &self.channel_keys)
            .field("payment_notice_url", &self.payment_notice_url)
            .finish()
    }
}
