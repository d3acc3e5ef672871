use shuttle_core::{AddressError, CartError, CheckoutError};
use thiserror::Error;

/// Errors returned by [`crate::StoreClient`] and the state containers built
/// on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record parsed but violates a domain rule (e.g. zero quantity).
    #[error("invalid record in {context}: {reason}")]
    InvalidRecord { context: String, reason: String },

    /// `POST /cartitems` answered 422: the product and option combination is
    /// already in the cart.
    #[error("product {product_id} with these options is already in the cart")]
    AlreadyInCart { product_id: String },

    /// Social login answered 422: the account was withdrawn recently.
    #[error("account was withdrawn and cannot sign in yet")]
    AccountWithdrawn,

    #[error("unauthorized: {url}")]
    Unauthorized { url: String },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// A bearer-authenticated call was made with no stored session token.
    #[error("no session token stored; sign in first")]
    MissingToken,

    /// Login succeeded but the response carried no token.
    #[error("login response from {url} carried no session token")]
    TokenMissingFromResponse { url: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// A request path that does not join onto the base URL.
    #[error("invalid request path \"{path}\": {reason}")]
    InvalidUrl { path: String, reason: String },

    #[error("token store error: {0}")]
    TokenStore(String),

    /// The screen scope that started the request was closed.
    #[error("request cancelled")]
    Cancelled,

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

impl ApiError {
    /// Alert text shown to the shopper.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::AlreadyInCart { .. } => "이미 장바구니에 담긴 상품입니다.",
            ApiError::AccountWithdrawn => "탈퇴한 회원은 탈퇴일로부터 30일 이후 재가입 가능",
            ApiError::Unauthorized { .. } | ApiError::MissingToken => {
                "로그인이 만료되었습니다. 다시 로그인해주세요."
            }
            ApiError::Address(e) => e.user_message(),
            ApiError::Checkout(e) => e.user_message(),
            ApiError::Cancelled => "요청이 취소되었습니다.",
            ApiError::Http(_)
            | ApiError::Deserialize { .. }
            | ApiError::InvalidRecord { .. }
            | ApiError::NotFound { .. }
            | ApiError::UnexpectedStatus { .. }
            | ApiError::TokenMissingFromResponse { .. }
            | ApiError::InvalidBaseUrl { .. }
            | ApiError::InvalidUrl { .. }
            | ApiError::TokenStore(_)
            | ApiError::Cart(_) => "요청 처리 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.",
        }
    }
}
