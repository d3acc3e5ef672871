use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Local cart edits that cannot be applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("cart line {0} is not in the cart")]
    UnknownLine(String),

    #[error("{given} options given but a cart entry holds at most {max}")]
    TooManyOptions { given: usize, max: usize },
}

impl CartError {
    /// Alert text shown to the shopper.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            CartError::UnknownLine(_) => "장바구니에 없는 상품입니다.",
            CartError::TooManyOptions { .. } => "옵션은 최대 3개까지 선택할 수 있습니다.",
        }
    }
}

/// Address input rejected before any request is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("required address fields are empty: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl AddressError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            AddressError::MissingFields(_) => "우편번호, 주소, 수령인, 휴대폰은 필수입니다.",
        }
    }
}

/// Reasons an order draft cannot be built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("no cart lines are selected")]
    NothingSelected,

    #[error("sold out: {}", .names.join(", "))]
    SoldOut { names: Vec<String> },

    #[error("buy-now quantity must be at least 1")]
    ZeroQuantity,

    #[error("point discount {points} exceeds order subtotal {subtotal}")]
    PointsExceedSubtotal { points: u64, subtotal: u64 },

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Options(#[from] CartError),
}

impl CheckoutError {
    /// Alert text shown to the shopper.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            CheckoutError::NothingSelected => "선택된 상품이 없습니다.",
            CheckoutError::SoldOut { .. } => {
                "선택한 상품 중 품절된 상품이 있습니다. 장바구니를 확인해주세요."
            }
            CheckoutError::ZeroQuantity => "수량을 1개 이상 선택해주세요.",
            CheckoutError::PointsExceedSubtotal { .. } => {
                "사용 포인트가 상품 금액을 초과할 수 없습니다."
            }
            CheckoutError::Address(e) => e.user_message(),
            CheckoutError::Options(e) => e.user_message(),
        }
    }
}
