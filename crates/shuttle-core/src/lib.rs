pub mod address;
pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod coupon;
pub mod error;
pub mod payment;
pub mod selection;
pub mod session;
pub mod totals;
pub mod view;
pub mod wishlist;

pub use address::{preferred_address, Address, AddressForm};
pub use app_config::{AppConfig, ChannelKeys, Environment};
pub use cart::{CartLine, CartRecord, OptionColumns, OptionPair, OptionSelection};
pub use catalog::{Catalog, Product};
pub use checkout::{BuyNow, DraftBuilder, OrderDraft, OrderItem};
pub use config::{load_app_config, load_app_config_from_env};
pub use coupon::{Coupon, WalletEntry};
pub use error::{AddressError, CartError, CheckoutError, ConfigError};
pub use payment::{PaymentOutcome, PaymentProvider, PaymentRequest};
pub use selection::SelectionSet;
pub use session::{LoginProvider, UserSession};
pub use view::{CartView, LineEdit, LineUpdatePlan};
pub use wishlist::Wishlist;
