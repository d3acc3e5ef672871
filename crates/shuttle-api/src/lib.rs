pub mod client;
pub mod error;
pub mod screen;
pub mod stores;
pub mod token_store;
pub mod types;

pub use client::{CartPage, PlacedOrder, StoreClient};
pub use error::ApiError;
pub use screen::ScreenScope;
pub use stores::{CartCountSource, CartCountState, CartCountStore};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
