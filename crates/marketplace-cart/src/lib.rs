//! Persistent shopping cart state for the marketplace app.
//!
//! This crate keeps the cart a storefront screen renders from:
//!
//! - **Cart**: products, line items and the ordered, id-unique cart list
//! - **Store**: the shared cart state, persisted through `marketplace-kv`
//! - **Provider**: explicit scoping so components reach the cart they were given
//!
//! # Example
//!
//! ```rust,ignore
//! use marketplace_cart::prelude::*;
//! use marketplace_kv::MemoryStore;
//!
//! let provider = CartProvider::mount(MemoryStore::new(), CartConfig::default()).await;
//! let screen = provider.provide(&Scope::root());
//!
//! let cart = use_cart(&screen)?;
//! cart.add_to_cart(Product::new("a", "Shirt", "https://img/shirt.png", 10.0));
//! cart.increment(&ProductId::new("a"));
//!
//! assert_eq!(cart.current().quantity_of(&ProductId::new("a")), 2);
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod ids;
pub mod provider;
pub mod store;

pub use cart::{CartItem, CartList, Product};
pub use config::{CartConfig, WriteMode, ZeroQuantityPolicy, DEFAULT_STORAGE_KEY};
pub use error::CartError;
pub use ids::ProductId;
pub use provider::{use_cart, CartContext, CartProvider, Scope};
pub use store::{CartStore, PendingWrite, WriteOutcome};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{CartItem, CartList, Product};
    pub use crate::config::{CartConfig, WriteMode, ZeroQuantityPolicy, DEFAULT_STORAGE_KEY};
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::provider::{use_cart, CartContext, CartProvider, Scope};
    pub use crate::store::{CartStore, PendingWrite, WriteOutcome};
}
