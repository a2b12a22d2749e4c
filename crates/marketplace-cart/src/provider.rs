//! Explicit cart scoping for UI trees.
//!
//! A screen or app session owns a [`CartProvider`]. Child components receive
//! a [`Scope`] and ask it for the cart with [`use_cart`]; asking from a scope
//! no provider wraps is a programming error reported as
//! [`CartError::OutsideProvider`].

use std::sync::Arc;

use marketplace_kv::KeyValueStore;

use crate::cart::{CartList, Product};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::store::{CartStore, PendingWrite};

/// Owner of a cart for the lifetime of a screen or session.
#[derive(Debug, Clone)]
pub struct CartProvider {
    store: CartStore,
}

impl CartProvider {
    /// Wrap an already opened store.
    pub fn new(store: CartStore) -> Self {
        Self { store }
    }

    /// Open a store and wrap it.
    pub async fn mount(storage: impl KeyValueStore + 'static, config: CartConfig) -> Self {
        Self::new(CartStore::open(storage, config).await)
    }

    /// Child scope of `parent` in which [`use_cart`] resolves to this cart.
    pub fn provide(&self, parent: &Scope) -> Scope {
        Scope {
            cart: Some(self.store.clone()),
            depth: parent.depth + 1,
        }
    }

    /// Snapshot of the cart together with its operations.
    pub fn value(&self) -> CartContext {
        CartContext::new(self.store.clone())
    }

    /// The wrapped store.
    pub fn store(&self) -> &CartStore {
        &self.store
    }
}

/// Context handed down a component tree.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    cart: Option<CartStore>,
    depth: usize,
}

impl Scope {
    /// Top-level scope with nothing provided.
    pub fn root() -> Self {
        Self::default()
    }

    /// Scope for a nested component, inheriting everything provided above.
    pub fn child(&self) -> Self {
        Self {
            cart: self.cart.clone(),
            depth: self.depth + 1,
        }
    }

    /// Nesting level below the root.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Resolve the cart provided to `scope`.
pub fn use_cart(scope: &Scope) -> Result<CartContext, CartError> {
    scope
        .cart
        .clone()
        .map(CartContext::new)
        .ok_or(CartError::OutsideProvider)
}

/// What a component sees of the cart: the products at the time the context
/// was taken, plus the operations.
#[derive(Debug, Clone)]
pub struct CartContext {
    /// Products when this context was created.
    pub products: Arc<CartList>,
    store: CartStore,
}

impl CartContext {
    fn new(store: CartStore) -> Self {
        Self {
            products: store.products(),
            store,
        }
    }

    /// Add one unit of `product`.
    pub fn add_to_cart(&self, product: Product) -> PendingWrite {
        self.store.add_to_cart(product)
    }

    /// Add one unit of `id`.
    pub fn increment(&self, id: &ProductId) -> PendingWrite {
        self.store.increment(id)
    }

    /// Remove one unit of `id`.
    pub fn decrement(&self, id: &ProductId) -> PendingWrite {
        self.store.decrement(id)
    }

    /// Latest products, which may be newer than [`CartContext::products`].
    pub fn current(&self) -> Arc<CartList> {
        self.store.products()
    }

    /// The underlying store.
    pub fn store(&self) -> &CartStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketplace_kv::MemoryStore;

    #[tokio::test]
    async fn test_use_cart_outside_provider() {
        let scope = Scope::root().child();
        let err = use_cart(&scope).unwrap_err();

        assert!(matches!(err, CartError::OutsideProvider));
        assert_eq!(err.to_string(), "use_cart must be used within a CartProvider");
    }

    #[tokio::test]
    async fn test_nested_components_share_cart() {
        let provider = CartProvider::mount(MemoryStore::new(), CartConfig::default()).await;
        let root = Scope::root();
        let screen = provider.provide(&root);
        let list_row = screen.child().child();
        assert_eq!(list_row.depth(), 3);

        let header = use_cart(&screen).unwrap();
        header.add_to_cart(Product::new("a", "Shirt", "x", 10.0));

        let row = use_cart(&list_row).unwrap();
        assert_eq!(row.products.quantity_of(&ProductId::new("a")), 1);

        row.increment(&ProductId::new("a"));
        assert_eq!(header.current().quantity_of(&ProductId::new("a")), 2);
        assert_eq!(header.products.quantity_of(&ProductId::new("a")), 0);
    }

    #[tokio::test]
    async fn test_sibling_scope_is_not_provided() {
        let provider = CartProvider::mount(MemoryStore::new(), CartConfig::default()).await;
        let root = Scope::root();
        let _screen = provider.provide(&root);

        assert!(use_cart(&root.child()).is_err());
    }

    #[tokio::test]
    async fn test_value_operations() {
        let provider = CartProvider::mount(MemoryStore::new(), CartConfig::default()).await;
        let cart = provider.value();
        cart.add_to_cart(Product::new("a", "Shirt", "x", 10.0));
        cart.decrement(&ProductId::new("a")).wait().await;

        assert_eq!(provider.store().products().quantity_of(&ProductId::new("a")), 0);
    }
}
