//! Ordered, id-unique list of cart items.

use serde::{Deserialize, Serialize};

use crate::cart::{CartItem, Product};
use crate::config::ZeroQuantityPolicy;
use crate::error::CartError;
use crate::ids::ProductId;

/// The cart contents in display order.
///
/// Mutating operations never touch `self`; they return a new list so a
/// previously handed-out snapshot stays valid for whoever holds it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct CartList {
    items: Vec<CartItem>,
}

impl CartList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from items, keeping the first entry for any repeated id.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut list = Self::new();
        for item in items {
            if list.position(&item.id).is_none() {
                list.items.push(item);
            }
        }
        list
    }

    /// Parse the stored JSON form.
    pub fn from_json(text: &str) -> Result<Self, CartError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to the stored JSON form.
    pub fn to_json(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string(self)?)
    }

    /// List with `product` added: an existing entry gains one unit, otherwise
    /// a new entry with quantity 1 is appended.
    pub fn with_added(&self, product: Product) -> Self {
        match self.position(&product.id) {
            Some(index) => self.with_quantity_at(index, |q| q.saturating_add(1)),
            None => {
                let mut items = self.items.clone();
                items.push(CartItem::from_product(product, 1));
                Self { items }
            }
        }
    }

    /// List with one more unit of `id`, or `None` if `id` isn't in the cart.
    pub fn with_incremented(&self, id: &ProductId) -> Option<Self> {
        let index = self.position(id)?;
        Some(self.with_quantity_at(index, |q| q.saturating_add(1)))
    }

    /// List with one less unit of `id`, floored at zero, or `None` if `id`
    /// isn't in the cart.
    pub fn with_decremented(&self, id: &ProductId, policy: ZeroQuantityPolicy) -> Option<Self> {
        let index = self.position(id)?;
        let next = self.with_quantity_at(index, |q| q.saturating_sub(1));

        match policy {
            ZeroQuantityPolicy::Prune if next.items[index].quantity == 0 => {
                let mut items = next.items;
                items.remove(index);
                Some(Self { items })
            }
            _ => Some(next),
        }
    }

    fn with_quantity_at(&self, index: usize, f: impl FnOnce(u32) -> u32) -> Self {
        let mut items = self.items.clone();
        let item = &mut items[index];
        item.quantity = f(item.quantity);
        Self { items }
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Get an entry by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Quantity of `id`, zero if absent.
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.quantity)
    }

    /// Iterate entries in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Entries as a slice.
    pub fn as_slice(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all entries.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

impl From<Vec<CartItem>> for CartList {
    fn from(items: Vec<CartItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<CartList> for Vec<CartItem> {
    fn from(list: CartList) -> Self {
        list.items
    }
}

impl<'a> IntoIterator for &'a CartList {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn shirt() -> Product {
        Product::new("a", "Shirt", "x", 10.0)
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_add_to_empty() {
        let list = CartList::new().with_added(shirt());

        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0], CartItem::from_product(shirt(), 1));
    }

    #[test]
    fn test_add_existing_increments() {
        let list = CartList::new().with_added(shirt()).with_added(shirt());

        assert_eq!(list.len(), 1);
        assert_eq!(list.quantity_of(&id("a")), 2);
    }

    #[test]
    fn test_add_keeps_receiver_untouched() {
        let before = CartList::new().with_added(shirt());
        let after = before.with_added(shirt());

        assert_eq!(before.quantity_of(&id("a")), 1);
        assert_eq!(after.quantity_of(&id("a")), 2);
    }

    #[test]
    fn test_missing_id_is_none() {
        let list = CartList::new().with_added(shirt());
        assert!(list.with_incremented(&id("b")).is_none());
        assert!(list.with_decremented(&id("b"), ZeroQuantityPolicy::Keep).is_none());
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let mut list = CartList::new().with_added(shirt()).with_added(shirt());
        for _ in 0..2 {
            list = list.with_decremented(&id("a"), ZeroQuantityPolicy::Keep).unwrap();
        }
        assert_eq!(list.quantity_of(&id("a")), 0);

        let list = list.with_decremented(&id("a"), ZeroQuantityPolicy::Keep).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.quantity_of(&id("a")), 0);
    }

    #[test]
    fn test_decrement_prune() {
        let list = CartList::new()
            .with_added(shirt())
            .with_added(Product::new("b", "Hat", "y", 5.0));

        let list = list.with_decremented(&id("a"), ZeroQuantityPolicy::Prune).unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.get(&id("a")).is_none());
        assert_eq!(list.quantity_of(&id("b")), 1);
    }

    #[test]
    fn test_from_items_dedups() {
        let list = CartList::from_items(vec![
            CartItem::from_product(shirt(), 3),
            CartItem::from_product(shirt(), 7),
        ]);
        assert_eq!(list.len(), 1);
        assert_eq!(list.quantity_of(&id("a")), 3);
    }

    #[test]
    fn test_json_is_plain_array() {
        let list = CartList::new().with_added(shirt());
        assert_eq!(
            list.to_json().unwrap(),
            r#"[{"id":"a","title":"Shirt","image_url":"x","price":10.0,"quantity":1}]"#
        );
        assert!(CartList::from_json("{").is_err());
    }

    #[test]
    fn test_unit_count() {
        let list = CartList::new()
            .with_added(shirt())
            .with_added(shirt())
            .with_added(Product::new("b", "Hat", "y", 5.0));
        assert_eq!(list.unit_count(), 3);
    }

    fn product() -> impl Strategy<Value = Product> {
        ("[a-e]", "[A-Za-z ]{0,12}", "[a-z:/.]{0,16}", 0u32..100_000).prop_map(
            |(id, title, image_url, cents)| Product::new(id, title, image_url, f64::from(cents) / 100.0),
        )
    }

    fn cart_list() -> impl Strategy<Value = CartList> {
        prop::collection::vec((product(), 0u32..20), 0..6).prop_map(|entries| {
            CartList::from_items(
                entries
                    .into_iter()
                    .map(|(product, quantity)| CartItem::from_product(product, quantity)),
            )
        })
    }

    proptest! {
        #[test]
        fn test_add_to_fresh_list_yields_one(product in product()) {
            let list = CartList::new().with_added(product);
            prop_assert_eq!(list.len(), 1);
            prop_assert_eq!(list.as_slice()[0].quantity, 1);
        }

        #[test]
        fn test_add_existing_only_touches_match(list in cart_list(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!list.is_empty());
            let target = list.as_slice()[pick.index(list.len())].clone();

            let next = list.with_added(target.product());

            prop_assert_eq!(next.len(), list.len());
            for (before, after) in list.iter().zip(next.iter()) {
                prop_assert_eq!(&before.id, &after.id);
                if before.id == target.id {
                    prop_assert_eq!(after.quantity, before.quantity + 1);
                } else {
                    prop_assert_eq!(before, after);
                }
            }
        }

        #[test]
        fn test_unknown_id_is_identity(list in cart_list()) {
            let unknown = ProductId::new("not-in-cart");
            prop_assert!(list.with_incremented(&unknown).is_none());
            prop_assert!(list.with_decremented(&unknown, ZeroQuantityPolicy::Keep).is_none());
        }

        #[test]
        fn test_decrement_never_below_zero(list in cart_list()) {
            for item in &list {
                let next = list.with_decremented(&item.id, ZeroQuantityPolicy::Keep).unwrap();
                prop_assert_eq!(next.quantity_of(&item.id), item.quantity.saturating_sub(1));
            }
        }

        #[test]
        fn test_json_round_trip(list in cart_list()) {
            let text = list.to_json().unwrap();
            prop_assert_eq!(CartList::from_json(&text).unwrap(), list);
        }
    }
}
