//! Product descriptor and cart line item.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// Product data handed to the cart by catalog screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Image shown next to the entry.
    pub image_url: String,
    /// Unit price, display only.
    pub price: f64,
}

impl Product {
    /// Create a product descriptor.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

/// A line item in the cart.
///
/// Everything except `quantity` is copied from the [`Product`] and never
/// changes while the item stays in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Image URL.
    pub image_url: String,
    /// Unit price.
    pub price: f64,
    /// Units in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Build a line item from a product.
    pub fn from_product(product: Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity,
        }
    }

    /// Copy of this item with a different quantity.
    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }

    /// The product this entry was created from.
    pub fn product(&self) -> Product {
        Product {
            id: self.id.clone(),
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_product() {
        let item = CartItem::from_product(Product::new("a", "Shirt", "x", 10.0), 1);
        assert_eq!(item.id.as_str(), "a");
        assert_eq!(item.title, "Shirt");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.product(), Product::new("a", "Shirt", "x", 10.0));
    }

    #[test]
    fn test_stored_field_names() {
        let item = CartItem::from_product(Product::new("a", "Shirt", "x", 10.5), 3);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "a",
                "title": "Shirt",
                "image_url": "x",
                "price": 10.5,
                "quantity": 3
            })
        );
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let item: CartItem = serde_json::from_str(
            r#"{"id":"a","title":"Shirt","image_url":"x","price":10,"quantity":2,"color":"red"}"#,
        )
        .unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, 10.0);
    }
}
