//! Cart contents.
//!
//! Contains the product descriptor, line items, and the ordered cart list.

mod item;
mod list;

pub use item::{CartItem, Product};
pub use list::CartList;
