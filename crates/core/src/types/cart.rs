//! The shopping cart: an ordered list of line items keyed by product.
//!
//! The cart keeps insertion order (new products are appended, updates never
//! reorder) and holds at most one line item per product. Every line item has
//! an amount of at least one.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;
use crate::types::product::Product;

/// One product's entry in the cart, with quantity.
///
/// Serialized with the product fields flattened next to `amount`, which is
/// the layout persisted to local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub amount: u32,
}

impl LineItem {
    /// A new line item for `product` with an amount of one.
    #[must_use]
    pub fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }

    /// Unit price as a displayable [`Price`].
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::new(self.price)
    }

    /// Price times amount, saturating at the bounds of [`Decimal`].
    #[must_use]
    pub fn subtotal(&self) -> Price {
        Price::new(self.subtotal_amount())
    }

    fn subtotal_amount(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.amount))
    }
}

/// Ordered sequence of line items.
///
/// (De)serializes as a plain JSON array. Deserialization drops entries that
/// would break the cart's invariants: zero amounts, and repeated product IDs
/// after the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over line items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line item for `id`.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Amount of `id` in the cart, or 0 when absent.
    #[must_use]
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.amount)
    }

    /// Set the amount of an existing line item in place.
    ///
    /// Returns `false` (and leaves the cart untouched) when the product is
    /// not in the cart or `amount` is zero.
    pub fn set_amount(&mut self, id: ProductId, amount: u32) -> bool {
        if amount == 0 {
            return false;
        }
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Append a line item at the end.
    ///
    /// Returns `false` (and leaves the cart untouched) when the product is
    /// already present or the item's amount is zero.
    pub fn push(&mut self, item: LineItem) -> bool {
        if item.amount == 0 || self.contains(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the line item for `id`, returning it if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Sum of all line item amounts.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Amount in the cart per product.
    #[must_use]
    pub fn amounts(&self) -> HashMap<ProductId, u32> {
        self.items.iter().map(|item| (item.id, item.amount)).collect()
    }

    /// Sum of all line item subtotals, saturating at the bounds of [`Decimal`].
    #[must_use]
    pub fn total(&self) -> Price {
        let amount = self
            .items
            .iter()
            .map(LineItem::subtotal_amount)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        Price::new(amount)
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.push(item);
        }
        cart
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
