//! View models for the product listing and cart pages.
//!
//! The view layer renders these; prices arrive pre-formatted in reais.

use rocketshoes_core::{Cart, LineItem, Product, ProductId};
use serde::Serialize;

use crate::cart::UpdateProductAmount;

// =============================================================================
// Product Listing
// =============================================================================

/// One product card on the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCardView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub price: String,
    /// How many units are already in the cart (0 when absent).
    pub cart_amount: u32,
}

/// Product listing page data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductListView {
    pub products: Vec<ProductCardView>,
}

impl ProductListView {
    /// Build the listing for `products`, annotated with the amounts in `cart`.
    #[must_use]
    pub fn new(products: &[Product], cart: &Cart) -> Self {
        let amounts = cart.amounts();
        let products = products
            .iter()
            .map(|product| ProductCardView {
                id: product.id,
                title: product.title.clone(),
                image: product.image.clone(),
                price: product.unit_price().display(),
                cart_amount: amounts.get(&product.id).copied().unwrap_or(0),
            })
            .collect();

        Self { products }
    }
}

// =============================================================================
// Cart Page
// =============================================================================

/// One row of the cart table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub amount: u32,
    pub price: String,
    pub subtotal: String,
    /// The decrement button is disabled at an amount of one.
    pub can_decrement: bool,
}

impl CartItemView {
    /// Request for one more unit of this item.
    #[must_use]
    pub fn increment(&self) -> UpdateProductAmount {
        UpdateProductAmount {
            product_id: self.id,
            amount: i64::from(self.amount) + 1,
        }
    }

    /// Request for one less unit of this item.
    ///
    /// At an amount of one this asks for zero, which the cart manager ignores.
    #[must_use]
    pub fn decrement(&self) -> UpdateProductAmount {
        UpdateProductAmount {
            product_id: self.id,
            amount: i64::from(self.amount) - 1,
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            image: item.image.clone(),
            amount: item.amount,
            price: item.unit_price().display(),
            subtotal: item.subtotal().display(),
            can_decrement: item.amount > 1,
        }
    }
}

/// Cart page data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.iter().map(CartItemView::from).collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Tênis {id}"),
            price: Decimal::new(cents, 2),
            image: format!("https://example.com/{id}.jpg"),
        }
    }

    fn cart_with(items: &[(i32, i64, u32)]) -> Cart {
        Cart::from(
            items
                .iter()
                .map(|&(id, cents, amount)| {
                    let mut item = LineItem::from_product(product(id, cents));
                    item.amount = amount;
                    item
                })
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_product_list_annotates_cart_amounts() {
        let products = vec![product(1, 17990), product(2, 13990)];
        let cart = cart_with(&[(2, 13990, 3)]);

        let view = ProductListView::new(&products, &cart);

        assert_eq!(view.products.len(), 2);
        assert_eq!(view.products[0].cart_amount, 0);
        assert_eq!(view.products[0].price, "R$ 179,90");
        assert_eq!(view.products[1].cart_amount, 3);
    }

    #[test]
    fn test_cart_view_totals() {
        let cart = cart_with(&[(1, 17990, 2), (2, 13990, 1)]);
        let view = CartView::from(&cart);

        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].price, "R$ 179,90");
        assert_eq!(view.items[0].subtotal, "R$ 359,80");
        assert!(view.items[0].can_decrement);
        assert!(!view.items[1].can_decrement);
        assert_eq!(view.total, "R$ 499,70");
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert!(view.items.is_empty());
        assert_eq!(view.total, "R$ 0,00");
        assert_eq!(view.item_count, 0);
    }

    #[test]
    fn test_increment_and_decrement_requests() {
        let cart = cart_with(&[(5, 1000, 1)]);
        let view = CartView::from(&cart);
        let row = &view.items[0];

        assert_eq!(
            row.increment(),
            UpdateProductAmount {
                product_id: ProductId::new(5),
                amount: 2
            }
        );
        assert_eq!(row.decrement().amount, 0);
    }
}
