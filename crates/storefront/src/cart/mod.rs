//! Cart Manager: the authoritative in-memory cart.
//!
//! Every mutation is validated against remote stock, written through to
//! storage, and only then published to subscribers. Failures come back as a
//! [`CartError`] and are also broadcast as a user-facing [`CartNotice`].

mod manager;
mod notice;

pub use manager::CartManager;
pub use notice::{CartNotice, CartOperation};

use rocketshoes_core::ProductId;
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Why a cart operation left the cart unchanged.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested amount is more than the product's stock.
    #[error("Requested {requested} of product {product_id} but only {available} in stock")]
    StockExceeded {
        product_id: ProductId,
        requested: i64,
        available: u32,
    },

    /// Product or stock lookup failed.
    #[error("Catalog lookup failed: {0}")]
    Lookup(#[from] CatalogError),

    /// The product has no line item in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Writing the cart to storage failed.
    #[error("Failed to persist cart: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// The user-facing notice for this error raised by `operation`.
    ///
    /// Stock rejections have their own message; everything else gets the
    /// operation's generic failure message.
    #[must_use]
    pub const fn notice(&self, operation: CartOperation) -> CartNotice {
        match self {
            Self::StockExceeded { .. } => CartNotice::StockExceeded,
            _ => operation.failure_notice(),
        }
    }

    /// Whether the error is a validation rejection rather than an infrastructure failure.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::StockExceeded { .. } | Self::NotInCart(_))
    }
}

/// Request to set a line item's amount.
///
/// `amount` is absolute, not a delta. Zero and negative amounts are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_mapping() {
        let stock = CartError::StockExceeded {
            product_id: ProductId::new(1),
            requested: 6,
            available: 5,
        };
        assert_eq!(stock.notice(CartOperation::Add), CartNotice::StockExceeded);
        assert_eq!(stock.notice(CartOperation::Update), CartNotice::StockExceeded);

        let missing = CartError::NotInCart(ProductId::new(1));
        assert_eq!(missing.notice(CartOperation::Remove), CartNotice::RemoveFailed);
        assert_eq!(missing.notice(CartOperation::Update), CartNotice::UpdateFailed);

        let lookup = CartError::Lookup(CatalogError::NotFound("/stock/1".to_string()));
        assert_eq!(lookup.notice(CartOperation::Add), CartNotice::AddFailed);
        assert!(!lookup.is_rejection());
        assert!(missing.is_rejection());
    }

    #[test]
    fn test_update_request_deserializes_camel_case() {
        let request: UpdateProductAmount =
            serde_json::from_str(r#"{"productId":3,"amount":-1}"#).unwrap();
        assert_eq!(request.product_id, ProductId::new(3));
        assert_eq!(request.amount, -1);
    }

    #[test]
    fn test_stock_exceeded_display() {
        let err = CartError::StockExceeded {
            product_id: ProductId::new(1),
            requested: 6,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "Requested 6 of product 1 but only 5 in stock"
        );
    }
}
