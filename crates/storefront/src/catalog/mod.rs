//! Catalog Service Client: read-only access to products and stock.
//!
//! # API
//!
//! - `GET /products` - product listing (consumed by the product list view)
//! - `GET /products/{id}` - one product's descriptive fields
//! - `GET /stock/{id}` - available quantity for a product
//!
//! The cart manager only depends on the [`CatalogService`] trait, so it can
//! be driven by the HTTP [`CatalogClient`] or an in-memory fake.

mod client;

pub use client::CatalogClient;

use std::future::Future;
use std::sync::Arc;

use rocketshoes_core::{Product, ProductId, Stock};
use thiserror::Error;

/// Errors that can occur when querying the catalog API.
///
/// Every variant is a lookup error from the cart manager's point of view.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Any other non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The API answered with a record for a different product.
    #[error("Requested product {requested} but received {received}")]
    UnexpectedProduct {
        requested: ProductId,
        received: ProductId,
    },
}

/// Read-only catalog queries consumed by the cart manager.
///
/// No caching and no retry are part of this contract.
pub trait CatalogService: Send + Sync {
    /// Available stock for a product.
    fn get_stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, CatalogError>> + Send;

    /// Descriptive fields of a product.
    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}

impl<C: CatalogService> CatalogService for Arc<C> {
    fn get_stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, CatalogError>> + Send {
        (**self).get_stock(id)
    }

    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send {
        (**self).get_product(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("/stock/3".to_string());
        assert_eq!(err.to_string(), "Not found: /stock/3");

        let err = CatalogError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");

        let err = CatalogError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: unavailable");
    }

    #[test]
    fn test_unexpected_product_display() {
        let err = CatalogError::UnexpectedProduct {
            requested: ProductId::new(1),
            received: ProductId::new(2),
        };
        assert_eq!(err.to_string(), "Requested product 1 but received 2");
    }
}
