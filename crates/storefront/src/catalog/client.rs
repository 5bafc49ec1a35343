//! HTTP implementation of the catalog client.
//!
//! Uses `reqwest` for HTTP. Only the product listing is cached (in `moka`);
//! single products and stock are always read fresh.

use std::sync::Arc;

use moka::future::Cache;
use rocketshoes_core::{Product, ProductId, Stock};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{CatalogError, CatalogService};
use crate::config::CatalogConfig;

const LISTING_CACHE_KEY: &str = "products";

/// Client for the RocketShoes catalog API.
///
/// Cheap to clone; clones share the connection pool and listing cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    listing: Option<Cache<&'static str, Vec<Product>>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let listing = (!config.listing_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(config.listing_ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.api_url.clone(),
                listing,
            }),
        })
    }

    /// Issue a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self.inner.base_url.join(path)?;

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(format!("/{path}")));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog API response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get the full product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(cache) = &self.inner.listing
            && let Some(products) = cache.get(LISTING_CACHE_KEY).await
        {
            debug!("Cache hit for product listing");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json("products").await?;

        if let Some(cache) = &self.inner.listing {
            cache.insert(LISTING_CACHE_KEY, products.clone()).await;
        }

        Ok(products)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let product: Product = self.get_json(&format!("products/{id}")).await?;
        if product.id != id {
            return Err(CatalogError::UnexpectedProduct {
                requested: id,
                received: product.id,
            });
        }
        Ok(product)
    }

    /// Get the available stock of a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the stock record is not found or the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        let stock: Stock = self.get_json(&format!("stock/{id}")).await?;
        if stock.id != id {
            return Err(CatalogError::UnexpectedProduct {
                requested: id,
                received: stock.id,
            });
        }
        debug!(amount = stock.amount, "Fetched stock");
        Ok(stock)
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Drop the cached product listing.
    pub async fn invalidate_listing(&self) {
        if let Some(cache) = &self.inner.listing {
            cache.invalidate(LISTING_CACHE_KEY).await;
        }
    }
}

impl CatalogService for CatalogClient {
    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        Self::get_stock(self, id).await
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        Self::get_product(self, id).await
    }
}
