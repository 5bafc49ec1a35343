//! The storefront handle shared with the view layer.

use std::sync::Arc;

use crate::cart::CartManager;
use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;
use crate::error::StorefrontError;
use crate::storage::{CartStorage, FileStorage};
use crate::views::{CartView, ProductListView};

/// Cart manager wired to the HTTP catalog and file-backed storage.
pub type StorefrontCart = CartManager<CatalogClient, FileStorage>;

/// Storefront state passed explicitly to every view.
///
/// This struct is cheaply cloneable via `Arc` and gives access to the
/// catalog client and the cart manager.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: StorefrontCart,
}

impl Storefront {
    /// Create the storefront, hydrating the cart from local storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub async fn new(config: StorefrontConfig) -> Result<Self, StorefrontError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let storage = CartStorage::new(FileStorage::new(&config.storage_path));
        let cart = CartManager::new(catalog.clone(), storage).await;

        tracing::info!(
            api_url = %config.catalog.api_url,
            storage = %config.storage_path.display(),
            "Storefront initialized"
        );

        Ok(Self {
            inner: Arc::new(StorefrontInner {
                config,
                catalog,
                cart,
            }),
        })
    }

    /// Create the storefront from environment variables (and `.env`).
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value or the HTTP
    /// client cannot be built.
    pub async fn from_env() -> Result<Self, StorefrontError> {
        let config = StorefrontConfig::from_env()?;
        Self::new(config).await
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the cart manager.
    #[must_use]
    pub fn cart(&self) -> &StorefrontCart {
        &self.inner.cart
    }

    /// Product listing page data.
    ///
    /// # Errors
    ///
    /// Returns an error if the product listing cannot be fetched.
    pub async fn home(&self) -> Result<ProductListView, CatalogError> {
        let products = self.inner.catalog.list_products().await?;
        Ok(ProductListView::new(&products, &self.inner.cart.cart()))
    }

    /// Cart page data for the current cart.
    #[must_use]
    pub fn cart_page(&self) -> CartView {
        CartView::from(&self.inner.cart.cart())
    }
}
