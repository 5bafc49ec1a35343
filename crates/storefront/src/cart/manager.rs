//! Cart manager implementation.

use std::sync::Arc;

use rocketshoes_core::{Cart, LineItem, ProductId};
use tokio::sync::{Mutex, MutexGuard, broadcast, watch};
use tracing::{info, instrument, warn};

use super::{CartError, CartNotice, CartOperation, UpdateProductAmount};
use crate::catalog::{CatalogError, CatalogService};
use crate::error::{add_breadcrumb, report};
use crate::storage::{CartStorage, KeyValueStore};

/// Capacity of the notice channel; slow receivers miss the oldest notices.
const NOTICE_CAPACITY: usize = 32;

/// Owner of the shopping cart.
///
/// Cheap to clone; clones share the same cart. Mutations are serialized: each
/// one holds the cart lock from its stock check until the new state is
/// published, so concurrent calls can never act on a stale stock check.
pub struct CartManager<C, K> {
    inner: Arc<CartManagerInner<C, K>>,
}

struct CartManagerInner<C, K> {
    catalog: C,
    storage: CartStorage<K>,
    cart: Mutex<Cart>,
    state: watch::Sender<Cart>,
    notices: broadcast::Sender<CartNotice>,
}

impl<C, K> Clone for CartManager<C, K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, K> CartManager<C, K>
where
    C: CatalogService,
    K: KeyValueStore,
{
    /// Create a manager hydrated from `storage`.
    ///
    /// A missing or malformed stored cart starts the manager empty.
    pub async fn new(catalog: C, storage: CartStorage<K>) -> Self {
        let cart = storage.load().await;
        info!(items = cart.len(), "Cart manager initialized");

        let (state, _) = watch::channel(cart.clone());
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);

        Self {
            inner: Arc::new(CartManagerInner {
                catalog,
                storage,
                cart: Mutex::new(cart),
                state,
                notices,
            }),
        }
    }

    /// Snapshot of the current cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver sees a new value after every successful mutation, once it
    /// has been written to storage.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.inner.state.subscribe()
    }

    /// Subscribe to user-facing failure notices.
    #[must_use]
    pub fn notices(&self) -> broadcast::Receiver<CartNotice> {
        self.inner.notices.subscribe()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Add one unit of a product.
    ///
    /// Increments the existing line item, or appends a new one with amount 1
    /// using the catalog's product data.
    ///
    /// # Errors
    ///
    /// - [`CartError::StockExceeded`] if one more unit is more than the stock
    /// - [`CartError::Lookup`] if the stock or product read fails
    /// - [`CartError::Storage`] if the write-through fails
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let result = self.try_add(product_id).await;
        self.settle(CartOperation::Add, product_id, result)
    }

    /// Remove a product's line item.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotInCart`] if the product has no line item
    /// - [`CartError::Storage`] if the write-through fails
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let result = self.try_remove(product_id).await;
        self.settle(CartOperation::Remove, product_id, result)
    }

    /// Set a line item's amount to exactly `request.amount`.
    ///
    /// Zero and negative amounts are ignored: the current cart is returned and
    /// no notice is raised.
    ///
    /// # Errors
    ///
    /// - [`CartError::StockExceeded`] if the amount is more than the stock
    /// - [`CartError::Lookup`] if the stock read fails
    /// - [`CartError::NotInCart`] if the product has no line item
    /// - [`CartError::Storage`] if the write-through fails
    #[instrument(skip(self), fields(product_id = %request.product_id, amount = request.amount))]
    pub async fn update_product_amount(
        &self,
        request: UpdateProductAmount,
    ) -> Result<Cart, CartError> {
        if request.amount <= 0 {
            return Ok(self.cart());
        }
        let result = self.try_update(request).await;
        self.settle(CartOperation::Update, request.product_id, result)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn try_add(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let mut cart = self.inner.cart.lock().await;

        let current = cart.amount_of(product_id);
        let stock = self.inner.catalog.get_stock(product_id).await?;
        let requested = current.saturating_add(1);

        if requested > stock.amount {
            return Err(CartError::StockExceeded {
                product_id,
                requested: i64::from(requested),
                available: stock.amount,
            });
        }

        let mut next = cart.clone();
        if current > 0 {
            next.set_amount(product_id, requested);
        } else {
            let product = self.inner.catalog.get_product(product_id).await?;
            if product.id != product_id {
                return Err(CatalogError::UnexpectedProduct {
                    requested: product_id,
                    received: product.id,
                }
                .into());
            }
            next.push(LineItem::from_product(product));
        }

        self.commit(&mut cart, next).await
    }

    async fn try_remove(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let mut cart = self.inner.cart.lock().await;

        let mut next = cart.clone();
        if next.remove(product_id).is_none() {
            return Err(CartError::NotInCart(product_id));
        }

        self.commit(&mut cart, next).await
    }

    async fn try_update(&self, request: UpdateProductAmount) -> Result<Cart, CartError> {
        let UpdateProductAmount { product_id, amount } = request;
        let mut cart = self.inner.cart.lock().await;

        let stock = self.inner.catalog.get_stock(product_id).await?;
        let amount = u32::try_from(amount)
            .ok()
            .filter(|amount| *amount <= stock.amount)
            .ok_or(CartError::StockExceeded {
                product_id,
                requested: amount,
                available: stock.amount,
            })?;

        let mut next = cart.clone();
        if !next.set_amount(product_id, amount) {
            return Err(CartError::NotInCart(product_id));
        }

        self.commit(&mut cart, next).await
    }

    /// Write `next` through to storage, then make it the current cart and publish it.
    ///
    /// On a storage failure the current cart is left as it was.
    async fn commit(
        &self,
        current: &mut MutexGuard<'_, Cart>,
        next: Cart,
    ) -> Result<Cart, CartError> {
        self.inner.storage.save(&next).await?;
        **current = next.clone();
        self.inner.state.send_replace(next.clone());
        Ok(next)
    }

    /// Log the outcome and broadcast a notice on failure.
    fn settle(
        &self,
        operation: CartOperation,
        product_id: ProductId,
        result: Result<Cart, CartError>,
    ) -> Result<Cart, CartError> {
        match &result {
            Ok(cart) => {
                info!(
                    operation = operation.as_str(),
                    amount = cart.amount_of(product_id),
                    items = cart.len(),
                    "Cart updated"
                );
                let id = product_id.to_string();
                let data = [("product_id", id.as_str())];
                add_breadcrumb("cart", operation.as_str(), Some(data.as_slice()));
            }
            Err(e) => {
                if e.is_rejection() {
                    warn!(operation = operation.as_str(), error = %e, "Cart operation rejected");
                } else {
                    report(e, "Cart operation failed");
                }
                // No receivers just means no view is listening.
                let _ = self.inner.notices.send(e.notice(operation));
            }
        }
        result
    }
}
