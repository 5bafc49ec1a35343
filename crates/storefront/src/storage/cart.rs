//! Persistence adapter for the cart.

use rocketshoes_core::Cart;
use tracing::{debug, warn};

use super::{KeyValueStore, StorageError};

/// Fixed key the cart is stored under.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Stores the cart as a JSON array of line items under [`CART_STORAGE_KEY`].
///
/// The stored copy is a shadow of the cart manager's state: read once at
/// startup, then fully overwritten after every mutation.
#[derive(Debug)]
pub struct CartStorage<K> {
    store: K,
}

impl<K: KeyValueStore> CartStorage<K> {
    #[must_use]
    pub const fn new(store: K) -> Self {
        Self { store }
    }

    /// The underlying key-value store.
    #[must_use]
    pub const fn store(&self) -> &K {
        &self.store
    }

    /// Load the stored cart.
    ///
    /// Never fails: a missing, unreadable or malformed entry yields an empty cart.
    pub async fn load(&self) -> Cart {
        let raw = match self.store.get_item(CART_STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored cart, starting empty");
                return Cart::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                debug!(items = cart.len(), "Loaded stored cart");
                cart
            }
            Err(e) => {
                warn!(error = %e, "Stored cart is malformed, starting empty");
                Cart::new()
            }
        }
    }

    /// Overwrite the stored cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be encoded or the write fails.
    pub async fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cart)?;
        self.store.set_item(CART_STORAGE_KEY, raw).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rocketshoes_core::{LineItem, ProductId};
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::MemoryStorage;

    fn sample_cart() -> Cart {
        Cart::from(vec![
            LineItem {
                id: ProductId::new(2),
                title: "Tênis VR Caminhada Confortável".to_string(),
                price: Decimal::new(13990, 2),
                image: "https://example.com/2.jpg".to_string(),
                amount: 3,
            },
            LineItem {
                id: ProductId::new(1),
                title: "Tênis de Caminhada Leve Confortável".to_string(),
                price: Decimal::new(1799, 1),
                image: "https://example.com/1.jpg".to_string(),
                amount: 1,
            },
        ])
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order_and_fields() {
        let storage = CartStorage::new(MemoryStorage::new());
        let cart = sample_cart();

        storage.save(&cart).await.unwrap();
        assert_eq!(storage.load().await, cart);
    }

    #[tokio::test]
    async fn test_load_absent_is_empty() {
        let storage = CartStorage::new(MemoryStorage::new());
        assert!(storage.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_is_empty() {
        let storage = CartStorage::new(MemoryStorage::with_item(CART_STORAGE_KEY, "[{\"id\":"));
        assert!(storage.load().await.is_empty());

        let storage = CartStorage::new(MemoryStorage::with_item(CART_STORAGE_KEY, "{\"id\":1}"));
        assert!(storage.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_array() {
        let storage = CartStorage::new(MemoryStorage::new());
        storage.save(&sample_cart()).await.unwrap();
        storage.save(&Cart::new()).await.unwrap();

        let raw = storage.store().get_item(CART_STORAGE_KEY).await.unwrap();
        assert_eq!(raw.as_deref(), Some("[]"));
    }
}
