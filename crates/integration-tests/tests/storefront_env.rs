//! `Storefront::from_env` against the process environment.
//!
//! Kept in its own test binary: it is the only test that mutates env vars.
//!
//! Run with: cargo test -p rocketshoes-integration-tests

#![allow(unsafe_code, clippy::unwrap_used)]

use rocketshoes_integration_tests::MockCatalogApi;
use rocketshoes_storefront::{Storefront, StorefrontError};

#[tokio::test]
async fn test_from_env() {
    let api = MockCatalogApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let storage_path = dir.path().join("local-storage.json");

    // SAFETY: no other test in this binary reads or writes the environment.
    unsafe {
        std::env::set_var("ROCKETSHOES_API_URL", "ftp://catalog.example");
        std::env::set_var("ROCKETSHOES_STORAGE_PATH", &storage_path);
    }
    let err = Storefront::from_env().await.err().unwrap();
    assert!(matches!(err, StorefrontError::Config(_)));

    // SAFETY: as above.
    unsafe {
        std::env::set_var("ROCKETSHOES_API_URL", api.url().as_str());
    }
    let storefront = Storefront::from_env().await.unwrap();
    assert_eq!(storefront.config().catalog.api_url, api.url());
    assert_eq!(storefront.config().storage_path, storage_path);
    assert_eq!(storefront.cart_page().item_count, 0);
}
