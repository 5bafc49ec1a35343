//! Integration tests for the RocketShoes storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```
//!
//! No external services are needed: the catalog API is served by a
//! `wiremock` server and local storage lives in a temp directory.
//!
//! # Test Categories
//!
//! - `catalog_client` - HTTP client behavior against the mock API
//! - `cart_flow` - Cart manager end to end over HTTP and file storage
//! - `storefront` - The `Storefront` handle and its view models

use std::path::Path;
use std::time::Duration;

use rocketshoes_storefront::StorefrontConfig;
use rocketshoes_storefront::config::CatalogConfig;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock of the catalog API (`/products`, `/products/{id}`, `/stock/{id}`).
pub struct MockCatalogApi {
    pub server: MockServer,
}

impl MockCatalogApi {
    /// Start a mock API with no routes mounted.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the mock API.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URI is not a valid URL.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn url(&self) -> Url {
        Url::parse(&format!("{}/", self.server.uri())).unwrap()
    }

    /// Catalog settings pointing at this mock, with caching disabled.
    #[must_use]
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            api_url: self.url(),
            timeout: Duration::from_secs(5),
            listing_ttl: Duration::ZERO,
        }
    }

    /// Storefront settings pointing at this mock and storing under `dir`.
    #[must_use]
    pub fn storefront_config(&self, dir: &Path) -> StorefrontConfig {
        let mut config = StorefrontConfig::new(self.url());
        config.catalog = self.catalog_config();
        config.storage_path = dir.join("local-storage.json");
        config
    }

    /// Serve `GET /products/{id}`.
    pub async fn mount_product(&self, id: i32, title: &str, price: f64) {
        Mock::given(method("GET"))
            .and(path(format!("/products/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json(id, title, price)))
            .mount(&self.server)
            .await;
    }

    /// Serve `GET /stock/{id}`.
    pub async fn mount_stock(&self, id: i32, amount: u32) {
        Mock::given(method("GET"))
            .and(path(format!("/stock/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "amount": amount,
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve `GET /products` with the given listing.
    pub async fn mount_listing(&self, products: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(products)))
            .mount(&self.server)
            .await;
    }

    /// Drop every mounted route.
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}

/// JSON body of a catalog product.
#[must_use]
pub fn product_json(id: i32, title: &str, price: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "image": format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis{id}.jpg"),
    })
}
