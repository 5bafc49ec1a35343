//! RocketShoes Storefront library.
//!
//! Client-side core of the RocketShoes storefront: a shopping cart backed by
//! local storage and validated against a remote catalog. A view layer holds a
//! [`state::Storefront`] handle, renders the view models from [`views`], and
//! calls into the [`cart::CartManager`] in response to user actions.
//!
//! # Architecture
//!
//! - [`catalog`] - HTTP client for `/products` and `/stock`
//! - [`storage`] - Local-storage style key-value store and the cart's persistence adapter
//! - [`cart`] - Cart manager: stock-checked mutations, write-through, change notification
//! - [`views`] - View models for the product listing and cart pages
//! - [`telemetry`] - Tracing subscriber and Sentry setup

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod views;

pub use cart::{CartError, CartManager, CartNotice, UpdateProductAmount};
pub use catalog::{CatalogClient, CatalogError, CatalogService};
pub use config::StorefrontConfig;
pub use error::StorefrontError;
pub use state::Storefront;
pub use storage::{CartStorage, FileStorage, KeyValueStore, MemoryStorage, StorageError};
