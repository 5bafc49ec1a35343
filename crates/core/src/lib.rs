//! RocketShoes Core - Shared types library.
//!
//! This crate provides the types shared by the storefront library and its
//! consumers:
//! - `storefront` - Cart manager, catalog client and view models
//! - `integration-tests` - End-to-end scenarios against a mock API
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, prices, catalog records and the cart itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
