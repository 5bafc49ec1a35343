//! Unified error handling with Sentry integration.
//!
//! Each subsystem has its own error type; `StorefrontError` covers the ways
//! setting up the storefront can fail. Infrastructure failures are reported
//! to Sentry through [`report`].

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Error returned when the storefront cannot be set up.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog API request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Capture an infrastructure error to Sentry and log it.
///
/// Returns the Sentry event ID (nil when Sentry is not initialized).
pub fn report<E>(error: &E, context: &str) -> sentry::types::Uuid
where
    E: std::error::Error + ?Sized,
{
    let event_id = sentry::capture_error(error);
    tracing::error!(
        error = %error,
        sentry_event_id = %event_id,
        "{context}"
    );
    event_id
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added product", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
