//! Tile provider abstraction
//!
//! This module provides the HTTP client abstraction and the URL-template
//! provider that turns a [`crate::layer::TileLayerDefinition`] into
//! concrete tile requests.

mod http;
mod template;

pub use http::{AsyncHttpClient, AsyncReqwestClient, BoxFuture};
pub use template::TemplateProvider;

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;

use thiserror::Error;

/// Errors that can occur while fetching a tile from a provider.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// HTTP transport or status failure.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Requested zoom level outside the layer's supported range.
    #[error("Unsupported zoom level: {0}")]
    UnsupportedZoom(u8),
}
