//! Background image search port.
//!
//! The design crew asks an image search backend for background inspirations.
//! The Pexels implementation lives in cardsmith-infra.

use std::future::Future;

use cardsmith_types::blueprint::BackgroundPhoto;
use cardsmith_types::error::ImageSearchError;

/// Trait for photo search backends.
pub trait ImageSearch: Send + Sync {
    /// Backend name for logs (e.g., "pexels").
    fn name(&self) -> &str;

    /// Search up to `per_page` photos matching `query`.
    fn search(
        &self,
        query: &str,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<BackgroundPhoto>, ImageSearchError>> + Send;
}
