//! Error types for ranking queries.
//!
//! Both variants are recoverable: they are caught at the presentation
//! boundary and rendered as user-visible messages, never a crash.

use thiserror::Error;

/// Errors a recommendation query can fail with
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RankError {
    /// The query title does not exactly match any catalog title
    #[error("Movie '{0}' not found in catalog")]
    TitleNotFound(String),

    /// The catalog is too small to produce the requested number of results
    #[error("Catalog has {available} movies, need at least {needed} for this request")]
    InsufficientCatalog { needed: usize, available: usize },
}
