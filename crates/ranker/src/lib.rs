//! # Ranker Crate
//!
//! This crate implements the similarity ranking for movie recommendations:
//! top-K most-similar-excluding-self over the precomputed pairwise matrix.
//!
//! ## Components
//!
//! ### SimilarityRanker
//! Resolves a query title to its catalog row, ranks every other movie by
//! that row's scores, and returns the top K:
//! - Descending by similarity score
//! - Ties broken by ascending catalog index
//! - The query movie is excluded by identity, never by sort position
//!
//! ## Example Usage
//!
//! ```ignore
//! use ranker::SimilarityRanker;
//! use data_loader::CatalogIndex;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(CatalogIndex::load_from_files("data".as_ref())?);
//! let ranker = SimilarityRanker::new(catalog);
//!
//! let top5 = ranker.recommend("Avatar", 5)?;
//! ```

// Public modules
pub mod error;
pub mod similarity;
pub mod types;

// Re-export commonly used types
pub use error::RankError;
pub use similarity::SimilarityRanker;
pub use types::RankedMovie;
