//! # Data Loader Crate
//!
//! This crate handles loading the two precomputed recommendation artifacts:
//! the movie catalog and the pairwise similarity matrix.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, SimilarityMatrix, CatalogIndex)
//! - **parser**: Parse the .dat artifacts into Rust structs
//! - **index**: Build and validate the CatalogIndex
//! - **error**: Error types for artifact loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::CatalogIndex;
//! use std::path::Path;
//!
//! // Load both artifacts (fatal on mismatch)
//! let index = CatalogIndex::load_from_files(Path::new("data"))?;
//!
//! // Query data
//! let idx = index.movie_idx_by_title("Avatar").unwrap();
//! let row = index.similarity_row(idx).unwrap();
//!
//! println!("{} scores for catalog row {}", row.len(), idx);
//! ```
//!
//! ## Invariant
//!
//! Row i of the similarity matrix describes the movie at catalog row i.
//! The two artifacts are produced together upstream; [`CatalogIndex`]
//! refuses to assemble when their dimensions disagree, so every loaded
//! index satisfies the invariant by construction.

// Public modules
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    MovieId,
    MovieIdx,
    // Core types
    Movie,
    SimilarityMatrix,
    CatalogIndex,
};
