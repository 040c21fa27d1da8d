//! CatalogIndex construction and validation.
//!
//! This module builds the CatalogIndex from the parsed artifacts:
//! - Parse movies.dat and similarity.dat in parallel
//! - Check the alignment invariant between the two artifacts
//! - Build the title lookup index

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::{CatalogIndex, Movie, SimilarityMatrix};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

impl CatalogIndex {
    /// Load the catalog and similarity artifacts from a directory.
    ///
    /// This is the main entry point for loading data. It is a one-time,
    /// blocking step at process start; any failure here is fatal because
    /// no query can be answered without both artifacts.
    ///
    /// Expects `movies.dat` and `similarity.dat` inside `data_dir`.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        let movies_path = data_dir.join("movies.dat");
        let similarity_path = data_dir.join("similarity.dat");

        // Parse both artifacts in parallel; they are independent files
        let (movies, similarity) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_similarity(&similarity_path),
        );
        let movies = movies?;
        let similarity = similarity?;

        info!(
            movies = movies.len(),
            matrix_dim = similarity.dim(),
            "Parsed catalog artifacts"
        );

        Self::from_parts(movies, similarity)
    }

    /// Assemble an index from already-parsed parts, enforcing alignment.
    ///
    /// Row i of the matrix must describe the movie at catalog row i. The
    /// artifacts carry no shared key, so equal dimensions are the one check
    /// available at this boundary; it runs before any query is served.
    pub fn from_parts(movies: Vec<Movie>, similarity: SimilarityMatrix) -> Result<Self> {
        if similarity.dim() != movies.len() {
            return Err(DataLoadError::DimensionMismatch {
                movies: movies.len(),
                rows: similarity.dim(),
            });
        }

        // First catalog row wins for a duplicated title, so lookups stay
        // deterministic
        let mut title_index = HashMap::with_capacity(movies.len());
        for (idx, movie) in movies.iter().enumerate() {
            title_index.entry(movie.title.clone()).or_insert(idx);
        }

        Ok(Self {
            movies,
            title_index,
            similarity,
        })
    }
}
