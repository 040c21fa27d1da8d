//! Core domain types for the movie catalog.
//!
//! The catalog is an ordered list of movies; order is load-bearing because
//! row i of the similarity matrix describes the movie at catalog row i.
//! Both structures are built once at load time and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// 0-based dense row index into the catalog.
///
/// This is the identity used for ranking and for matrix alignment.
pub type MovieIdx = usize;

/// External catalog identifier (TMDB-style numeric id), display metadata only
pub type MovieId = u32;

// =============================================================================
// Movie
// =============================================================================

/// A single catalog entry.
///
/// Titles are expected to be unique; lookups resolve a duplicated title to
/// its first catalog row (see [`CatalogIndex`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
}

// =============================================================================
// SimilarityMatrix
// =============================================================================

/// Square matrix of precomputed pairwise similarity scores.
///
/// Stored row-major in a flat `Vec<f32>`. Row i and column i both refer to
/// catalog row i; higher score = more similar. The matrix is symmetric by
/// construction upstream, but nothing here relies on that.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from parsed rows, rejecting non-square input.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> crate::error::Result<Self> {
        let dim = rows.len();
        let mut scores = Vec::with_capacity(dim * dim);

        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(crate::error::DataLoadError::RaggedRow {
                    row: idx + 1,
                    expected: dim,
                    found: row.len(),
                });
            }
            scores.extend(row);
        }

        Ok(Self { dim, scores })
    }

    /// Number of rows (== number of columns == catalog size)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Similarity scores of movie `idx` against every catalog row
    pub fn row(&self, idx: MovieIdx) -> Option<&[f32]> {
        if idx >= self.dim {
            return None;
        }
        let start = idx * self.dim;
        Some(&self.scores[start..start + self.dim])
    }
}

// =============================================================================
// CatalogIndex - The Loaded, Immutable Catalog
// =============================================================================

/// The loaded catalog plus its aligned similarity matrix.
///
/// Constructed once at startup via [`CatalogIndex::load_from_files`] (or
/// [`CatalogIndex::from_parts`] in tests), then shared read-only via `Arc`.
/// The constructor enforces the alignment invariant between the two
/// artifacts, so every index held by this struct is valid by construction.
#[derive(Debug)]
pub struct CatalogIndex {
    /// Movies in catalog (artifact) order
    pub(crate) movies: Vec<Movie>,
    /// Exact title -> first catalog row with that title
    pub(crate) title_index: HashMap<String, MovieIdx>,
    pub(crate) similarity: SimilarityMatrix,
}

impl CatalogIndex {
    /// Number of movies in the catalog
    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// Get a movie by catalog row index
    pub fn get_movie(&self, idx: MovieIdx) -> Option<&Movie> {
        self.movies.get(idx)
    }

    /// All movies in catalog order
    ///
    /// This is the population for a title-selection surface.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Resolve an exact title to its catalog row.
    ///
    /// Returns the first row for a duplicated title, `None` for an unknown
    /// one. Matching is exact on the title string.
    pub fn movie_idx_by_title(&self, title: &str) -> Option<MovieIdx> {
        self.title_index.get(title).copied()
    }

    /// Similarity scores of movie `idx` against the whole catalog
    pub fn similarity_row(&self, idx: MovieIdx) -> Option<&[f32]> {
        let row = self.similarity.row(idx);
        debug_assert!(row.map_or(true, |r| r.len() == self.movies.len()));
        row
    }
}
