//! Result types produced by the ranker.

use data_loader::MovieIdx;

/// A single ranked result: a catalog row and its similarity to the query.
///
/// Ephemeral per-request value; the orchestrator enriches it with catalog
/// metadata and a poster URL before display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedMovie {
    /// Catalog row of the recommended movie (never the query row)
    pub movie_idx: MovieIdx,
    /// Similarity score of this movie against the query movie
    pub score: f32,
}

impl RankedMovie {
    pub fn new(movie_idx: MovieIdx, score: f32) -> Self {
        Self { movie_idx, score }
    }
}
