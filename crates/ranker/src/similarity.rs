//! Similarity Ranker - top-K lookup over the precomputed matrix
//!
//! Answers "which K movies are most similar to this one" from the loaded
//! similarity matrix:
//!
//! ## Algorithm
//! 1. Resolve the query title to its catalog row
//! 2. Take that row of the similarity matrix
//! 3. Pair every column index with its score, excluding the query row itself
//! 4. Sort descending by score; equal scores keep ascending catalog order
//! 5. Return the top K
//!
//! The query movie is excluded by identity (matching row index), not by
//! assuming the self-score sorts first, so a row with a noisy self-score
//! still never recommends the query movie back.

use crate::error::RankError;
use crate::types::RankedMovie;
use data_loader::CatalogIndex;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ranks catalog movies by precomputed similarity to a query movie
pub struct SimilarityRanker {
    /// Shared reference to the loaded catalog (read-only, so no Mutex needed)
    catalog: Arc<CatalogIndex>,
}

impl SimilarityRanker {
    /// Create a new ranker over a loaded catalog
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        Self { catalog }
    }

    /// Top `limit` movies most similar to `title`, best first.
    ///
    /// Pure function of the loaded data: repeated calls with the same
    /// arguments return identical ordered results.
    ///
    /// # Errors
    /// - [`RankError::TitleNotFound`] if `title` matches no catalog entry
    /// - [`RankError::InsufficientCatalog`] if fewer than `limit` other
    ///   movies exist to recommend
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str, limit: usize) -> Result<Vec<RankedMovie>, RankError> {
        let query_idx = self
            .catalog
            .movie_idx_by_title(title)
            .ok_or_else(|| RankError::TitleNotFound(title.to_string()))?;

        // limit other movies must exist besides the query itself
        let available = self.catalog.movie_count();
        if available < limit + 1 {
            return Err(RankError::InsufficientCatalog {
                needed: limit + 1,
                available,
            });
        }

        let row = self
            .catalog
            .similarity_row(query_idx)
            .expect("title index points at a valid catalog row");

        // Enumeration order is ascending catalog index; the stable sort
        // keeps that order among equal scores
        let mut ranked: Vec<RankedMovie> = row
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != query_idx)
            .map(|(idx, &score)| RankedMovie::new(idx, score))
            .collect();

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked.truncate(limit);

        debug!(
            query_idx,
            results = ranked.len(),
            "Ranked similar movies for '{}'",
            title
        );
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Movie, SimilarityMatrix};

    /// Catalog of `n` movies with the given similarity rows
    fn build_catalog(rows: Vec<Vec<f32>>) -> Arc<CatalogIndex> {
        let movies = (0..rows.len())
            .map(|i| Movie {
                id: i as u32 + 1,
                title: format!("Movie {}", i),
            })
            .collect();
        let matrix = SimilarityMatrix::from_rows(rows).unwrap();
        Arc::new(CatalogIndex::from_parts(movies, matrix).unwrap())
    }

    #[test]
    fn test_ranking_order_descending_by_score() {
        // Query row for Movie 0: self 1.0, then 0.9 / 0.5 / 0.2
        let catalog = build_catalog(vec![
            vec![1.0, 0.9, 0.5, 0.2],
            vec![0.9, 1.0, 0.4, 0.3],
            vec![0.5, 0.4, 1.0, 0.6],
            vec![0.2, 0.3, 0.6, 1.0],
        ]);
        let ranker = SimilarityRanker::new(catalog);

        let ranked = ranker.recommend("Movie 0", 3).unwrap();

        let indices: Vec<usize> = ranked.iter().map(|r| r.movie_idx).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(ranked[0].score, 0.9);
        assert_eq!(ranked[1].score, 0.5);
        assert_eq!(ranked[2].score, 0.2);
    }

    #[test]
    fn test_tie_break_prefers_lower_catalog_index() {
        let catalog = build_catalog(vec![
            vec![1.0, 0.7, 0.7, 0.7],
            vec![0.7, 1.0, 0.0, 0.0],
            vec![0.7, 0.0, 1.0, 0.0],
            vec![0.7, 0.0, 0.0, 1.0],
        ]);
        let ranker = SimilarityRanker::new(catalog);

        let ranked = ranker.recommend("Movie 0", 3).unwrap();

        // All three candidates score 0.7; original order must hold
        let indices: Vec<usize> = ranked.iter().map(|r| r.movie_idx).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_excludes_query_by_identity_not_position() {
        // Self-similarity of Movie 1 is NOT the row maximum; the query row
        // must still never appear in its own results
        let catalog = build_catalog(vec![
            vec![1.0, 0.9, 0.1, 0.1],
            vec![0.9, 0.5, 0.8, 0.2],
            vec![0.1, 0.8, 1.0, 0.3],
            vec![0.1, 0.2, 0.3, 1.0],
        ]);
        let ranker = SimilarityRanker::new(catalog);

        let ranked = ranker.recommend("Movie 1", 3).unwrap();

        let indices: Vec<usize> = ranked.iter().map(|r| r.movie_idx).collect();
        assert!(!indices.contains(&1), "Query row leaked into results");
        assert_eq!(indices, vec![0, 2, 3]);
    }

    fn six_movie_catalog() -> Arc<CatalogIndex> {
        // Row i scores: self 1.0, everything else (i + j) / 10 — distinct
        // enough for stable assertions
        let rows = (0..6)
            .map(|i| {
                (0..6)
                    .map(|j| {
                        if i == j {
                            1.0
                        } else {
                            (i + j) as f32 / 10.0
                        }
                    })
                    .collect()
            })
            .collect();
        build_catalog(rows)
    }

    #[test]
    fn test_every_title_gets_five_distinct_results() {
        let catalog = six_movie_catalog();
        let ranker = SimilarityRanker::new(Arc::clone(&catalog));

        for movie in catalog.movies() {
            let ranked = ranker.recommend(&movie.title, 5).unwrap();

            assert_eq!(ranked.len(), 5);

            let mut indices: Vec<usize> = ranked.iter().map(|r| r.movie_idx).collect();
            let query_idx = catalog.movie_idx_by_title(&movie.title).unwrap();
            assert!(!indices.contains(&query_idx));

            indices.sort_unstable();
            indices.dedup();
            assert_eq!(indices.len(), 5, "Results must be distinct");
        }
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let catalog = six_movie_catalog();
        let ranker = SimilarityRanker::new(catalog);

        let first = ranker.recommend("Movie 2", 5).unwrap();
        let second = ranker.recommend("Movie 2", 5).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_title_is_not_found() {
        let catalog = six_movie_catalog();
        let ranker = SimilarityRanker::new(catalog);

        let err = ranker.recommend("Nonexistent Title", 5).unwrap_err();

        assert_eq!(err, RankError::TitleNotFound("Nonexistent Title".to_string()));
    }

    #[test]
    fn test_catalog_too_small_for_limit() {
        let catalog = build_catalog(vec![
            vec![1.0, 0.5, 0.2],
            vec![0.5, 1.0, 0.4],
            vec![0.2, 0.4, 1.0],
        ]);
        let ranker = SimilarityRanker::new(catalog);

        let err = ranker.recommend("Movie 0", 5).unwrap_err();

        assert_eq!(
            err,
            RankError::InsufficientCatalog {
                needed: 6,
                available: 3,
            }
        );
    }

    #[test]
    fn test_exact_limit_boundary_succeeds() {
        let catalog = six_movie_catalog();
        let ranker = SimilarityRanker::new(catalog);

        // 6 movies supports exactly top-5
        assert_eq!(ranker.recommend("Movie 0", 5).unwrap().len(), 5);
    }
}
