//! # Recommendation Orchestrator
//!
//! This module coordinates a recommendation request:
//! 1. Rank the top N most similar movies for the query title
//! 2. Resolve the N poster URLs concurrently
//! 3. Enrich ranked rows with catalog metadata
//!
//! Ranking errors (unknown title, undersized catalog) propagate to the
//! caller for user-visible rendering. Poster failures never abort a
//! request: each failed resolution is logged and degraded to the
//! placeholder, so recommendations stay usable while the image service is
//! down.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use data_loader::{CatalogIndex, Movie, MovieId};
use poster_client::{PosterResolver, PLACEHOLDER_POSTER_URL};
use ranker::{RankError, RankedMovie, SimilarityRanker};

/// Final recommendation returned to the user
#[derive(Debug, Clone, Serialize)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
    pub poster_url: String,
}

/// Coordinates the ranker and the poster resolver for one catalog.
///
/// Constructed once at startup; the catalog behind it is read-only for the
/// process lifetime, so the orchestrator is freely shareable.
pub struct RecommendationOrchestrator {
    catalog: Arc<CatalogIndex>,
    ranker: SimilarityRanker,
    poster_resolver: Arc<dyn PosterResolver>,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator over a loaded catalog and a poster resolver.
    ///
    /// The resolver is injected as a trait object so tests can supply a
    /// fake instead of the HTTP client.
    pub fn new(catalog: Arc<CatalogIndex>, poster_resolver: Arc<dyn PosterResolver>) -> Self {
        let ranker = SimilarityRanker::new(Arc::clone(&catalog));
        Self {
            catalog,
            ranker,
            poster_resolver,
        }
    }

    /// Main entry point: top `limit` recommendations for a query title.
    ///
    /// Returns the recommendations in ranked order, each carrying a poster
    /// URL (real or placeholder).
    pub async fn get_recommendations(
        &self,
        title: &str,
        limit: usize,
    ) -> Result<Vec<MovieRecommendation>, RankError> {
        let start_time = Instant::now();

        let ranked = self.ranker.recommend(title, limit)?;
        info!(
            "Ranked {} similar movies for '{}'",
            ranked.len(),
            title
        );

        let recommendations = self.resolve_posters(&ranked).await;
        info!(
            "Served {} recommendations for '{}' in {:.2?}",
            recommendations.len(),
            title,
            start_time.elapsed()
        );

        Ok(recommendations)
    }

    /// Resolve posters for the ranked movies concurrently, preserving order.
    ///
    /// The fetches are independent, so each gets its own task; the request
    /// limit (typically 5) bounds how many are in flight at once.
    async fn resolve_posters(&self, ranked: &[RankedMovie]) -> Vec<MovieRecommendation> {
        let display: Vec<(Movie, f32)> = ranked
            .iter()
            .filter_map(|r| {
                let movie = self.catalog.get_movie(r.movie_idx)?;
                Some((movie.clone(), r.score))
            })
            .collect();

        let mut handles = Vec::with_capacity(display.len());
        for (movie, score) in display {
            let resolver = Arc::clone(&self.poster_resolver);
            handles.push(tokio::spawn(async move {
                let poster_url = match resolver.resolve(&movie.title).await {
                    Ok(url) => url,
                    Err(e) => {
                        warn!(
                            title = %movie.title,
                            error = %e,
                            "Poster resolution failed, using placeholder"
                        );
                        PLACEHOLDER_POSTER_URL.to_string()
                    }
                };

                MovieRecommendation {
                    movie_id: movie.id,
                    title: movie.title,
                    score,
                    poster_url,
                }
            }));
        }

        // Awaiting in spawn order keeps the output in ranked order
        let mut recommendations = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(recommendation) => recommendations.push(recommendation),
                Err(e) => warn!(error = %e, "Poster task panicked"),
            }
        }
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use data_loader::SimilarityMatrix;
    use poster_client::PosterError;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    /// Six-movie catalog; row 0 ranks the rest as 1, 2, 3, 4, 5
    fn build_test_catalog() -> Arc<CatalogIndex> {
        let movies = vec![
            Movie {
                id: 10,
                title: "The Matrix".to_string(),
            },
            Movie {
                id: 20,
                title: "Dark City".to_string(),
            },
            Movie {
                id: 30,
                title: "Blade Runner".to_string(),
            },
            Movie {
                id: 40,
                title: "Ghost in the Shell".to_string(),
            },
            Movie {
                id: 50,
                title: "Equilibrium".to_string(),
            },
            Movie {
                id: 60,
                title: "Gattaca".to_string(),
            },
        ];

        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.5],
            vec![0.9, 1.0, 0.7, 0.6, 0.5, 0.4],
            vec![0.8, 0.7, 1.0, 0.5, 0.4, 0.3],
            vec![0.7, 0.6, 0.5, 1.0, 0.3, 0.2],
            vec![0.6, 0.5, 0.4, 0.3, 1.0, 0.1],
            vec![0.5, 0.4, 0.3, 0.2, 0.1, 1.0],
        ])
        .unwrap();

        Arc::new(CatalogIndex::from_parts(movies, matrix).unwrap())
    }

    /// Resolver that answers with a deterministic URL per title
    struct FixedPosterResolver;

    #[async_trait]
    impl PosterResolver for FixedPosterResolver {
        async fn resolve(&self, title: &str) -> Result<String, PosterError> {
            Ok(format!("https://posters.test/{}.jpg", title.replace(' ', "-")))
        }
    }

    /// Resolver that always fails, as if the service were down
    struct FailingPosterResolver;

    #[async_trait]
    impl PosterResolver for FailingPosterResolver {
        async fn resolve(&self, _title: &str) -> Result<String, PosterError> {
            Err(PosterError::Service {
                status: 503,
                body: "service unavailable".to_string(),
            })
        }
    }

    fn build_orchestrator(resolver: Arc<dyn PosterResolver>) -> RecommendationOrchestrator {
        RecommendationOrchestrator::new(build_test_catalog(), resolver)
    }

    // ============================================================================
    // Tests
    // ============================================================================

    #[tokio::test]
    async fn test_recommendations_are_ranked_and_enriched() {
        let orchestrator = build_orchestrator(Arc::new(FixedPosterResolver));

        let recommendations = orchestrator
            .get_recommendations("The Matrix", 5)
            .await
            .unwrap();

        assert_eq!(recommendations.len(), 5);

        let titles: Vec<&str> = recommendations.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Dark City",
                "Blade Runner",
                "Ghost in the Shell",
                "Equilibrium",
                "Gattaca"
            ]
        );

        // Catalog metadata and poster travel with each result
        assert_eq!(recommendations[0].movie_id, 20);
        assert_eq!(recommendations[0].score, 0.9);
        assert_eq!(
            recommendations[0].poster_url,
            "https://posters.test/Dark-City.jpg"
        );
    }

    #[tokio::test]
    async fn test_query_title_never_recommended() {
        let orchestrator = build_orchestrator(Arc::new(FixedPosterResolver));

        let recommendations = orchestrator
            .get_recommendations("Blade Runner", 5)
            .await
            .unwrap();

        assert!(recommendations.iter().all(|r| r.title != "Blade Runner"));
    }

    #[tokio::test]
    async fn test_poster_failure_degrades_to_placeholder() {
        let orchestrator = build_orchestrator(Arc::new(FailingPosterResolver));

        let recommendations = orchestrator
            .get_recommendations("The Matrix", 5)
            .await
            .unwrap();

        // Ranking survives a dead poster service; every item shows the
        // placeholder instead
        assert_eq!(recommendations.len(), 5);
        assert!(recommendations
            .iter()
            .all(|r| r.poster_url == PLACEHOLDER_POSTER_URL));
        assert_eq!(recommendations[0].title, "Dark City");
    }

    #[tokio::test]
    async fn test_unknown_title_propagates_not_found() {
        let orchestrator = build_orchestrator(Arc::new(FixedPosterResolver));

        let err = orchestrator
            .get_recommendations("Nonexistent Title", 5)
            .await
            .unwrap_err();

        assert_eq!(err, RankError::TitleNotFound("Nonexistent Title".to_string()));
    }

    #[tokio::test]
    async fn test_limit_larger_than_catalog_propagates() {
        let orchestrator = build_orchestrator(Arc::new(FixedPosterResolver));

        let err = orchestrator
            .get_recommendations("The Matrix", 10)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RankError::InsufficientCatalog {
                needed: 11,
                available: 6,
            }
        );
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let orchestrator = build_orchestrator(Arc::new(FixedPosterResolver));

        let first = orchestrator
            .get_recommendations("Gattaca", 5)
            .await
            .unwrap();
        let second = orchestrator
            .get_recommendations("Gattaca", 5)
            .await
            .unwrap();

        let first_titles: Vec<_> = first.iter().map(|r| r.title.clone()).collect();
        let second_titles: Vec<_> = second.iter().map(|r| r.title.clone()).collect();
        assert_eq!(first_titles, second_titles);
    }
}
