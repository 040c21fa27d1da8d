use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::CatalogIndex;
use poster_client::{OmdbClient, DEFAULT_OMDB_API_URL};
use ranker::{RankError, SimilarityRanker};
use serde::Deserialize;
use server::{MovieRecommendation, RecommendationOrchestrator};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// CineMatch - Similarity-based movie recommendations
#[derive(Parser)]
#[command(name = "cine-match")]
#[command(about = "Movie recommendations from a precomputed similarity matrix", long_about = None)]
struct Cli {
    /// Path to the directory holding movies.dat and similarity.dat
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every title in catalog order
    List,

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Get the most similar movies for a catalog title
    Recommend {
        /// Exact catalog title to recommend for
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Emit results as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Run benchmark to test ranking performance
    Benchmark {
        /// Number of ranking requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

/// Poster service configuration loaded from environment variables
///
/// The API key is a deployment secret; it comes from `OMDB_API_KEY` in the
/// environment or a local .env file, never from source.
#[derive(Debug, Deserialize)]
struct Config {
    omdb_api_key: Option<String>,

    #[serde(default = "default_omdb_api_url")]
    omdb_api_url: String,
}

fn default_omdb_api_url() -> String {
    DEFAULT_OMDB_API_URL.to_string()
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow!("Failed to load config: {}", e))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load both artifacts (this may take a moment)
    println!("Loading catalog from {}...", cli.data_dir.display());
    let start = Instant::now();
    let catalog = Arc::new(
        CatalogIndex::load_from_files(&cli.data_dir)
            .context("Failed to load catalog artifacts")?,
    );
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.movie_count(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::List => handle_list(catalog),
        Commands::Search { title } => handle_search(catalog, title),
        Commands::Recommend { title, limit, json } => {
            handle_recommend(catalog, title, limit, json).await?
        }
        Commands::Benchmark { requests } => handle_benchmark(catalog, requests).await?,
    }

    Ok(())
}

/// Handle the 'list' command
fn handle_list(catalog: Arc<CatalogIndex>) {
    // Catalog order, the same order a selection input would be populated in
    for movie in catalog.movies() {
        println!("{}", movie.title);
    }
}

/// Handle the 'search' command
fn handle_search(catalog: Arc<CatalogIndex>, title: String) {
    let title_lower = title.to_lowercase();
    let mut matches: Vec<(usize, &str, u32, usize)> = Vec::new();

    for (idx, movie) in catalog.movies().iter().enumerate() {
        let movie_title_lower = movie.title.to_lowercase();

        if movie_title_lower == title_lower {
            // Exact match
            matches.push((idx, &movie.title, movie.id, 0));
        } else if movie_title_lower.contains(&title_lower) {
            // Substring match
            matches.push((idx, &movie.title, movie.id, 1));
        }
    }

    // Sort by relevance (exact match first), then catalog order
    matches.sort_by(|a, b| a.3.cmp(&b.3).then_with(|| a.0.cmp(&b.0)));

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  No titles match.");
        return;
    }
    for (_, movie_title, movie_id, _) in matches.iter().take(20) {
        println!("{}: {}", movie_id, movie_title);
    }
}

/// Handle the 'recommend' command
async fn handle_recommend(
    catalog: Arc<CatalogIndex>,
    title: String,
    limit: usize,
    json: bool,
) -> Result<()> {
    let config = Config::from_env()?;
    let api_key = config.omdb_api_key.ok_or_else(|| {
        anyhow!("OMDB_API_KEY is not set; add it to the environment or a .env file")
    })?;

    let poster_client = Arc::new(OmdbClient::new(api_key, config.omdb_api_url)?);
    let orchestrator = RecommendationOrchestrator::new(catalog, poster_client);

    // Query-time failures are rendered for the user here, never propagated
    // as a crash
    match orchestrator.get_recommendations(&title, limit).await {
        Ok(recommendations) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&recommendations)?);
            } else {
                print_recommendations(&title, &recommendations);
            }
        }
        Err(e @ RankError::TitleNotFound(_)) => {
            eprintln!("{} {}", "✗".red(), e);
            eprintln!("  Try `cine-match search --title <part of the name>` for the exact title.");
        }
        Err(e @ RankError::InsufficientCatalog { .. }) => {
            eprintln!("{} {}", "✗".red(), e);
        }
    }
    Ok(())
}

/// Handle the 'benchmark' command
///
/// Ranking only: no poster calls, so the external service is never hammered
async fn handle_benchmark(catalog: Arc<CatalogIndex>, requests: usize) -> Result<()> {
    let limit = 5;
    if catalog.movie_count() < limit + 1 {
        return Err(anyhow!(
            "Need at least {} movies to benchmark top-{} ranking",
            limit + 1,
            limit
        ));
    }

    let ranker = Arc::new(SimilarityRanker::new(Arc::clone(&catalog)));

    // Sample random catalog titles
    let titles: Vec<String> = (0..requests)
        .map(|_| {
            let idx = rand::random::<u32>() as usize % catalog.movie_count();
            catalog
                .get_movie(idx)
                .expect("sampled index is within the catalog")
                .title
                .clone()
        })
        .collect();

    // Use tokio::spawn to make concurrent requests
    let mut handles = vec![];
    for title in titles {
        let ranker = Arc::clone(&ranker);
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            ranker.recommend(&title, limit)?;
            Ok::<_, RankError>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }

    let total_time: std::time::Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(query: &str, recommendations: &[MovieRecommendation]) {
    println!(
        "{}",
        format!("Because you liked '{}':", query).bold().blue()
    );
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - Score: {:.3}",
            (rank + 1).to_string().green(),
            rec.title,
            rec.score
        );
        println!("   Poster: {}", rec.poster_url);
    }
}
