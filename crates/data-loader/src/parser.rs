//! Parsers for the two precomputed artifacts.
//!
//! - movies.dat: movieId::title, one movie per line, row order = catalog order
//! - similarity.dat: one matrix row per line, space-separated f32 scores,
//!   row i aligned to catalog row i
//!
//! Both files are plain UTF-8 text. Empty lines are skipped; anything else
//! that doesn't parse is an error with file/line context.

use crate::error::{DataLoadError, Result};
use crate::types::{Movie, SimilarityMatrix};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a file into lines, mapping a missing file to a dedicated error
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Parse the movies.dat file
///
/// Format: movieId::title
///
/// The title is everything after the first "::", so titles containing the
/// separator survive intact.
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let lines = read_lines(path)?;
    let mut movies = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue; // Skip empty lines
        }

        let (movie_id, title) =
            line_trimmed
                .split_once("::")
                .ok_or_else(|| DataLoadError::ParseError {
                    file: "movies.dat".to_string(),
                    line: line_no,
                    reason: "Missing '::' separator".to_string(),
                })?;

        let id = movie_id.parse().map_err(|e| DataLoadError::ParseError {
            file: "movies.dat".to_string(),
            line: line_no,
            reason: format!("Invalid movieId: {}", e),
        })?;

        if title.is_empty() {
            return Err(DataLoadError::ParseError {
                file: "movies.dat".to_string(),
                line: line_no,
                reason: "Empty title".to_string(),
            });
        }

        movies.push(Movie {
            id,
            title: title.to_string(),
        });
    }

    Ok(movies)
}

/// Parse the similarity.dat file
///
/// Format: one row per line, scores separated by whitespace. The matrix must
/// come out square; [`SimilarityMatrix::from_rows`] rejects ragged rows.
pub fn parse_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let lines = read_lines(path)?;
    let mut rows = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue; // Skip empty lines
        }

        let mut row = Vec::new();
        for field in line_trimmed.split_whitespace() {
            let score: f32 = field.parse().map_err(|e| DataLoadError::ParseError {
                file: "similarity.dat".to_string(),
                line: line_no,
                reason: format!("Invalid score '{}': {}", field, e),
            })?;
            row.push(score);
        }
        rows.push(row);
    }

    SimilarityMatrix::from_rows(rows)
}
