//! Error types for the data-loader crate.
//!
//! Everything that can go wrong while reading the two artifacts is a
//! variant here. Artifact errors are fatal: the process cannot serve
//! recommendations from a catalog it could not load or validate.

use thiserror::Error;

/// Errors that can occur while loading the catalog and similarity artifacts
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Artifact file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading an artifact
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in an artifact couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A similarity row has a different width than the matrix dimension
    #[error("Similarity row {row} has {found} scores, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Catalog and similarity matrix sizes disagree
    ///
    /// Row i of the matrix must describe catalog row i; a size mismatch
    /// means the two artifacts were not built together.
    #[error("Catalog has {movies} movies but similarity matrix is {rows}x{rows}")]
    DimensionMismatch { movies: usize, rows: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
