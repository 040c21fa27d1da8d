//! Server crate for the CineMatch recommendation engine.
//!
//! This crate contains the orchestrator that wires the similarity ranker
//! and the poster resolver into one request flow.

pub mod orchestrator;

pub use orchestrator::{MovieRecommendation, RecommendationOrchestrator};
