//! Bidirectional Path Search
//!
//! The path-finding core: heuristic scoring, per-direction frontiers and
//! visited maps, round-based concurrent expansion with meeting detection,
//! and path reconstruction.

pub mod engine;
pub mod frontier;
pub mod heuristic;
pub mod path;
pub mod visited;

pub use engine::{SearchEngine, SearchOutcome};
pub use frontier::Frontier;
pub use heuristic::{Scorer, title_words};
pub use visited::VisitedMap;
