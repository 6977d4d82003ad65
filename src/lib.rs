//! WikiRacer - Wikipedia Link-Race Path Finder
//!
//! Finds a short hyperlink path between two Wikipedia articles (possibly
//! in different language editions) with a bidirectional, greedy
//! best-first search over the live MediaWiki link graph.
//!
//! ## Core Design
//!
//! - **Bidirectional rounds**: two frontiers expand toward each other in
//!   discrete rounds of batched, concurrent API calls
//! - **Meeting detection**: every discovered node is checked against the
//!   opposite side before insertion; the first task to see the other half
//!   wins a compare-and-swap and cancels everything in flight
//! - **Interwiki bridging**: lang-links are traversed symmetrically, so
//!   paths may hop between the supported language editions
//! - **Hard deadline**: the whole query is bounded; timeouts surface as
//!   an empty path, never an error
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use wikiracer::{SearchConfig, SearchEngine, WikiClient};
//!
//! let config = SearchConfig::aggressive();
//! let client = Arc::new(WikiClient::new(&config)?);
//! let engine = SearchEngine::new(client, config);
//! let outcome = engine.search("Кошка", "Arch Linux", "ru").await;
//! ```
//!
//! ## Modules
//!
//! - [`search`]: the path-finding engine (frontiers, heuristic, rounds)
//! - [`client`]: MediaWiki query client and language prober
//! - [`server`]: REST facade over the engine
//! - [`cli`]: command implementations
//! - [`config`]: tuning profiles and the figment loader

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod search;
pub mod server;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{ConfigLoader, HeuristicWeights, SearchConfig, TuningProfile};

// Error Types
pub use types::{Result, WikiError};

// Data Model
pub use types::{Direction, WikiNode};

// =============================================================================
// Engine Re-exports
// =============================================================================

pub use search::{Frontier, Scorer, SearchEngine, SearchOutcome, VisitedMap};

// =============================================================================
// Client Re-exports
// =============================================================================

pub use client::{LangLink, Page, SharedSource, WikiClient, WikiSource};
