//! Global Constants
//!
//! Centralized constants for endpoints and tuning.
//! All magic numbers should be defined here with documentation.

/// Supported Wikipedia language editions
pub mod languages {
    /// Language editions the search is allowed to traverse.
    ///
    /// Lang-links pointing outside this set are dropped at decode time.
    pub const SUPPORTED: [&str; 8] = ["en", "ru", "de", "fr", "es", "it", "pt", "uk"];

    /// Hub editions with disproportionately many interwiki connections,
    /// favoured by the heuristic.
    pub const HUBS: [&str; 2] = ["en", "ru"];

    /// Default edition when the caller omits one.
    pub const DEFAULT: &str = "ru";

    /// Check whether a language code is in the supported set.
    pub fn is_supported(lang: &str) -> bool {
        SUPPORTED.contains(&lang)
    }

    /// MediaWiki query endpoint for a language edition.
    pub fn api_url(lang: &str) -> String {
        format!("https://{}.wikipedia.org/w/api.php", lang)
    }
}

/// HTTP/Network constants
pub mod network {
    /// User agent identifying the tool to Wikimedia.
    pub const USER_AGENT: &str = "WikiRacer/5.0";

    /// Idle connections kept per host (one host per language edition).
    pub const POOL_MAX_IDLE_PER_HOST: usize = 200;

    /// Idle connection lifetime (seconds).
    pub const POOL_IDLE_TIMEOUT_SECS: u64 = 90;
}

/// Search tuning constants
pub mod search {
    /// Hard upper bound on titles per MediaWiki query (API limit).
    pub const MAX_BATCH_SIZE: usize = 50;

    /// Concurrent expansion calls in flight per round.
    pub const DEFAULT_MAX_CONCURRENCY: usize = 32;
}
