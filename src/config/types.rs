//! Configuration Types
//!
//! Search tuning with sensible defaults and two named profiles. Profiles
//! bundle the knobs that trade latency for coverage: how many frontier
//! nodes each round drains, how long each request may take, and how long
//! the whole search may run.

use serde::{Deserialize, Serialize};

use crate::constants::{languages, search};
use crate::types::{Result, WikiError};

// =============================================================================
// Tuning Profile
// =============================================================================

/// Named tuning profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TuningProfile {
    /// Small rounds, short deadline. Suited to interactive CLI use.
    #[default]
    Conservative,
    /// Large rounds, tight per-request timeout, long deadline. Suited to
    /// the API server where the HTTP pool is already warm.
    Aggressive,
    /// Conservative pacing with the reduced weight table. Cheaper scoring
    /// at the cost of weaker steering.
    Simple,
}

impl std::fmt::Display for TuningProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningProfile::Conservative => write!(f, "conservative"),
            TuningProfile::Aggressive => write!(f, "aggressive"),
            TuningProfile::Simple => write!(f, "simple"),
        }
    }
}

impl std::str::FromStr for TuningProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conservative" => Ok(TuningProfile::Conservative),
            "aggressive" => Ok(TuningProfile::Aggressive),
            "simple" => Ok(TuningProfile::Simple),
            _ => Err(format!(
                "Unknown profile: {}. Valid values: conservative, aggressive, simple",
                s
            )),
        }
    }
}

// =============================================================================
// Heuristic Weights
// =============================================================================

/// Additive adjustments applied by the priority heuristic.
///
/// All weights are subtracted from the base score except `long_title`,
/// which is a penalty. Lower final scores are expanded first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Starting score before adjustments.
    pub base: i32,
    /// Bonus when the candidate's language equals the target-side language.
    pub lang_match: i32,
    /// Bonus per target-side word appearing as a whole token of the title.
    pub exact_word: i32,
    /// Bonus per target-side word occurring as a substring of the title.
    pub substring: i32,
    /// Bonus for hub languages (en, ru).
    pub hub_lang: i32,
    /// Bonus for titles shorter than `short_title_len` bytes.
    pub short_title: i32,
    /// Penalty for titles longer than `long_title_len` bytes.
    pub long_title: i32,
    /// Byte length below which the short-title bonus applies.
    pub short_title_len: usize,
    /// Byte length above which the long-title penalty applies.
    pub long_title_len: usize,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            base: 100,
            lang_match: 25,
            exact_word: 40,
            substring: 20,
            hub_lang: 10,
            short_title: 5,
            long_title: 15,
            short_title_len: 20,
            long_title_len: 60,
        }
    }
}

impl HeuristicWeights {
    /// Simpler variant: no short-title bonus, milder word bonuses.
    pub fn simple() -> Self {
        Self {
            base: 100,
            lang_match: 20,
            exact_word: 30,
            substring: 15,
            hub_lang: 10,
            short_title: 0,
            long_title: 10,
            short_title_len: 20,
            long_title_len: 50,
        }
    }
}

// =============================================================================
// Search Configuration
// =============================================================================

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Profile the numeric fields were derived from.
    pub profile: TuningProfile,

    /// Frontier nodes drained per direction per round.
    pub max_per_round: usize,

    /// Titles per MediaWiki query (capped at the API limit of 50).
    pub batch_size: usize,

    /// Concurrent expansion calls in flight.
    pub max_concurrency: usize,

    /// Per-request timeout (milliseconds).
    pub request_timeout_ms: u64,

    /// Per-probe timeout for language detection (milliseconds).
    pub probe_timeout_ms: u64,

    /// Global deadline for one search (seconds).
    pub global_deadline_secs: u64,

    /// Language used when probing fails and the caller gave none.
    pub default_lang: String,

    /// Heuristic weight table.
    pub weights: HeuristicWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::conservative()
    }
}

impl SearchConfig {
    /// Conservative profile: 100 nodes/round, 1.5 s requests, 5 s deadline.
    pub fn conservative() -> Self {
        Self {
            profile: TuningProfile::Conservative,
            max_per_round: 100,
            batch_size: search::MAX_BATCH_SIZE,
            max_concurrency: search::DEFAULT_MAX_CONCURRENCY,
            request_timeout_ms: 1500,
            probe_timeout_ms: 500,
            global_deadline_secs: 5,
            default_lang: languages::DEFAULT.to_string(),
            weights: HeuristicWeights::default(),
        }
    }

    /// Aggressive profile: 250 nodes/round, 800 ms requests, 10 s deadline.
    pub fn aggressive() -> Self {
        Self {
            profile: TuningProfile::Aggressive,
            max_per_round: 250,
            batch_size: search::MAX_BATCH_SIZE,
            max_concurrency: search::DEFAULT_MAX_CONCURRENCY,
            request_timeout_ms: 800,
            probe_timeout_ms: 500,
            global_deadline_secs: 10,
            default_lang: languages::DEFAULT.to_string(),
            weights: HeuristicWeights::default(),
        }
    }

    /// Simple profile: conservative pacing, reduced weight table.
    pub fn simple() -> Self {
        Self {
            profile: TuningProfile::Simple,
            weights: HeuristicWeights::simple(),
            ..Self::conservative()
        }
    }

    /// Config for a named profile.
    pub fn for_profile(profile: TuningProfile) -> Self {
        match profile {
            TuningProfile::Conservative => Self::conservative(),
            TuningProfile::Aggressive => Self::aggressive(),
            TuningProfile::Simple => Self::simple(),
        }
    }

    /// Validate configuration values are within acceptable ranges.
    /// Returns `WikiError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 || self.batch_size > search::MAX_BATCH_SIZE {
            return Err(WikiError::Config(format!(
                "batch_size must be 1..={}, got {}",
                search::MAX_BATCH_SIZE,
                self.batch_size
            )));
        }

        if self.max_per_round == 0 {
            return Err(WikiError::Config(
                "max_per_round must be greater than 0".to_string(),
            ));
        }

        if self.max_concurrency == 0 {
            return Err(WikiError::Config(
                "max_concurrency must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout_ms == 0 || self.global_deadline_secs == 0 {
            return Err(WikiError::Config(
                "timeouts must be greater than 0".to_string(),
            ));
        }

        if !languages::is_supported(&self.default_lang) {
            return Err(WikiError::UnsupportedLanguage(self.default_lang.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles() {
        let conservative = SearchConfig::conservative();
        assert_eq!(conservative.max_per_round, 100);
        assert_eq!(conservative.global_deadline_secs, 5);
        assert_eq!(conservative.request_timeout_ms, 1500);

        let aggressive = SearchConfig::aggressive();
        assert_eq!(aggressive.max_per_round, 250);
        assert_eq!(aggressive.global_deadline_secs, 10);
        assert_eq!(aggressive.request_timeout_ms, 800);

        assert_eq!(
            SearchConfig::for_profile(TuningProfile::Aggressive).max_per_round,
            aggressive.max_per_round
        );
    }

    #[test]
    fn test_simple_profile_uses_reduced_weights() {
        let simple = SearchConfig::simple();
        assert_eq!(simple.profile, TuningProfile::Simple);
        // conservative pacing, reduced weight table
        assert_eq!(simple.max_per_round, 100);
        assert_eq!(simple.weights.short_title, 0);
        assert_eq!(simple.weights.exact_word, 30);
        assert!(simple.validate().is_ok());
    }

    #[test]
    fn test_default_is_conservative() {
        let config = SearchConfig::default();
        assert_eq!(config.profile, TuningProfile::Conservative);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_batch_size() {
        let mut config = SearchConfig::default();
        config.batch_size = 0;
        assert!(config.validate().is_err());
        config.batch_size = 51;
        assert!(config.validate().is_err());
        config.batch_size = 50;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_default_lang() {
        let mut config = SearchConfig::default();
        config.default_lang = "ja".to_string();
        assert!(matches!(
            config.validate(),
            Err(WikiError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!(
            "AGGRESSIVE".parse::<TuningProfile>().unwrap(),
            TuningProfile::Aggressive
        );
        assert_eq!(
            "simple".parse::<TuningProfile>().unwrap(),
            TuningProfile::Simple
        );
        assert!("balanced".parse::<TuningProfile>().is_err());
        assert_eq!(TuningProfile::Conservative.to_string(), "conservative");
        assert_eq!(TuningProfile::Simple.to_string(), "simple");
    }

    #[test]
    fn test_simple_weights() {
        let weights = HeuristicWeights::simple();
        assert_eq!(weights.short_title, 0);
        assert_eq!(weights.exact_word, 30);
    }
}
