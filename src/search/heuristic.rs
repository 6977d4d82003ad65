//! Priority Heuristic
//!
//! Maps `(title, lang, direction)` to an integer priority, lower = better.
//! The forward half of the search steers toward the END article's words
//! and language, the backward half toward the START article's. Scores are
//! pure: for a fixed scorer the same inputs always produce the same value.

use std::collections::HashSet;

use crate::config::HeuristicWeights;
use crate::constants::languages;
use crate::types::Direction;

/// Lower-cased whitespace tokens longer than 2 bytes.
pub fn title_words(title: &str) -> HashSet<String> {
    title
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Direction-aware scorer for one query.
///
/// Built after both endpoints are resolved, so the word sets reflect the
/// server-canonical titles.
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: HeuristicWeights,
    start_lang: String,
    start_words: HashSet<String>,
    end_lang: String,
    end_words: HashSet<String>,
}

impl Scorer {
    pub fn new(
        weights: HeuristicWeights,
        start_lang: &str,
        start_title: &str,
        end_lang: &str,
        end_title: &str,
    ) -> Self {
        Self {
            weights,
            start_lang: start_lang.to_string(),
            start_words: title_words(start_title),
            end_lang: end_lang.to_string(),
            end_words: title_words(end_title),
        }
    }

    /// Score a candidate title. Adjustments stack.
    pub fn score(&self, title: &str, lang: &str, direction: Direction) -> i32 {
        let (target_words, target_lang) = match direction {
            Direction::Forward => (&self.end_words, &self.end_lang),
            Direction::Backward => (&self.start_words, &self.start_lang),
        };

        let mut score = self.weights.base;
        let lower = title.to_lowercase();

        if lang == target_lang {
            score -= self.weights.lang_match;
        }

        for word in lower.split_whitespace() {
            if word.len() > 2 && target_words.contains(word) {
                score -= self.weights.exact_word;
            }
        }

        for word in target_words {
            if lower.contains(word.as_str()) {
                score -= self.weights.substring;
            }
        }

        if languages::HUBS.contains(&lang) {
            score -= self.weights.hub_lang;
        }

        if title.len() < self.weights.short_title_len {
            score -= self.weights.short_title;
        }

        if title.len() > self.weights.long_title_len {
            score += self.weights.long_title;
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> Scorer {
        Scorer::new(
            HeuristicWeights::default(),
            "ru",
            "Россия",
            "en",
            "Arch Linux",
        )
    }

    #[test]
    fn test_title_words_filters_short_tokens() {
        let words = title_words("The Art of War");
        assert!(words.contains("the"));
        assert!(words.contains("art"));
        assert!(words.contains("war"));
        assert!(!words.contains("of"));
    }

    #[test]
    fn test_neutral_title_gets_base_adjustments_only() {
        let s = scorer();
        // de: no lang match, no words, no hub; short title bonus applies
        assert_eq!(s.score("Bonn", "de", Direction::Forward), 100 - 5);
    }

    #[test]
    fn test_forward_targets_end_side() {
        let s = scorer();
        // lang match (en) + hub (en) + exact word + substring + short title
        let score = s.score("Linux", "en", Direction::Forward);
        assert_eq!(score, 100 - 25 - 10 - 40 - 20 - 5);
        // the same title scored backward only gets hub + short bonuses
        let backward = s.score("Linux", "en", Direction::Backward);
        assert_eq!(backward, 100 - 10 - 5);
    }

    #[test]
    fn test_backward_targets_start_side() {
        let s = scorer();
        let score = s.score("Россия", "ru", Direction::Backward);
        assert_eq!(score, 100 - 25 - 40 - 20 - 10 - 5);
    }

    #[test]
    fn test_long_title_penalty() {
        let s = scorer();
        let long = "List of minor planets discovered between 1990 and 2000 volume two";
        assert!(long.len() > 60);
        assert_eq!(s.score(long, "de", Direction::Forward), 100 + 15);
    }

    #[test]
    fn test_score_is_idempotent() {
        let s = scorer();
        let first = s.score("GNU/Linux naming controversy", "en", Direction::Forward);
        for _ in 0..10 {
            assert_eq!(
                s.score("GNU/Linux naming controversy", "en", Direction::Forward),
                first
            );
        }
    }

    #[test]
    fn test_adjustments_stack() {
        let s = scorer();
        // "Arch Linux" forward: lang + both exact words + both substrings
        // + hub + short title
        let score = s.score("Arch Linux", "en", Direction::Forward);
        assert_eq!(score, 100 - 25 - 40 * 2 - 20 * 2 - 10 - 5);
    }
}
