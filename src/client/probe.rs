//! Language Prober
//!
//! Resolves a raw user title to a `(language, canonical title)` pair by
//! probing a small candidate set of language editions concurrently. The
//! candidate order is a cheap character-class guess: Cyrillic titles try
//! ru first, everything else tries en first. Best effort only: when no
//! probe answers in time the caller falls back to its default language.

use std::time::Duration;
use tracing::debug;

use super::WikiSource;

/// Guess the home edition of a title from its script.
pub fn guess_lang(title: &str) -> &'static str {
    let cyrillic = title
        .chars()
        .any(|c| ('А'..='я').contains(&c) || c == 'ё' || c == 'Ё');
    if cyrillic { "ru" } else { "en" }
}

/// Candidate editions to probe, most likely first.
pub fn candidates(title: &str) -> [&'static str; 2] {
    match guess_lang(title) {
        "ru" => ["ru", "en"],
        _ => ["en", "ru"],
    }
}

/// Probe all candidates concurrently, each bounded by `probe_timeout`,
/// and return the first (in candidate order) that resolved the title.
pub async fn resolve(
    source: &dyn WikiSource,
    title: &str,
    probe_timeout: Duration,
) -> Option<(String, String)> {
    let langs = candidates(title);
    let probes = langs.iter().map(|lang| async move {
        match tokio::time::timeout(probe_timeout, source.probe(title, lang)).await {
            Ok(Ok(Some(canonical))) => Some((lang.to_string(), canonical)),
            Ok(Ok(None)) => None,
            Ok(Err(e)) => {
                debug!("probe failed for {} on {}: {}", title, lang, e);
                None
            }
            Err(_) => {
                debug!("probe timed out for {} on {}", title, lang);
                None
            }
        }
    });

    // join_all preserves candidate order, so the first hit wins even when
    // a lower-priority probe answered faster.
    futures::future::join_all(probes)
        .await
        .into_iter()
        .flatten()
        .next()
}
