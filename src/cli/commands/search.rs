//! Search Command
//!
//! Runs one query against the live API and prints the path as a numbered
//! list plus one check URL per edge. Returns whether a path was found so
//! the binary can map "not found" to a nonzero exit code.

use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::cli::ui::Reporter;
use crate::client::WikiClient;
use crate::config::SearchConfig;
use crate::search::SearchEngine;
use crate::server::transitions;
use crate::types::Result;

pub fn run(from: &str, to: &str, lang: &str, config: SearchConfig) -> Result<bool> {
    let report = Reporter::new();
    let rt = Runtime::new()?;

    let outcome = rt.block_on(async {
        let client = Arc::new(WikiClient::new(&config)?);
        let engine = SearchEngine::new(client, config);
        Ok::<_, crate::types::WikiError>(engine.search(from, to, lang).await)
    })?;

    report.stats(outcome.duration, outcome.request_count);

    if !outcome.is_found() {
        report.not_found();
        return Ok(false);
    }

    report.path(&outcome.path);
    report.check_links(&transitions(&outcome.path));
    Ok(true)
}
