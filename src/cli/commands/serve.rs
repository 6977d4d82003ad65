//! Serve Command
//!
//! Warms up one connection per language edition, then runs the REST
//! facade until the process is stopped.

use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::cli::ui::Reporter;
use crate::client::WikiClient;
use crate::config::SearchConfig;
use crate::search::SearchEngine;
use crate::server;
use crate::types::Result;

pub fn run(port: u16, config: SearchConfig) -> Result<()> {
    let report = Reporter::new();
    let rt = Runtime::new()?;

    rt.block_on(async {
        let client = Arc::new(WikiClient::new(&config)?);

        report.status("Warming up Wikipedia connections...");
        client.warmup().await;
        report.ready("Connections ready");

        let engine = Arc::new(SearchEngine::new(client, config));
        report.status(&format!(
            "WikiRacer API on http://localhost:{}/api/v1",
            port
        ));
        server::serve(engine, port).await
    })
}
