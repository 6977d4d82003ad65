//! Terminal Rendering
//!
//! Renders search outcomes (stats line, numbered path, per-edge check
//! URLs) and server lifecycle lines.

use console::style;
use std::time::Duration;

use crate::server::Transition;
use crate::types::WikiNode;

pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    /// Elapsed time and request count, printed before the verdict.
    pub fn stats(&self, duration: Duration, request_count: u64) {
        println!(
            "{} {:?} | {} requests",
            style("⏱").cyan(),
            duration,
            request_count
        );
    }

    pub fn not_found(&self) {
        eprintln!("{} No path found", style("✗").red());
    }

    /// The found path as a numbered list of `lang:title` nodes.
    pub fn path(&self, path: &[WikiNode]) {
        println!("\n{}", style(format!("Path ({} steps)", path.len())).bold());
        for (i, node) in path.iter().enumerate() {
            println!("  {}. {}", i + 1, node);
        }
    }

    /// One check URL per edge so the path can be verified in a browser.
    pub fn check_links(&self, edges: &[Transition]) {
        if edges.is_empty() {
            return;
        }
        println!("\n{}", style("Check links").bold());
        for edge in edges {
            println!(
                "  {} -> {} [{}]",
                edge.from,
                edge.to,
                style(&edge.kind).yellow()
            );
            println!("     {}", style(&edge.check_url).dim());
        }
    }

    /// Server lifecycle line.
    pub fn status(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn ready(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
