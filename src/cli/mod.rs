//! Command-Line Interface
//!
//! Command implementations and terminal output helpers. Argument parsing
//! lives in the binary; each command exposes a `run` that owns its tokio
//! runtime.

pub mod commands;
pub mod ui;
