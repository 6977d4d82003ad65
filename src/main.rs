use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wikiracer::config::{ConfigLoader, TuningProfile};

#[derive(Parser)]
#[command(name = "wikiracer")]
#[command(
    version,
    about = "Find a short hyperlink path between two Wikipedia articles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, help = "Path to a wikiracer.toml config file")]
    config: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a path between two articles
    Search {
        #[arg(help = "Start article title")]
        from: String,
        #[arg(help = "End article title")]
        to: String,
        #[arg(default_value = "ru", help = "Default language for unresolved titles")]
        lang: String,
        #[arg(long, value_parser = parse_profile, help = "Tuning profile: conservative, aggressive, simple")]
        profile: Option<TuningProfile>,
    },

    /// Run the REST API server
    Serve {
        #[arg(long, short, default_value = "3000", help = "Port to listen on")]
        port: u16,
        #[arg(long, value_parser = parse_profile, help = "Tuning profile: conservative, aggressive, simple")]
        profile: Option<TuningProfile>,
    },
}

/// Parse tuning profile from string
fn parse_profile(s: &str) -> Result<TuningProfile, String> {
    s.parse()
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mWikiRacer encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Search {
            from,
            to,
            lang,
            profile,
        } => {
            let config = ConfigLoader::load(
                cli.config.as_deref(),
                profile.unwrap_or(TuningProfile::Conservative),
            )?;
            let found = wikiracer::cli::commands::search::run(&from, &to, &lang, config)?;
            if !found {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Serve { port, profile } => {
            let config = ConfigLoader::load(
                cli.config.as_deref(),
                profile.unwrap_or(TuningProfile::Aggressive),
            )?;
            wikiracer::cli::commands::serve::run(port, config)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
