//! siteseek main entry point
//!
//! This is the command-line interface for building and searching a site index.

use anyhow::Context;
use clap::{Parser, Subcommand};
use siteseek::config::{load_config_or_default, validate, Config};
use siteseek::crawler::{Coordinator, ShutdownHandle};
use siteseek::index::{IndexStore, InvertedIndex};
use siteseek::output::{
    print_statistics, write_occurrences, write_page_prompt, write_result_page,
    write_results_header,
};
use siteseek::query::{paginate, QueryEngine};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// siteseek: crawl one site and search it by word
///
/// siteseek visits every page of a single domain under a fixed rate limit,
/// records where each word appears, and ranks pages for multi-word queries.
#[derive(Parser, Debug)]
#[command(name = "siteseek")]
#[command(version)]
#[command(about = "Crawl one site and search it by word", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Index file to build or read, overriding the configuration
    #[arg(long, value_name = "PATH", global = true)]
    index: Option<PathBuf>,

    /// Seconds to wait between requests, overriding the configuration
    #[arg(long, value_name = "SECONDS", global = true)]
    rate_limit: Option<f64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the site and save a fresh index
    Build {
        /// Save whatever was indexed when the crawl is interrupted with Ctrl+C
        #[arg(long)]
        save_partial: bool,
    },

    /// Check that the saved index can be read
    Load,

    /// Show every occurrence of one word
    Print {
        #[arg(value_name = "WORD")]
        word: String,
    },

    /// Rank pages containing any of the words
    Find {
        #[arg(value_name = "WORDS", required = true)]
        words: Vec<String>,

        /// Print all results without waiting between pages
        #[arg(long)]
        no_pause: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;
    let store = IndexStore::new(&config.index.path);

    match &cli.command {
        Command::Build { save_partial } => handle_build(&config, &store, *save_partial).await,
        Command::Load => {
            if let Some(index) = read_index(&store)? {
                println!(
                    "Index read from file '{}', {} words indexed.",
                    store.path().display(),
                    index.len()
                );
            }
            Ok(())
        }
        Command::Print { word } => {
            if let Some(index) = read_index(&store)? {
                let engine = QueryEngine::new(&index);
                write_occurrences(&mut io::stdout().lock(), word, engine.lookup(word))?;
            }
            Ok(())
        }
        Command::Find { words, no_pause } => {
            if let Some(index) = read_index(&store)? {
                handle_find(&index, words, config.query.page_length, !*no_pause).await?;
            }
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("siteseek=info,warn"),
            1 => EnvFilter::new("siteseek=debug,info"),
            2 => EnvFilter::new("siteseek=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(io::stderr)
        .init();
}

/// Loads the configuration and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let mut config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(path) = &cli.index {
        config.index.path = path.display().to_string();
    }

    if let Some(seconds) = cli.rate_limit {
        config.crawler.rate_limit_seconds = seconds;
    }

    validate(&config).context("Invalid command-line override")?;
    Ok(config)
}

/// Reads the saved index, printing guidance and returning `None` when there is none yet
fn read_index(store: &IndexStore) -> anyhow::Result<Option<InvertedIndex>> {
    match store.load() {
        Ok(index) => Ok(Some(index)),
        Err(e) if e.is_not_found() => {
            println!(
                "No index file found at '{}'. Build it with the 'build' command.",
                store.path().display()
            );
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Handles the `build` command: crawls, saves and reports
async fn handle_build(config: &Config, store: &IndexStore, save_partial: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling {} (domain filter '{}', {}s between requests)",
        config.crawler.base_url,
        config.crawler.domain,
        config.crawler.rate_limit_seconds
    );

    let coordinator = Coordinator::new(config).context("Failed to start crawl")?;
    spawn_interrupt_listener(coordinator.shutdown_handle());

    let outcome = coordinator.run().await;

    if outcome.interrupted && !save_partial {
        tracing::warn!(
            "Crawl interrupted; index not saved (use --save-partial to keep {} words)",
            outcome.index.len()
        );
    } else {
        store
            .save(&outcome.index)
            .with_context(|| format!("Failed to save index to {}", store.path().display()))?;
        tracing::info!(
            "Saved {} words to {}",
            outcome.index.len(),
            store.path().display()
        );
    }

    print_statistics(&outcome.statistics, outcome.index.len());
    Ok(())
}

/// Triggers the shutdown handle on the first Ctrl+C
fn spawn_interrupt_listener(shutdown: ShutdownHandle) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("Interrupt received, stopping after the current page");
                shutdown.trigger();
            }
            Err(e) => tracing::error!("Failed to listen for Ctrl+C: {}", e),
        }
    });
}

/// Handles the `find` command: ranks pages and prints them a page at a time
async fn handle_find(
    index: &InvertedIndex,
    words: &[String],
    page_length: usize,
    pause: bool,
) -> anyhow::Result<()> {
    let rows = QueryEngine::new(index).find(words);

    let mut out = io::stdout();
    write_results_header(&mut out, words, !rows.is_empty())?;

    let pause = pause && io::stdin().is_terminal();
    let mut input = BufReader::new(tokio::io::stdin());
    let mut pages = paginate(&rows, page_length).peekable();
    while let Some(page) = pages.next() {
        write_result_page(&mut out, &page)?;

        if pause && page.is_full && pages.peek().is_some() {
            write_page_prompt(&mut out, page.number)?;
            let mut line = String::new();
            input.read_line(&mut line).await?;
        }
    }

    out.flush()?;
    Ok(())
}
