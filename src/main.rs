//! Wordcrawl main entry point
//!
//! This is the command-line interface for the Wordcrawl word-frequency crawler.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wordcrawl::config::{load_config_with_hash, validate, Config};
use wordcrawl::crawler::{crawl, max_parallelism};
use wordcrawl::output::{print_summary, write_result, write_result_to};

/// Wordcrawl: a parallel word-frequency crawler
///
/// Wordcrawl follows links from a set of start pages, up to a maximum depth
/// and within a time budget, and reports the most popular words it found.
#[derive(Parser, Debug)]
#[command(name = "wordcrawl")]
#[command(version)]
#[command(about = "A parallel word-frequency crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the configured maximum depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Override the configured number of worker threads
    #[arg(long)]
    parallelism: Option<usize>,

    /// Override the configured time budget in seconds
    #[arg(long)]
    timeout_seconds: Option<u64>,

    /// Override the configured number of popular words to report
    #[arg(long)]
    popular_word_count: Option<usize>,

    /// Write the JSON result here instead of the configured result path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(max_depth) = self.max_depth {
            config.crawler.max_depth = max_depth;
        }
        if let Some(parallelism) = self.parallelism {
            config.crawler.parallelism = parallelism;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.crawler.timeout_seconds = timeout;
        }
        if let Some(count) = self.popular_word_count {
            config.crawler.popular_word_count = count;
        }
        if let Some(output) = &self.output {
            config.output.result_path = Some(output.display().to_string());
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid command-line override")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config, cli.quiet)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wordcrawl=info,warn"),
            1 => EnvFilter::new("wordcrawl=debug,info"),
            2 => EnvFilter::new("wordcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(verbose >= 2)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Wordcrawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Timeout: {}s", config.crawler.timeout_seconds);
    println!(
        "  Parallelism: {} (host supports {})",
        config.crawler.parallelism,
        max_parallelism()
    );
    println!("  Popular words: {}", config.crawler.popular_word_count);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    match &config.output.result_path {
        Some(path) => println!("  Result: {}", path),
        None => println!("  Result: stdout"),
    }

    println!("\nStart Pages ({}):", config.start_pages.len());
    for page in &config.start_pages {
        println!("  - {}", page);
    }

    println!("\nIgnored URL Patterns ({}):", config.ignored_urls.len());
    for pattern in &config.ignored_urls {
        println!("  - {}", pattern);
    }

    println!("\nIgnored Word Patterns ({}):", config.ignored_words.len());
    for pattern in &config.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
fn handle_crawl(config: &Config, quiet: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Start pages: {}, ignored URL patterns: {}, ignored word patterns: {}",
        config.start_pages.len(),
        config.ignored_urls.len(),
        config.ignored_words.len()
    );

    let result = crawl(config).context("Crawl failed")?;

    match &config.output.result_path {
        Some(path) => {
            write_result(&result, Path::new(path))?;
            if !quiet {
                print_summary(&result);
            }
        }
        None => {
            let stdout = std::io::stdout();
            write_result_to(&result, &mut stdout.lock())?;
        }
    }

    Ok(())
}
