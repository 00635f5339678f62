//! Policy-Scout main entry point
//!
//! Command-line interface for the two-phase pipeline: an offline crawl that
//! snapshots a website into a corpus, and query-time commands that rank the
//! corpus and (optionally) relay the context to a completion service.

use clap::{Parser, Subcommand};
use policy_scout::chat::ChatSession;
use policy_scout::config::load_config_with_hash;
use policy_scout::crawler::Crawler;
use policy_scout::ranker::Ranker;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Policy-Scout: website-to-chatbot knowledge pipeline
#[derive(Parser, Debug)]
#[command(name = "policy-scout")]
#[command(version = "1.0.0")]
#[command(about = "Crawl a website and answer questions over it", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

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
    /// Crawl the configured site and replace the corpus snapshot
    Crawl,

    /// Print the ranked context block for a query (no model call)
    Rank {
        /// Free-text query
        query: String,
    },

    /// Ask a single question and print the model's answer
    Ask {
        /// Free-text question
        question: String,
    },

    /// Interactive question/answer loop
    Chat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => (cfg, hash),
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    match cli.command {
        Command::Crawl => handle_crawl(config).await?,
        Command::Rank { query } => handle_rank(config, &query),
        Command::Ask { question } => handle_ask(config, &question).await?,
        Command::Chat => handle_chat(config).await?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("policy_scout=info,warn"),
            1 => EnvFilter::new("policy_scout=debug,info"),
            2 => EnvFilter::new("policy_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the crawl subcommand
async fn handle_crawl(
    config: policy_scout::config::Config,
) -> anyhow::Result<()> {
    let snapshot_path = config.snapshot.path.clone();
    let crawler = Crawler::new(config)?;

    match crawler.run().await {
        Ok(()) => {
            println!("✓ Snapshot written to: {}", snapshot_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the rank subcommand: shows what would be injected as context
fn handle_rank(config: policy_scout::config::Config, query: &str) {
    let ranker = Ranker::from_snapshot(Path::new(&config.snapshot.path), config.ranker);

    let context = ranker.rank(query);
    if context.is_empty() {
        println!("(no relevant content)");
    } else {
        println!("{}", context);
    }
}

/// Handles the ask subcommand: one question, one answer
async fn handle_ask(
    config: policy_scout::config::Config,
    question: &str,
) -> anyhow::Result<()> {
    let ranker = Ranker::from_snapshot(Path::new(&config.snapshot.path), config.ranker.clone());
    let mut session = ChatSession::new(config.chat)?;

    match session.ask(&ranker, question).await {
        Ok(answer) => println!("{}", answer),
        Err(e) => {
            tracing::error!("Completion call failed: {}", e);
            println!("I apologize, but I encountered an error: {}", e);
        }
    }

    Ok(())
}

/// Handles the chat subcommand: interactive loop until quit/exit
async fn handle_chat(
    config: policy_scout::config::Config,
) -> anyhow::Result<()> {
    let ranker = Ranker::from_snapshot(Path::new(&config.snapshot.path), config.ranker.clone());
    let mut session = ChatSession::new(config.chat)?;

    println!(
        "Policy-Scout ready ({} pages loaded). Type 'quit' to exit.",
        ranker.corpus_len()
    );

    let stdin = std::io::stdin();
    loop {
        print!("\nYou: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "bye") {
            break;
        }

        match session.ask(&ranker, input).await {
            Ok(answer) => println!("\nBot: {}", answer),
            Err(e) => {
                tracing::error!("Completion call failed: {}", e);
                println!("\nBot: I apologize, but I encountered an error: {}", e);
            }
        }
    }

    Ok(())
}
