//! Quotebook command-line entry point.
//!
//! # Responsibility
//! - Open one quote-book session per invocation over the configured database.
//! - Map subcommands onto core use-cases and print their results.
//! - Host the periodic sync loop for `watch`.

mod view;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use quotebook_core::{
    init_logging, start_periodic_sync, HttpQuoteSource, QuoteBook, QuotebookConfig, Reconciler,
    RemoteQuoteSource, SharedQuoteBook, SqliteSlotRepository, SyncOutcome, ALL_CATEGORIES,
};
use std::path::PathBuf;
use std::sync::Arc;
use view::ConsoleView;

#[derive(Debug, Parser)]
#[command(name = "quotebook", version, about = "Local quote collection with remote sync")]
struct Cli {
    /// JSON config file; `QB_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print quotes under the current category filter.
    List,
    /// Print the category index; the active filter is marked.
    Categories,
    /// Persist a new category filter (`all` clears it).
    Select { category: String },
    /// Add a quote and forward it to the remote sink.
    Add {
        text: String,
        category: String,
        /// Skip the best-effort remote push.
        #[arg(long)]
        no_push: bool,
    },
    /// Print one random quote.
    Random,
    /// Reconcile once against the remote collection.
    Sync,
    /// Write every quote as a JSON array.
    Export {
        /// Destination file; stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Merge quotes from a JSON array file.
    Import { path: PathBuf },
    /// Keep running, reconciling on the configured interval, until Ctrl-C.
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = QuotebookConfig::load(cli.config.as_deref())?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let durable = SqliteSlotRepository::open_durable(&config.db_path)
        .with_context(|| format!("opening `{}`", config.db_path.display()))?;
    let session = SqliteSlotRepository::open_session()?;
    let echo_views = matches!(cli.command, Command::Watch);
    let book = QuoteBook::open(durable, session, Box::new(ConsoleView::new(echo_views)))
        .with_context(|| format!("loading quotes from `{}`", config.db_path.display()))?
        .into_shared();

    run(cli.command, &config, book).await
}

async fn run(command: Command, config: &QuotebookConfig, book: SharedQuoteBook) -> Result<()> {
    match command {
        Command::List => {
            let book = book.lock().await;
            let quotes = book.visible_quotes();
            println!("[{}] {} quote(s)", book.selected_category(), quotes.len());
            if quotes.is_empty() {
                println!("No quotes in this category yet.");
            }
            for quote in quotes {
                println!("\"{}\" ({})", quote.text(), quote.category());
            }
        }
        Command::Categories => {
            let book = book.lock().await;
            for category in book.categories() {
                let marker = if category == book.selected_category() { '*' } else { ' ' };
                println!("{marker} {category}");
            }
        }
        Command::Select { category } => {
            let mut book = book.lock().await;
            let selected = book.select_category(&category)?;
            println!(
                "Filter set to `{selected}` ({} quote(s)).",
                book.visible_quotes().len()
            );
        }
        Command::Add {
            text,
            category,
            no_push,
        } => {
            let quote = book.lock().await.add_quote(&text, &category)?;
            println!("Added \"{}\" ({}).", quote.text(), quote.category());
            if config.sync.enabled && !no_push {
                let reconciler = Reconciler::new(book.clone(), remote_source(config)?);
                if !reconciler.push_local(&quote).await {
                    eprintln!("Remote push failed; the quote is kept locally.");
                }
            }
        }
        Command::Random => {
            // Opening the book already surfaced a random pick for this session.
            match book.lock().await.last_viewed() {
                Some(quote) => println!("\"{}\" ({})", quote.text(), quote.category()),
                None => println!("No quotes available."),
            }
        }
        Command::Sync => {
            ensure_sync_enabled(config)?;
            let reconciler = Reconciler::new(book, remote_source(config)?);
            match reconciler.reconcile().await {
                SyncOutcome::Synced { appended } => println!("Synced: {appended} new quote(s)."),
                SyncOutcome::Unchanged => println!("Already up to date."),
                SyncOutcome::Skipped => println!("A sync is already running."),
                SyncOutcome::Failed(reason) => eprintln!("Sync failed: {reason}"),
            }
        }
        Command::Export { output } => {
            let json = book.lock().await.export_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing `{}`", path.display()))?;
                    println!("Exported to {}.", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Import { path } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading `{}`", path.display()))?;
            let report = book.lock().await.import_json(&raw)?;
            println!(
                "Imported {} new quote(s); {} total.",
                report.appended, report.total
            );
        }
        Command::Watch => {
            ensure_sync_enabled(config)?;
            let reconciler = Arc::new(Reconciler::new(book.clone(), remote_source(config)?));
            let handle = start_periodic_sync(reconciler, config.sync.interval());
            info!(
                "event=watch module=cli status=start interval_secs={} filter_is_all={}",
                config.sync.interval_secs,
                book.lock().await.selected_category() == ALL_CATEGORIES
            );
            tokio::signal::ctrl_c().await?;
            handle.stop().await;
        }
    }
    Ok(())
}

fn remote_source(config: &QuotebookConfig) -> Result<Arc<dyn RemoteQuoteSource>> {
    let source = HttpQuoteSource::new(config.sync.endpoint.clone(), config.sync.timeout())?;
    Ok(Arc::new(source))
}

fn ensure_sync_enabled(config: &QuotebookConfig) -> Result<()> {
    if !config.sync.enabled {
        bail!("sync is disabled (set QB_SYNC_ENABLED=true or sync.enabled in the config file)");
    }
    Ok(())
}
