use std::fs;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use feedscout::catalog::MediamapCatalog;
use feedscout::cli::{Cli, Commands};
use feedscout::config::Config;
use feedscout::discovery::{find_rss_in_all, DiscoveryOptions};
use feedscout::domain::CrawlState;
use feedscout::errors::{ScoutError, ScoutResult};
use feedscout::fetch::{CachingHttpFetcher, Fetcher};
use feedscout::services::{CrawlService, CrawlSettings, ExportService};
use feedscout::storage::{open_state_store, StateStore};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("feedscout=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> ScoutResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    match cli.command {
        Commands::Step { delay, state } => {
            cmd_step(&config.with_delay(delay).with_state_path(state))
        }
        Commands::Run {
            delay,
            state,
            max_steps,
        } => cmd_run(&config.with_delay(delay).with_state_path(state), max_steps),
        Commands::Discover { url } => cmd_discover(&config, &url),
        Commands::Status { state } => cmd_status(&config.with_state_path(state)),
        Commands::Export { state, output } => cmd_export(&config.with_state_path(state), output),
    }
}

fn crawl_service(
    config: &Config,
) -> ScoutResult<
    CrawlService<CachingHttpFetcher, MediamapCatalog<CachingHttpFetcher>, Box<dyn StateStore>>,
> {
    let fetcher = Arc::new(CachingHttpFetcher::from_config(config)?);
    let catalog = MediamapCatalog::new(fetcher.clone(), config.catalog_url.clone());
    let store = open_state_store(&config.state_path)?;

    let settings = CrawlSettings {
        delay: config.delay,
        pause: config.pause,
        discovery: discovery_options(config),
    };

    Ok(CrawlService::new(fetcher, catalog, store, settings))
}

fn discovery_options(config: &Config) -> DiscoveryOptions {
    DiscoveryOptions {
        keep_unparsed_directories: config.keep_unparsed_directories,
    }
}

fn cmd_step(config: &Config) -> ScoutResult<()> {
    let service = crawl_service(config)?;
    let outcome = service.step();

    match outcome.processed.as_deref().and_then(|url| outcome.state.get(url)) {
        Some(record) => println!(
            "{} [{}] {} ({} feeds)",
            record.name,
            record.status,
            record.url,
            record.rss.len()
        ),
        None => println!("Nothing left to crawl."),
    }

    Ok(())
}

fn cmd_run(config: &Config, max_steps: Option<usize>) -> ScoutResult<()> {
    let service = crawl_service(config)?;
    let (steps, state) = service.run(max_steps);
    let summary = state.summary();

    tracing::info!(steps, "crawl finished");
    println!(
        "Crawled {} publishers: {} parsed, {} unable, {} ready, {} feeds.",
        steps, summary.parsed, summary.unable, summary.ready, summary.feeds
    );

    Ok(())
}

fn cmd_discover(config: &Config, url: &str) -> ScoutResult<()> {
    let fetcher = CachingHttpFetcher::from_config(config)?;
    let base = url.trim_end_matches('/');

    let homepage = fetcher
        .fetch(&format!("{}/", base))
        .ok_or_else(|| ScoutError::Transport {
            url: url.to_string(),
            reason: "homepage unreachable".to_string(),
        })?;

    let feeds = find_rss_in_all(&fetcher, base, &homepage, discovery_options(config));
    if feeds.is_empty() {
        println!("No feeds found.");
    }
    for feed in feeds {
        println!("{}\t{}", feed.category.as_deref().unwrap_or("-"), feed.url);
    }

    Ok(())
}

fn load_state(path: &Path) -> ScoutResult<CrawlState> {
    open_state_store(path)?.load()
}

fn cmd_status(config: &Config) -> ScoutResult<()> {
    let state = load_state(&config.state_path)?;

    if state.is_empty() {
        println!("No publishers crawled yet.");
        return Ok(());
    }

    let summary = state.summary();
    println!("Publishers: {}", state.len());
    println!("  parsed: {}", summary.parsed);
    println!("  unable: {}", summary.unable);
    println!("  ready:  {}", summary.ready);
    println!("Feeds: {}", summary.feeds);

    Ok(())
}

fn cmd_export(config: &Config, output: Option<String>) -> ScoutResult<()> {
    let state = load_state(&config.state_path)?;
    let opml = ExportService::to_opml(&state)?;

    match output {
        Some(path) => {
            fs::write(&path, &opml)?;
            println!("Exported feeds to {}", path);
        }
        None => {
            println!("{}", opml);
        }
    }

    Ok(())
}
