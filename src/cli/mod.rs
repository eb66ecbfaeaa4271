use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "feedscout")]
#[command(about = "Discover RSS/Atom feeds of news publishers, one resumable step at a time")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl at most one unfinished publisher and save the state
    Step {
        /// Seconds to wait after crawling a publisher new to the state
        #[arg(long, env = "FEEDSCOUT_DELAY_SECS")]
        delay: Option<u64>,

        /// State file (.json, or .db/.sqlite for SQLite)
        #[arg(long, env = "FEEDSCOUT_STATE_PATH")]
        state: Option<PathBuf>,
    },

    /// Keep stepping until every publisher is crawled
    Run {
        /// Seconds to wait after crawling a publisher new to the state
        #[arg(long, env = "FEEDSCOUT_DELAY_SECS")]
        delay: Option<u64>,

        /// State file (.json, or .db/.sqlite for SQLite)
        #[arg(long, env = "FEEDSCOUT_STATE_PATH")]
        state: Option<PathBuf>,

        /// Stop after this many publishers
        #[arg(long)]
        max_steps: Option<usize>,
    },

    /// Discover feeds of a single homepage without touching the state
    Discover {
        /// Homepage URL, e.g. https://news.example
        url: String,
    },

    /// Show crawl progress
    Status {
        /// State file (.json, or .db/.sqlite for SQLite)
        #[arg(long, env = "FEEDSCOUT_STATE_PATH")]
        state: Option<PathBuf>,
    },

    /// Export discovered feeds to OPML
    Export {
        /// State file (.json, or .db/.sqlite for SQLite)
        #[arg(long, env = "FEEDSCOUT_STATE_PATH")]
        state: Option<PathBuf>,

        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}
