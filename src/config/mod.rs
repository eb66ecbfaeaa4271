use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::catalog::DEFAULT_CATALOG_URL;
use crate::errors::{ScoutError, ScoutResult};
use crate::fetch::DEFAULT_USER_AGENT;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_url: String,
    pub state_path: PathBuf,
    pub delay: Duration,
    pub pause: Duration,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub keep_unparsed_directories: bool,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> ScoutResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let catalog_url = std::env::var("FEEDSCOUT_CATALOG_URL")
            .unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string());

        // Default state file is relative to executable directory
        let state_path = std::env::var("FEEDSCOUT_STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                exe_dir
                    .map(|d| d.join("mediamap.json"))
                    .unwrap_or_else(|| PathBuf::from("./mediamap.json"))
            });

        let user_agent = std::env::var("FEEDSCOUT_USER_AGENT")
            .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            catalog_url,
            state_path,
            delay: Duration::from_secs(env_parse("FEEDSCOUT_DELAY_SECS", 5)?),
            pause: Duration::from_secs(env_parse("FEEDSCOUT_PAUSE_SECS", 1)?),
            user_agent,
            request_timeout: Duration::from_secs(env_parse("FEEDSCOUT_TIMEOUT_SECS", 30)?),
            keep_unparsed_directories: env_parse("FEEDSCOUT_KEEP_UNPARSED_DIRECTORIES", false)?,
        })
    }

    pub fn with_delay(mut self, delay_secs: Option<u64>) -> Self {
        if let Some(secs) = delay_secs {
            self.delay = Duration::from_secs(secs);
        }
        self
    }

    pub fn with_state_path(mut self, state_path: Option<PathBuf>) -> Self {
        if let Some(path) = state_path {
            self.state_path = path;
        }
        self
    }
}

fn env_parse<T: FromStr>(name: &str, default: T) -> ScoutResult<T> {
    match std::env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> ScoutResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| ScoutError::Config(format!("{} has invalid value '{}'", name, raw)))
}
