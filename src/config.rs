use anyhow::{bail, Context, Result};
use homedir::my_home;
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, time::Duration};

const CONFIG_FILE: &str = "config.yaml";

const DEFAULT_LISTEN: &str = "0.0.0.0:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_REDIRECTS: usize = 10;
const DEFAULT_WORKERS: usize = 4;

/// Sent with every request unless a resolver overrides it.
const DEFAULT_USER_AGENT: &str = concat!("linkscrape/", env!("CARGO_PKG_VERSION"));

/// Used for sites that refuse to serve non-browser clients.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0";

/// Outbound request settings shared by every resolver in a batch
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScrapeConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many redirects a single fetch may follow
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// User-Agent injected for header-spoofed requests
    #[serde(default = "default_browser_user_agent")]
    pub browser_user_agent: String,

    /// Number of urls fetched concurrently within one batch.
    ///
    /// *1 processes a batch strictly one url at a time*
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            browser_user_agent: BROWSER_USER_AGENT.to_string(),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl ScrapeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_browser_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Address the daemon binds to
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default)]
    pub scrape: ScrapeConfig,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            scrape: ScrapeConfig::default(),
            base_path: String::new(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.listen
            .parse::<SocketAddr>()
            .with_context(|| format!("listen must be a socket address, got '{}'", self.listen))?;

        let scrape = &self.scrape;
        if scrape.timeout_secs == 0 {
            bail!("scrape.timeout_secs must be greater than 0");
        }
        if scrape.workers == 0 {
            bail!("scrape.workers must be greater than 0");
        }
        if scrape.user_agent.trim().is_empty() {
            bail!("scrape.user_agent must not be empty");
        }
        if scrape.browser_user_agent.trim().is_empty() {
            bail!("scrape.browser_user_agent must not be empty");
        }

        Ok(())
    }

    /// Base directory holding `config.yaml`.
    ///
    /// `LINKSCRAPE_BASE_PATH` wins over `~/.local/share/linkscrape`.
    pub fn base_path() -> Result<String> {
        if let Ok(base_path) = std::env::var("LINKSCRAPE_BASE_PATH") {
            return Ok(base_path);
        }

        let home = my_home()
            .context("could not determine home directory")?
            .context("home directory path is empty")?;
        Ok(format!("{}/.local/share/linkscrape", home.to_string_lossy()))
    }

    pub fn load_with(base_path: &str) -> Result<Self> {
        let path = Path::new(base_path).join(CONFIG_FILE);

        // create new if does not exist
        if !path.exists() {
            let mut config = Self::default();
            config.base_path = base_path.to_string();
            config.save()?;
        }

        let config_str = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: Self = serde_yml::from_str(&config_str)
            .with_context(|| format!("{} is malformed", path.display()))?;

        config.base_path = base_path.to_string();
        config.validate()?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_path)
            .with_context(|| format!("failed to create {}", self.base_path))?;

        let path = Path::new(&self.base_path).join(CONFIG_FILE);
        let config_str = serde_yml::to_string(&self)?;
        std::fs::write(&path, config_str)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_creates_default_config() {
        let tmp = tempfile::tempdir().unwrap();
        let base_path = tmp.path().to_str().unwrap();

        let config = Config::load_with(base_path).unwrap();

        assert!(tmp.path().join(CONFIG_FILE).exists());
        assert_eq!(config.listen, DEFAULT_LISTEN);
        assert_eq!(config.scrape, ScrapeConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "scrape:\n  workers: 1\n").unwrap();

        let config = Config::load_with(tmp.path().to_str().unwrap()).unwrap();

        assert_eq!(config.scrape.workers, 1);
        assert_eq!(config.scrape.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.scrape.browser_user_agent, BROWSER_USER_AGENT);
        assert_eq!(config.listen, DEFAULT_LISTEN);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "scrape:\n  workers: 0\n").unwrap();

        let err = Config::load_with(tmp.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("workers"));
    }

    #[test]
    fn test_bad_listen_rejected() {
        let config = Config {
            listen: "not an address".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "scrape: [1, 2").unwrap();

        assert!(Config::load_with(tmp.path().to_str().unwrap()).is_err());
    }
}
