// Configuration from ~/.studiogrid/rc
//
// The rc file holds key=value lines; `#` starts a comment. Relative paths
// are resolved against the directory holding the rc file.

use crate::contact::RetryPolicy;
use crate::grid::{ColorMap, DEFAULT_CONTACT_ROUTE};
use crate::utils::parse_duration;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR: &str = ".studiogrid";

#[derive(Debug, Clone)]
pub struct Config {
    pub schedule_source: Option<PathBuf>,
    pub contact_route: String,
    pub studio_name: String,
    pub studio_email: String,
    pub outbox_dir: PathBuf,
    pub max_attempts: u32,
    pub rate_window: Duration,
    pub rate_max_requests: usize,
    pub colors: ColorMap,
}

impl Config {
    /// Defaults rooted at `base_dir` (the config directory)
    pub fn defaults(base_dir: &Path) -> Self {
        Self {
            schedule_source: None,
            contact_route: DEFAULT_CONTACT_ROUTE.to_string(),
            studio_name: "The Studio".to_string(),
            studio_email: "hello@studio.example".to_string(),
            outbox_dir: base_dir.join("outbox"),
            max_attempts: RetryPolicy::default().max_attempts,
            rate_window: Duration::from_secs(10 * 60),
            rate_max_requests: 3,
            colors: ColorMap::builtin(),
        }
    }

    /// Home directory: $HOME first, then the platform default
    pub fn home_dir() -> Result<PathBuf> {
        match std::env::var_os("HOME") {
            Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
            _ => dirs::home_dir().context("Failed to determine home directory"),
        }
    }

    pub fn config_dir() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join(CONFIG_DIR))
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("rc"))
    }

    /// Where contact attempts are logged for rate limiting
    pub fn contact_log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("contact_log.json"))
    }

    /// Load the rc file, falling back to defaults when it does not exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let base_dir = Self::config_dir()?;
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::defaults(&base_dir));
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content, &base_dir)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse rc content
    pub fn parse(content: &str, base_dir: &Path) -> Result<Self> {
        let mut config = Self::defaults(base_dir);

        for (line_no, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .with_context(|| format!("line {}: expected key=value", line_no + 1))?;
            let key = key.trim();
            let value = value.trim();

            if let Some(label) = key.strip_prefix("color.") {
                config.colors.insert(label, value);
                continue;
            }

            match key {
                "schedule.source" => config.schedule_source = Some(resolve_path(base_dir, value)),
                "contact.route" => config.contact_route = value.to_string(),
                "contact.studio_name" => config.studio_name = value.to_string(),
                "contact.studio_email" => config.studio_email = value.to_string(),
                "contact.outbox" => config.outbox_dir = resolve_path(base_dir, value),
                "contact.max_attempts" => {
                    config.max_attempts = value
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .with_context(|| format!("line {}: contact.max_attempts must be a positive number", line_no + 1))?;
                }
                "rate.window" => {
                    config.rate_window = parse_duration(value)
                        .with_context(|| format!("line {}: invalid rate.window", line_no + 1))?;
                }
                "rate.max_requests" => {
                    config.rate_max_requests = value
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n > 0)
                        .with_context(|| format!("line {}: rate.max_requests must be a positive number", line_no + 1))?;
                }
                _ => log::warn!("ignoring unknown config key '{}'", key),
            }
        }

        Ok(config)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default().with_max_attempts(self.max_attempts)
    }
}

fn resolve_path(base_dir: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_relative() {
        base_dir.join(path)
    } else {
        path
    }
}
