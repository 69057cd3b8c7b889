// Sliding-window rate limiting for contact submissions

use crate::utils::Clock;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// At most `max_requests` attempts within any `window`
#[derive(Debug)]
pub struct RateLimiter<C: Clock> {
    window: Duration,
    max_requests: usize,
    attempts: Vec<DateTime<Utc>>,
    clock: C,
}

/// Persisted attempt log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptHistory {
    pub attempts: Vec<DateTime<Utc>>,
}

impl AttemptHistory {
    /// Load from a JSON file; a missing file is an empty history
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn create(window: Duration, max_requests: usize, clock: C) -> Self {
        Self {
            window,
            max_requests,
            attempts: Vec::new(),
            clock,
        }
    }

    /// Restore previously recorded attempts
    pub fn with_history(mut self, history: AttemptHistory) -> Self {
        self.attempts = history.attempts;
        self.attempts.sort();
        self.prune();
        self
    }

    pub fn history(&self) -> AttemptHistory {
        AttemptHistory {
            attempts: self.attempts.clone(),
        }
    }

    /// Whether another attempt fits in the current window
    pub fn is_allowed(&mut self) -> bool {
        self.prune();
        self.attempts.len() < self.max_requests
    }

    pub fn record_attempt(&mut self) {
        self.prune();
        self.attempts.push(self.clock.now());
    }

    /// How long until the oldest attempt leaves the window; zero if allowed now.
    /// A limiter that allows no requests at all reports the full window.
    pub fn retry_after(&mut self) -> Duration {
        if self.is_allowed() {
            return Duration::zero();
        }
        let now = self.clock.now();
        match self
            .attempts
            .len()
            .checked_sub(self.max_requests)
            .and_then(|i| self.attempts.get(i))
        {
            Some(oldest_blocking) => oldest_blocking
                .checked_add_signed(self.window)
                .map(|free_at| (free_at - now).max(Duration::zero()))
                .unwrap_or(self.window),
            None => self.window,
        }
    }

    fn prune(&mut self) {
        // A window reaching past the earliest representable time keeps everything
        if let Some(cutoff) = self.clock.now().checked_sub_signed(self.window) {
            self.attempts.retain(|t| *t > cutoff);
        }
    }
}
