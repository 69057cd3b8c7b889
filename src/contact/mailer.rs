// Mail transport seam

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// An outgoing email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    /// Worth retrying (timeouts, throttling, 5xx)
    #[error("temporary mail failure: {0}")]
    Transient(String),
    /// Will fail again (bad address, rejected content)
    #[error("mail rejected: {0}")]
    Rejected(String),
    #[error("mail transport I/O error")]
    Io(#[from] std::io::Error),
}

impl MailError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, MailError::Transient(_))
    }
}

/// Something that can deliver an [`Email`]
pub trait Mailer {
    fn send(&self, email: &Email) -> Result<(), MailError>;
}

impl<M: Mailer + ?Sized> Mailer for &M {
    fn send(&self, email: &Email) -> Result<(), MailError> {
        (**self).send(email)
    }
}

/// Writes each email as a JSON file into a directory, for a separate
/// process (or a human) to pick up
#[derive(Debug)]
pub struct OutboxMailer {
    dir: PathBuf,
    sequence: AtomicU64,
}

impl OutboxMailer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Mailer for OutboxMailer {
    fn send(&self, email: &Email) -> Result<(), MailError> {
        fs::create_dir_all(&self.dir)?;
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3f");
        let path = self.dir.join(format!("{}-{}-{}.json", stamp, std::process::id(), seq));
        let json = serde_json::to_string_pretty(email)
            .map_err(|e| MailError::Rejected(format!("cannot encode email: {}", e)))?;
        fs::write(&path, json)?;
        log::debug!("queued email to {} at {}", email.to, path.display());
        Ok(())
    }
}
