// Retry with exponential backoff for mail sends

use crate::contact::mailer::{Email, MailError, Mailer};
use std::time::Duration;

/// How often and how patiently a send is retried
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub factor: f64,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            factor: 2.0,
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Delay before retrying after failed attempt number `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exp = self.factor.powi(attempt.saturating_sub(1) as i32);
        let millis = self.base_delay.as_millis() as f64 * exp;
        let delay = Duration::from_millis(millis.min(u64::MAX as f64) as u64);
        delay.min(self.max_delay)
    }
}

/// Waits between attempts
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Blocks the current thread
#[derive(Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Records requested delays without waiting
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    pub delays: Vec<Duration>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.delays.push(duration);
    }
}

/// Outcome of one retried send
#[derive(Debug)]
pub struct SendOutcome {
    pub attempts: u32,
    pub result: Result<(), MailError>,
}

/// Send `email`, retrying transient failures up to `policy.max_attempts`
pub fn send_with_retry<M, S>(mailer: &M, email: &Email, policy: &RetryPolicy, sleeper: &mut S) -> SendOutcome
where
    M: Mailer + ?Sized,
    S: Sleeper + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match mailer.send(email) {
            Ok(()) => {
                return SendOutcome {
                    attempts: attempt,
                    result: Ok(()),
                }
            }
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                let delay = policy.backoff(attempt);
                log::warn!(
                    "send to {} failed (attempt {}/{}): {}; retrying in {:?}",
                    email.to,
                    attempt,
                    max_attempts,
                    e,
                    delay
                );
                sleeper.sleep(delay);
            }
            Err(e) => {
                log::warn!("giving up on send to {} after {} attempt(s): {}", email.to, attempt, e);
                return SendOutcome {
                    attempts: attempt,
                    result: Err(e),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Fails with the queued errors, then succeeds
    struct ScriptedMailer {
        failures: RefCell<Vec<MailError>>,
        calls: RefCell<u32>,
    }

    impl ScriptedMailer {
        fn new(mut failures: Vec<MailError>) -> Self {
            failures.reverse();
            Self {
                failures: RefCell::new(failures),
                calls: RefCell::new(0),
            }
        }
    }

    impl Mailer for ScriptedMailer {
        fn send(&self, _email: &Email) -> Result<(), MailError> {
            *self.calls.borrow_mut() += 1;
            match self.failures.borrow_mut().pop() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    fn email() -> Email {
        Email {
            to: "studio@example.com".into(),
            reply_to: None,
            subject: "s".into(),
            body: "b".into(),
        }
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_millis(500));
        assert_eq!(policy.backoff(2), Duration::from_millis(1000));
        assert_eq!(policy.backoff(3), Duration::from_millis(2000));
        assert_eq!(policy.backoff(10), Duration::from_secs(8));
    }

    #[test]
    fn test_retries_transient_then_succeeds() {
        let mailer = ScriptedMailer::new(vec![MailError::Transient("503".into())]);
        let mut sleeper = RecordingSleeper::default();
        let outcome = send_with_retry(&mailer, &email(), &RetryPolicy::default(), &mut sleeper);
        assert!(outcome.result.is_ok());
        assert_eq!(outcome.attempts, 2);
        assert_eq!(sleeper.delays, vec![Duration::from_millis(500)]);
    }

    #[test]
    fn test_stops_at_max_attempts() {
        let mailer = ScriptedMailer::new((0..5).map(|_| MailError::Transient("timeout".into())).collect());
        let mut sleeper = RecordingSleeper::default();
        let outcome = send_with_retry(&mailer, &email(), &RetryPolicy::default(), &mut sleeper);
        assert!(outcome.result.is_err());
        assert_eq!(outcome.attempts, 3);
        assert_eq!(*mailer.calls.borrow(), 3);
        assert_eq!(sleeper.delays.len(), 2);
    }

    #[test]
    fn test_rejection_is_not_retried() {
        let mailer = ScriptedMailer::new(vec![MailError::Rejected("bad address".into())]);
        let mut sleeper = RecordingSleeper::default();
        let outcome = send_with_retry(&mailer, &email(), &RetryPolicy::default(), &mut sleeper);
        assert!(matches!(outcome.result, Err(MailError::Rejected(_))));
        assert_eq!(outcome.attempts, 1);
        assert!(sleeper.delays.is_empty());
    }

    #[test]
    fn test_with_max_attempts_floors_at_one() {
        let policy = RetryPolicy::default().with_max_attempts(0);
        assert_eq!(policy.max_attempts, 1);
    }
}
