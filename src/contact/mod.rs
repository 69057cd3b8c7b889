//! Contact inquiries
//!
//! A submission produces two emails: a notification to the studio and a
//! confirmation to the sender. Both are best effort; the submission fails
//! only if neither could be delivered.

pub mod form;
pub mod mailer;
pub mod rate_limit;
pub mod retry;

pub use form::*;
pub use mailer::*;
pub use rate_limit::*;
pub use retry::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0}")]
    Invalid(String),
    #[error("Too many inquiries; try again in {0} minute(s)")]
    RateLimited(i64),
    #[error("Could not deliver the inquiry")]
    Undelivered {
        #[source]
        notification: MailError,
        confirmation: MailError,
    },
}

/// Where and how the studio receives inquiries
#[derive(Debug, Clone)]
pub struct ContactSettings {
    pub studio_email: String,
    pub studio_name: String,
    pub retry: RetryPolicy,
}

/// Result of one delivery within a submission
#[derive(Debug)]
pub struct Delivery {
    pub to: String,
    pub attempts: u32,
    pub error: Option<MailError>,
}

impl Delivery {
    pub fn delivered(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug)]
pub struct SubmissionReport {
    pub notification: Delivery,
    pub confirmation: Delivery,
}

impl SubmissionReport {
    pub fn fully_delivered(&self) -> bool {
        self.notification.delivered() && self.confirmation.delivered()
    }
}

/// Email telling the studio about the inquiry
pub fn notification_email(submission: &ContactSubmission, settings: &ContactSettings) -> Email {
    let mut body = format!("Name: {}\nEmail: {}\n", submission.name.trim(), submission.email.trim());
    if let Some(phone) = &submission.phone {
        body.push_str(&format!("Phone: {}\n", phone.trim()));
    }
    body.push_str(&format!("\n{}\n", submission.message.trim()));

    Email {
        to: settings.studio_email.clone(),
        reply_to: Some(submission.email.trim().to_string()),
        subject: format!("New inquiry from {}", submission.name.trim()),
        body,
    }
}

/// Email acknowledging the inquiry to the sender
pub fn confirmation_email(submission: &ContactSubmission, settings: &ContactSettings) -> Email {
    Email {
        to: submission.email.trim().to_string(),
        reply_to: Some(settings.studio_email.clone()),
        subject: format!("Thanks for contacting {}", settings.studio_name),
        body: format!(
            "Hi {},\n\nWe received your message and will get back to you soon.\n\n> {}\n\n{}\n",
            submission.name.trim(),
            submission.message.trim(),
            settings.studio_name
        ),
    }
}

fn deliver<M, S>(mailer: &M, email: Email, policy: &RetryPolicy, sleeper: &mut S) -> Delivery
where
    M: Mailer + ?Sized,
    S: Sleeper + ?Sized,
{
    let outcome = send_with_retry(mailer, &email, policy, sleeper);
    Delivery {
        to: email.to,
        attempts: outcome.attempts,
        error: outcome.result.err(),
    }
}

/// Validate and send a submission. The rate limiter, if given, is consulted
/// before sending and charged once the submission is accepted.
pub fn submit<M, S, C>(
    submission: &ContactSubmission,
    settings: &ContactSettings,
    mailer: &M,
    sleeper: &mut S,
    limiter: Option<&mut RateLimiter<C>>,
) -> Result<SubmissionReport, ContactError>
where
    M: Mailer + ?Sized,
    S: Sleeper + ?Sized,
    C: crate::utils::Clock,
{
    submission.validate().map_err(ContactError::Invalid)?;

    if let Some(limiter) = limiter {
        if !limiter.is_allowed() {
            let wait = limiter.retry_after();
            let minutes = (wait.num_seconds() + 59) / 60;
            return Err(ContactError::RateLimited(minutes.max(1)));
        }
        limiter.record_attempt();
    }

    let notification = deliver(mailer, notification_email(submission, settings), &settings.retry, sleeper);
    let confirmation = deliver(mailer, confirmation_email(submission, settings), &settings.retry, sleeper);

    match (notification.error, confirmation.error) {
        (Some(n), Some(c)) => Err(ContactError::Undelivered {
            notification: n,
            confirmation: c,
        }),
        (n, c) => {
            let report = SubmissionReport {
                notification: Delivery { error: n, ..notification },
                confirmation: Delivery { error: c, ..confirmation },
            };
            if !report.fully_delivered() {
                log::warn!("inquiry from {} only partially delivered", submission.email.trim());
            }
            Ok(report)
        }
    }
}
