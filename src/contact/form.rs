// Contact form submissions

use serde::{Deserialize, Serialize};

/// A contact inquiry as entered on the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            message: message.into(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        let phone = phone.into();
        self.phone = if phone.trim().is_empty() { None } else { Some(phone) };
        self
    }

    /// Check required fields; returns the first problem found
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name cannot be empty".to_string());
        }
        if !is_plausible_email(&self.email) {
            return Err(format!("Invalid email address: '{}'", self.email.trim()));
        }
        if self.message.trim().is_empty() {
            return Err("Message cannot be empty".to_string());
        }
        Ok(())
    }
}

/// `local@domain.tld` with no whitespace
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map_or(false, |(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_plausible_email() {
        assert!(is_plausible_email("ana@studio.com"));
        assert!(is_plausible_email(" ana.b@mail.studio.co "));
        assert!(!is_plausible_email("ana"));
        assert!(!is_plausible_email("@studio.com"));
        assert!(!is_plausible_email("ana@studio"));
        assert!(!is_plausible_email("ana@.com"));
        assert!(!is_plausible_email("ana@studio."));
        assert!(!is_plausible_email("a na@studio.com"));
        assert!(!is_plausible_email("a@b@studio.com"));
    }

    #[test]
    fn test_validate() {
        let ok = ContactSubmission::new("Ana", "ana@studio.com", "Hello");
        assert!(ok.validate().is_ok());
        assert!(ContactSubmission::new(" ", "ana@studio.com", "Hi").validate().is_err());
        assert!(ContactSubmission::new("Ana", "nope", "Hi").validate().is_err());
        assert!(ContactSubmission::new("Ana", "ana@studio.com", "  ").validate().is_err());
    }

    #[test]
    fn test_blank_phone_is_dropped() {
        let s = ContactSubmission::new("Ana", "ana@studio.com", "Hi").with_phone("  ");
        assert_eq!(s.phone, None);
        let s = s.with_phone("555-0101");
        assert_eq!(s.phone.as_deref(), Some("555-0101"));
    }
}
