use crate::{Contact, RawResult, SeenSet};

/// Sentinel values the provider returns in place of a locked email.
pub const DEFAULT_EMAIL_PLACEHOLDERS: &[&str] = &["email_not_unlocked@domain.com"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoEmail,
    AlreadySeen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(Contact),
    Rejected(Rejection),
}

/// Turns raw results into contacts, skipping unusable and already-revealed
/// emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    placeholders: Vec<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_EMAIL_PLACEHOLDERS.iter().copied())
    }
}

impl Normalizer {
    pub fn new<I>(placeholders: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let placeholders = placeholders
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Self { placeholders }
    }

    /// Adds sentinels on top of the current denylist.
    pub fn with_extra_placeholders<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for value in extra {
            let value = value.as_ref().trim();
            if !value.is_empty() && !self.is_placeholder(value) {
                self.placeholders.push(value.to_string());
            }
        }
        self
    }

    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    pub fn is_placeholder(&self, email: &str) -> bool {
        self.placeholders
            .iter()
            .any(|p| p.eq_ignore_ascii_case(email.trim()))
    }

    /// The first candidate email that is neither blank nor a placeholder,
    /// trimmed so it matches the form the seen file reads back.
    pub fn usable_email<'a>(&self, raw: &'a RawResult) -> Option<&'a str> {
        raw.email_candidates()
            .map(str::trim)
            .find(|email| !email.is_empty() && !self.is_placeholder(email))
    }

    /// The email check runs before the seen check so that an unusable value
    /// never reaches the seen set.
    pub fn accept(&self, raw: RawResult, seen: &mut SeenSet) -> Verdict {
        let Some(email) = self.usable_email(&raw) else {
            return Verdict::Rejected(Rejection::NoEmail);
        };
        if seen.contains(email) {
            return Verdict::Rejected(Rejection::AlreadySeen);
        }

        let email = email.to_string();
        seen.insert(email.clone());
        Verdict::Accepted(Contact::new(
            raw.display_name(),
            raw.role(),
            email,
            raw.company(),
        ))
    }
}
