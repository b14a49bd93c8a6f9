use std::collections::HashSet;

/// Emails already revealed in this or an earlier session.
///
/// Membership is an exact, case-sensitive match on the provider's value,
/// with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeenSet {
    emails: HashSet<String>,
    inserted: usize,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the newline-delimited storage format. Blank lines are skipped.
    pub fn parse(content: &str) -> Self {
        let emails = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        Self {
            emails,
            inserted: 0,
        }
    }

    /// Renders one email per line in sorted order, newline terminated.
    pub fn to_lines(&self) -> String {
        let mut sorted: Vec<&str> = self.emails.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        let mut out = String::with_capacity(sorted.iter().map(|e| e.len() + 1).sum());
        for email in sorted {
            out.push_str(email);
            out.push('\n');
        }
        out
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(email)
    }

    /// Returns `false` when the email was already present. Empty values
    /// are refused.
    pub fn insert(&mut self, email: impl Into<String>) -> bool {
        let email = email.into();
        if email.is_empty() {
            return false;
        }
        let added = self.emails.insert(email);
        if added {
            self.inserted += 1;
        }
        added
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// Number of successful inserts since the set was created or loaded.
    pub fn inserted_since_load(&self) -> usize {
        self.inserted
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.emails.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SeenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let emails = iter
            .into_iter()
            .map(Into::into)
            .filter(|email: &String| !email.is_empty())
            .collect();
        Self {
            emails,
            inserted: 0,
        }
    }
}
