use serde::{Deserialize, Serialize};

/// Column order of an exported contact. Consumers depend on it.
pub const CONTACT_FIELDS: [&str; 4] = ["name", "role", "email", "company"];

/// One person record as returned by a page of the people search.
///
/// Every field is optional; the provider omits or nulls fields freely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct RawResult {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub primary_email: Option<String>,
    pub organization_name: Option<String>,
    pub organization: Option<Organization>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub name: Option<String>,
}

impl RawResult {
    /// `first_name last_name`, falling back to the provider's full name.
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        let composed = format!("{first} {last}");
        let composed = composed.trim();
        if !composed.is_empty() {
            return composed.to_string();
        }
        self.name.as_deref().unwrap_or("").trim().to_string()
    }

    pub fn role(&self) -> String {
        self.title.as_deref().unwrap_or("").trim().to_string()
    }

    pub fn company(&self) -> String {
        self.organization_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| {
                self.organization
                    .as_ref()
                    .and_then(|org| org.name.as_deref())
            })
            .unwrap_or("")
            .trim()
            .to_string()
    }

    /// Email candidates in preference order.
    pub(crate) fn email_candidates(&self) -> impl Iterator<Item = &str> {
        [self.email.as_deref(), self.primary_email.as_deref()]
            .into_iter()
            .flatten()
    }
}

/// A normalized, email-bearing person record. Only the normalizer builds
/// these, so `email` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    name: String,
    role: String,
    email: String,
    company: String,
}

impl Contact {
    pub(crate) fn new(name: String, role: String, email: String, company: String) -> Self {
        Self {
            name,
            role,
            email,
            company,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    /// Field values in [`CONTACT_FIELDS`] order.
    pub fn fields(&self) -> [&str; 4] {
        [&self.name, &self.role, &self.email, &self.company]
    }
}
