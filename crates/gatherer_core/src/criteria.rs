use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("country is required unless a saved list is given")]
    MissingCountry,
    #[error("{bound} must be a positive integer")]
    ZeroBound { bound: &'static str },
    #[error("page size {value} is outside 1..={max}")]
    PageSizeOutOfRange { value: u32, max: u32 },
}

/// Search filters passed through to the provider unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    job_titles: Vec<String>,
    companies: Vec<String>,
    country: Option<String>,
    saved_list: Option<String>,
}

impl FilterCriteria {
    /// Builds criteria from raw user input.
    ///
    /// Keywords and company names are trimmed, blanks dropped, and the
    /// remaining values deduplicated into sorted order. A country is only
    /// optional when a saved list scopes the search.
    pub fn new<T, C>(
        job_titles: T,
        companies: C,
        country: Option<String>,
        saved_list: Option<String>,
    ) -> Result<Self, ConfigError>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let country = non_blank(country);
        let saved_list = non_blank(saved_list);
        if country.is_none() && saved_list.is_none() {
            return Err(ConfigError::MissingCountry);
        }

        Ok(Self {
            job_titles: clean_values(job_titles),
            companies: clean_values(companies),
            country,
            saved_list,
        })
    }

    pub fn job_titles(&self) -> &[String] {
        &self.job_titles
    }

    pub fn companies(&self) -> &[String] {
        &self.companies
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn saved_list(&self) -> Option<&str> {
        self.saved_list.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_values<I>(values: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_string())
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
