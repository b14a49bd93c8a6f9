use std::time::Duration;

use gatherer_core::{FilterCriteria, RawResult};
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Outcome of one provider call that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Ready(T),
    /// HTTP 429. `retry_after` comes from the `Retry-After` header when sent.
    Throttled { retry_after: Option<Duration> },
}

/// One people-search page request.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub criteria: &'a FilterCriteria,
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest<'_> {
    /// JSON body for the search endpoint. Empty filters are left out.
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        if !self.criteria.job_titles().is_empty() {
            body.insert("person_titles".into(), json!(self.criteria.job_titles()));
        }
        if let Some(country) = self.criteria.country() {
            body.insert("person_locations".into(), json!([country]));
        }
        if !self.criteria.companies().is_empty() {
            body.insert(
                "organization_names".into(),
                json!(self.criteria.companies()),
            );
        }
        if let Some(list) = self.criteria.saved_list() {
            body.insert("person_list_names".into(), json!([list]));
        }
        body.insert("page".into(), json!(self.page));
        body.insert("per_page".into(), json!(self.per_page));
        Value::Object(body)
    }
}

/// Provider pagination metadata. Logged only; it is not reliable enough to
/// decide termination.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub total_entries: Option<u64>,
    pub total_pages: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct PeoplePage {
    pub people: Vec<RawResult>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ListsPage {
    #[serde(alias = "results")]
    pub lists: Vec<SavedList>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SavedList {
    pub id: String,
    pub name: String,
    pub cached_count: Option<u64>,
}
