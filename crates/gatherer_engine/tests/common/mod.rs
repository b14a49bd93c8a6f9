#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use gatherer_core::RawResult;
use gatherer_engine::{
    ListsPage, PageRequest, PeoplePage, Reply, RetrievalError, SavedList, Transport,
};
use tokio::time::Instant;

type Scripted = Result<Reply<PeoplePage>, RetrievalError>;

/// In-memory provider. Each page answers from its script in order; a page
/// with nothing left to say returns no results.
#[derive(Default)]
pub struct ScriptedTransport {
    pages: Mutex<HashMap<u32, VecDeque<Scripted>>>,
    lists: Mutex<HashMap<u32, Vec<SavedList>>>,
    calls: Mutex<Vec<(u32, Instant)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, page: u32, people: Vec<RawResult>) -> Self {
        self.push(
            page,
            Ok(Reply::Ready(PeoplePage {
                people,
                pagination: None,
            })),
        )
    }

    pub fn throttle(self, page: u32, times: usize, retry_after: Option<Duration>) -> Self {
        let mut this = self;
        for _ in 0..times {
            this = this.push(page, Ok(Reply::Throttled { retry_after }));
        }
        this
    }

    pub fn fail(self, page: u32, error: RetrievalError) -> Self {
        self.push(page, Err(error))
    }

    pub fn lists_page(self, page: u32, lists: Vec<SavedList>) -> Self {
        self.lists.lock().unwrap().insert(page, lists);
        self
    }

    fn push(self, page: u32, reply: Scripted) -> Self {
        self.pages
            .lock()
            .unwrap()
            .entry(page)
            .or_default()
            .push_back(reply);
        self
    }

    /// Page numbers in request order.
    pub fn requested_pages(&self) -> Vec<u32> {
        self.calls.lock().unwrap().iter().map(|(page, _)| *page).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }

    fn record(&self, page: u32) {
        self.calls.lock().unwrap().push((page, Instant::now()));
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn search_people(
        &self,
        request: &PageRequest<'_>,
    ) -> Result<Reply<PeoplePage>, RetrievalError> {
        self.record(request.page);
        let next = self
            .pages
            .lock()
            .unwrap()
            .get_mut(&request.page)
            .and_then(VecDeque::pop_front);
        next.unwrap_or_else(|| Ok(Reply::Ready(PeoplePage::default())))
    }

    async fn saved_lists(
        &self,
        page: u32,
        _per_page: u32,
    ) -> Result<Reply<ListsPage>, RetrievalError> {
        self.record(page);
        let lists = self.lists.lock().unwrap().get(&page).cloned().unwrap_or_default();
        Ok(Reply::Ready(ListsPage {
            lists,
            pagination: None,
        }))
    }
}

pub fn person(email: Option<&str>) -> RawResult {
    RawResult {
        first_name: Some("Pat".to_string()),
        last_name: Some("Doe".to_string()),
        title: Some("CEO".to_string()),
        email: email.map(ToOwned::to_owned),
        organization_name: Some("Acme".to_string()),
        ..RawResult::default()
    }
}

/// `count` results with distinct emails tagged by page.
pub fn full_page(page: u32, count: usize) -> Vec<RawResult> {
    (0..count)
        .map(|i| person(Some(&format!("p{page}-{i}@acme.io"))))
        .collect()
}
