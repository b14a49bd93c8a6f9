use engine_logging::{engine_debug, engine_info};
use gatherer_core::{FilterCriteria, RawResult, RetrievalBounds};

use crate::{PageRequest, RequestGate, RetrievalError, Transport};

/// Lazy walk over people-search pages, starting at page 1.
///
/// Stops on the first empty page or once the page bound is reached; the
/// provider's reported totals are never used to stop. Dropping the pager
/// mid-walk is the normal way to abandon it.
pub struct Pager<'a> {
    transport: &'a dyn Transport,
    gate: &'a mut RequestGate,
    criteria: &'a FilterCriteria,
    bounds: RetrievalBounds,
    next_page: u32,
    pages_fetched: u32,
    requests_issued: u32,
    exhausted: bool,
}

impl<'a> Pager<'a> {
    pub fn new(
        transport: &'a dyn Transport,
        gate: &'a mut RequestGate,
        criteria: &'a FilterCriteria,
        bounds: RetrievalBounds,
    ) -> Self {
        Self {
            transport,
            gate,
            criteria,
            bounds,
            next_page: 1,
            pages_fetched: 0,
            requests_issued: 0,
            exhausted: false,
        }
    }

    /// Fetches the next non-empty page, or `None` when the walk is over.
    pub async fn next_page(&mut self) -> Result<Option<Vec<RawResult>>, RetrievalError> {
        if self.exhausted || self.page_bound_reached() {
            return Ok(None);
        }

        let request = PageRequest {
            criteria: self.criteria,
            page: self.next_page,
            per_page: self.bounds.page_size(),
        };
        let transport = self.transport;
        engine_info!(
            "Requesting page {} ({} per page)",
            request.page,
            request.per_page
        );
        self.requests_issued += 1;
        let page = self
            .gate
            .send(|| transport.search_people(&request))
            .await?;

        if page.people.is_empty() {
            engine_info!("Page {} returned no results", request.page);
            self.exhausted = true;
            return Ok(None);
        }
        if let Some(pagination) = &page.pagination {
            engine_debug!(
                "Provider reports {:?} pages / {:?} entries",
                pagination.total_pages,
                pagination.total_entries
            );
        }
        engine_info!("Page {} returned {} results", request.page, page.people.len());

        self.pages_fetched += 1;
        self.next_page += 1;
        Ok(Some(page.people))
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Page requests issued, including the final empty one.
    pub fn requests_issued(&self) -> u32 {
        self.requests_issued
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn page_bound_reached(&self) -> bool {
        self.bounds.page_bound_reached(self.pages_fetched)
    }
}
