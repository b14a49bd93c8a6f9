use crate::{
    Contact, Harvest, Normalizer, RawResult, RecordSink, Rejection, RetrievalBounds, SeenSet,
    SessionStats, StopReason, Verdict,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop(StopReason),
}

/// Session-side accounting: runs each raw result through the normalizer,
/// appends accepted contacts, and reports when the contact bound is hit.
///
/// The page bound belongs to the pager; only the contact bound is checked
/// here because rejections make the per-page yield unpredictable.
#[derive(Debug)]
pub struct Collector {
    normalizer: Normalizer,
    seen: SeenSet,
    sink: RecordSink,
    stats: SessionStats,
    bounds: RetrievalBounds,
}

impl Collector {
    pub fn new(normalizer: Normalizer, seen: SeenSet, bounds: RetrievalBounds) -> Self {
        Self {
            normalizer,
            seen,
            sink: RecordSink::new(),
            stats: SessionStats::default(),
            bounds,
        }
    }

    pub fn offer(&mut self, raw: RawResult) -> Flow {
        if self.is_saturated() {
            return Flow::Stop(StopReason::ContactBound);
        }
        self.stats.results_seen += 1;
        match self.normalizer.accept(raw, &mut self.seen) {
            Verdict::Accepted(contact) => {
                self.sink.push(contact);
                self.stats.accepted += 1;
            }
            Verdict::Rejected(Rejection::NoEmail) => self.stats.rejected_no_email += 1,
            Verdict::Rejected(Rejection::AlreadySeen) => self.stats.rejected_already_seen += 1,
        }
        if self.is_saturated() {
            Flow::Stop(StopReason::ContactBound)
        } else {
            Flow::Continue
        }
    }

    /// Offers a whole page in order. Results after the contact bound are
    /// dropped unexamined.
    pub fn offer_page(&mut self, page: Vec<RawResult>) -> Flow {
        self.stats.pages_fetched += 1;
        for raw in page {
            if let Flow::Stop(reason) = self.offer(raw) {
                return Flow::Stop(reason);
            }
        }
        Flow::Continue
    }

    pub fn is_saturated(&self) -> bool {
        self.bounds.contact_bound_reached(self.sink.len())
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn contacts(&self) -> &[Contact] {
        self.sink.contacts()
    }

    pub fn into_parts(self, stop: Option<StopReason>) -> (Harvest, SeenSet) {
        let harvest = Harvest {
            contacts: self.sink.into_contacts(),
            stats: self.stats,
            stop,
        };
        (harvest, self.seen)
    }
}
