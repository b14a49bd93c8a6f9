//! Gatherer core: contact filtering, dedup bookkeeping and session accounting.
mod bounds;
mod collector;
mod contact;
mod criteria;
mod normalize;
mod seen;
mod session;
mod sink;

pub use bounds::{RetrievalBounds, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use collector::{Collector, Flow};
pub use contact::{Contact, Organization, RawResult, CONTACT_FIELDS};
pub use criteria::{ConfigError, FilterCriteria};
pub use normalize::{Normalizer, Rejection, Verdict, DEFAULT_EMAIL_PLACEHOLDERS};
pub use seen::SeenSet;
pub use session::{Harvest, SessionState, SessionStats, StopReason};
pub use sink::RecordSink;
