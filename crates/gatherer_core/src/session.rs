use std::fmt;

use crate::Contact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Init,
    Fetching,
    Done(StopReason),
    Failed,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Done(_) | SessionState::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The provider returned an empty page.
    Exhausted,
    ContactBound,
    PageBound,
    /// Cancelled by the operator before a natural stop.
    Interrupted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted => write!(f, "results exhausted"),
            StopReason::ContactBound => write!(f, "contact limit reached"),
            StopReason::PageBound => write!(f, "page limit reached"),
            StopReason::Interrupted => write!(f, "interrupted"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub pages_fetched: u32,
    pub results_seen: usize,
    pub accepted: usize,
    pub rejected_no_email: usize,
    pub rejected_already_seen: usize,
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages, {} results, {} accepted, {} without email, {} already seen",
            self.pages_fetched,
            self.results_seen,
            self.accepted,
            self.rejected_no_email,
            self.rejected_already_seen
        )
    }
}

/// What a session hands back: the contacts it accepted and how it got there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Harvest {
    pub contacts: Vec<Contact>,
    pub stats: SessionStats,
    /// `None` when the session failed before reaching a stop condition.
    pub stop: Option<StopReason>,
}
