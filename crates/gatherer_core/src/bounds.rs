use crate::ConfigError;

pub const DEFAULT_PAGE_SIZE: u32 = 25;
/// Largest page the provider will serve.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Stopping conditions for one session. Retrieval ends at whichever bound
/// is reached first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalBounds {
    max_contacts: Option<usize>,
    max_pages: Option<u32>,
    page_size: u32,
}

impl Default for RetrievalBounds {
    fn default() -> Self {
        Self {
            max_contacts: None,
            max_pages: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RetrievalBounds {
    pub fn new(
        max_contacts: Option<usize>,
        max_pages: Option<u32>,
        page_size: u32,
    ) -> Result<Self, ConfigError> {
        if max_contacts == Some(0) {
            return Err(ConfigError::ZeroBound {
                bound: "max contacts",
            });
        }
        if max_pages == Some(0) {
            return Err(ConfigError::ZeroBound { bound: "max pages" });
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::PageSizeOutOfRange {
                value: page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self {
            max_contacts,
            max_pages,
            page_size,
        })
    }

    pub fn max_contacts(&self) -> Option<usize> {
        self.max_contacts
    }

    pub fn max_pages(&self) -> Option<u32> {
        self.max_pages
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn contact_bound_reached(&self, accepted: usize) -> bool {
        self.max_contacts.is_some_and(|max| accepted >= max)
    }

    pub fn page_bound_reached(&self, pages_fetched: u32) -> bool {
        self.max_pages.is_some_and(|max| pages_fetched >= max)
    }
}
