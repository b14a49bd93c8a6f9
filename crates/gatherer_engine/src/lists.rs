use engine_logging::engine_info;

use crate::{RequestGate, RetrievalError, SavedList, Transport};

/// Collects every saved list on the account, one gated request per page.
///
/// Stops on an empty page, at `max_pages`, or at the page count the provider
/// reports, whichever comes first.
pub async fn fetch_saved_lists(
    transport: &dyn Transport,
    gate: &mut RequestGate,
    per_page: u32,
    max_pages: Option<u32>,
) -> Result<Vec<SavedList>, RetrievalError> {
    let mut lists = Vec::new();
    let mut page = 1;
    while max_pages.is_none_or(|max| page <= max) {
        let batch = gate.send(|| transport.saved_lists(page, per_page)).await?;
        if batch.lists.is_empty() {
            break;
        }
        engine_info!("Saved lists page {} returned {} lists", page, batch.lists.len());
        lists.extend(batch.lists);
        let total_pages = batch.pagination.and_then(|p| p.total_pages);
        if total_pages.is_some_and(|total| page >= total) {
            break;
        }
        page += 1;
    }
    Ok(lists)
}

/// Case-insensitive match on the trimmed list name.
pub fn find_saved_list<'a>(lists: &'a [SavedList], name: &str) -> Option<&'a SavedList> {
    let target = name.trim().to_lowercase();
    lists
        .iter()
        .find(|list| list.name.trim().to_lowercase() == target)
}
