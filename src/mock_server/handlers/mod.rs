//! HTTP request handlers for the mock server.

pub mod dispatch_rules;
pub mod participants;
pub mod trunks;

pub use dispatch_rules::*;
pub use participants::*;
pub use trunks::*;

/// Apply page/count pagination to a filtered listing.
pub(crate) fn paginate<T: Clone>(items: Vec<&T>, page: u32, count: u32) -> (Vec<T>, u64) {
    let total = items.len() as u64;
    let start = ((page.max(1) - 1) * count) as usize;
    let end = (start + count as usize).min(items.len());

    let page_items = if start < items.len() {
        items[start..end].iter().map(|t| (*t).clone()).collect()
    } else {
        vec![]
    };
    (page_items, total)
}
