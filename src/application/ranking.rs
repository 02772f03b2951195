// Ranking and pagination of DAO summaries
use crate::domain::dao::{EntitySummary, SortKey};
use serde::Serialize;

/// Order `entities` descending by `key`. Equal keys keep their input order.
pub fn rank(entities: &[EntitySummary], key: SortKey) -> Vec<EntitySummary> {
    let mut ranked = entities.to_vec();
    // sort_by is stable
    ranked.sort_by(|a, b| key.value_of(b).total_cmp(&key.value_of(a)));
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Envelope for a page that was already sliced upstream.
    pub fn from_server(items: Vec<T>, page: usize, page_size: usize, total: usize) -> Self {
        let total_pages = total_pages(total, page_size);
        Self {
            items,
            page,
            page_size,
            total,
            total_pages,
            has_more: page < total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
            has_more: self.has_more,
        }
    }
}

/// Slice page `page` (1-based) out of `ranked`.
///
/// Pages outside `1..=total_pages` yield no items.
pub fn paginate<T: Clone>(ranked: &[T], page: usize, page_size: usize) -> Page<T> {
    let items = match page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(page_size.max(1));
            ranked
                .iter()
                .skip(start)
                .take(page_size.max(1))
                .cloned()
                .collect()
        }
        None => Vec::new(),
    };

    Page::from_server(items, page, page_size, ranked.len())
}

/// `ceil(total / page_size)`, never less than one.
fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}
