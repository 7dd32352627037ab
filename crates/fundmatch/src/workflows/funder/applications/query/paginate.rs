use std::num::NonZeroUsize;
use std::ops::Range;

/// Number of pages for `total_matches` rows; an empty result still has one page.
pub fn total_pages(total_matches: usize, page_size: NonZeroUsize) -> usize {
    total_matches.div_ceil(page_size.get()).max(1)
}

/// Row range of `page`, clipped to `total`. Empty when the page lies past the end.
pub fn page_bounds(total: usize, page: NonZeroUsize, page_size: NonZeroUsize) -> Range<usize> {
    let start = (page.get() - 1).saturating_mul(page_size.get());
    let end = start.saturating_add(page_size.get());
    start.min(total)..end.min(total)
}

pub(crate) fn slice_page<T>(items: Vec<T>, page: NonZeroUsize, page_size: NonZeroUsize) -> Vec<T> {
    let bounds = page_bounds(items.len(), page, page_size);
    items
        .into_iter()
        .skip(bounds.start)
        .take(bounds.len())
        .collect()
}
