use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: usize = 18;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page {page} is out of range 1..={total}")]
    OutOfRange { page: usize, total: usize },
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Number of pages needed for `count` items, `ceil(count / page_size)`.
#[inline]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Slice out 1-based page `page`. The page must lie in `1..=max(total_pages, 1)`;
/// page 1 of an empty list is an empty slice.
pub fn page<T>(items: &[T], page: usize, page_size: usize) -> Result<&[T], PageError> {
    if page_size == 0 { return Err(PageError::ZeroPageSize) }
    let total = total_pages(items.len(), page_size);
    if page == 0 || page > total.max(1) {
        return Err(PageError::OutOfRange { page, total });
    }
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Ok(&items[start.min(end)..end])
}

/// An entry in the page-number strip of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Gap,
}

/// First page, a gap, the pages around `current`, a gap, last page.
/// Gaps only appear when at least one page is skipped.
pub fn page_numbers(current: usize, total: usize) -> Vec<PageLink> {
    if total == 0 { return Vec::new() }
    let current = current.clamp(1, total);
    let start = current.saturating_sub(1).max(1);
    let end = (current + 1).min(total);

    let mut links = Vec::with_capacity(end - start + 5);
    if start > 1 {
        links.push(PageLink::Page(1));
        if start > 2 { links.push(PageLink::Gap) }
    }
    links.extend((start..=end).map(PageLink::Page));
    if end < total {
        if end < total - 1 { links.push(PageLink::Gap) }
        links.push(PageLink::Page(total));
    }
    links
}
