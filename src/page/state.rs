use super::paginator::{page, page_numbers, total_pages, PageLink, DEFAULT_PAGE_SIZE};

/// Current page of a browsing session. Moves are clamped here, so `page` is only ever called in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current: usize,
    page_size: usize,
}

impl Default for PageState {
    fn default() -> Self { Self::new(DEFAULT_PAGE_SIZE) }
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self { current: 1, page_size: page_size.max(1) }
    }

    #[inline] pub fn current(&self) -> usize { self.current }

    #[inline] pub fn page_size(&self) -> usize { self.page_size }

    #[inline] pub fn total_pages(&self, count: usize) -> usize { total_pages(count, self.page_size) }

    /// Back to page 1.
    #[inline] pub fn reset(&mut self) { self.current = 1 }

    /// Move to `target`, clamped to `1..=total_pages(count)`.
    pub fn go_to(&mut self, target: usize, count: usize) {
        self.current = target.clamp(1, self.total_pages(count).max(1));
    }

    pub fn first(&mut self) { self.current = 1 }

    pub fn previous(&mut self, count: usize) { self.go_to(self.current.saturating_sub(1), count) }

    pub fn next(&mut self, count: usize) { self.go_to(self.current + 1, count) }

    pub fn last(&mut self, count: usize) { self.go_to(self.total_pages(count), count) }

    /// The visible slice of `items`. A current page beyond the end of `items` shows the last page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let current = self.current.clamp(1, self.total_pages(items.len()).max(1));
        page(items, current, self.page_size).unwrap_or(&[])
    }

    /// Page-number strip for `count` items.
    pub fn links(&self, count: usize) -> Vec<PageLink> {
        page_numbers(self.current, self.total_pages(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_is_clamped() {
        let mut state = PageState::new(10);
        state.previous(25);
        assert_eq!(state.current(), 1);
        state.next(25);
        state.next(25);
        state.next(25);
        assert_eq!(state.current(), 3);
        state.first();
        state.last(25);
        assert_eq!(state.current(), 3);
        state.go_to(99, 25);
        assert_eq!(state.current(), 3);
        state.go_to(0, 25);
        assert_eq!(state.current(), 1);
    }

    #[test]
    fn slice_shows_last_page_when_list_shrinks() {
        let mut state = PageState::new(2);
        let items: Vec<u8> = (0..6).collect();
        state.go_to(3, items.len());
        assert_eq!(state.slice(&items), &[4, 5]);
        assert_eq!(state.slice(&items[..3]), &[2]);
    }

    #[test]
    fn empty_list_has_page_one() {
        let state = PageState::default();
        let items: Vec<u8> = Vec::new();
        assert!(state.slice(&items).is_empty());
        assert_eq!(state.current(), 1);
        assert_eq!(state.total_pages(0), 0);
        assert!(state.links(0).is_empty());
    }

    #[test]
    fn zero_page_size_is_raised_to_one() {
        assert_eq!(PageState::new(0).page_size(), 1);
    }
}
