use crate::filter::{filter, sort_by_name, Dimension, FilterSelection, FuzzyMatcher};
use crate::page::{PageLink, PageState};
use crate::resource::Resource;

/// List view over the tabular resource set: four categorical filters, a query and fixed-size pages.
#[derive(Debug, Clone)]
pub struct ListBrowser {
    resources: Vec<Resource>,
    selection: FilterSelection,
    page: PageState,
    matcher: FuzzyMatcher,
}

impl ListBrowser {
    pub fn new(resources: Vec<Resource>) -> Self {
        Self::with_page_state(resources, PageState::default())
    }

    pub fn with_page_state(resources: Vec<Resource>, page: PageState) -> Self {
        Self { resources, selection: FilterSelection::new(), page, matcher: FuzzyMatcher::default() }
    }

    #[inline] pub fn resources(&self) -> &[Resource] { &self.resources }

    #[inline] pub fn selection(&self) -> &FilterSelection { &self.selection }

    #[inline] pub fn current_page(&self) -> usize { self.page.current() }

    /// Replace the options of one dimension. Resets to page 1.
    pub fn set_filter<I, T>(&mut self, dim: Dimension, options: I)
    where I: IntoIterator<Item = T>, T: Into<String> {
        self.selection.set(dim, options);
        self.page.reset();
    }

    /// Toggle one option of a dimension. Resets to page 1.
    pub fn toggle(&mut self, dim: Dimension, option: &str) -> bool {
        self.page.reset();
        self.selection.toggle(dim, option)
    }

    /// Set the free-text query. Resets to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.selection.set_query(query);
        self.page.reset();
    }

    /// Drop every filter and the query.
    pub fn clear_all(&mut self) {
        self.selection.clear_all();
        self.page.reset();
    }

    /// Resources passing the current selection. Sorted by name, or by relevance while a query is set.
    pub fn filtered(&self) -> Vec<&Resource> {
        let mut results = filter(&self.resources, &self.selection, &self.matcher);
        if self.selection.query().trim().is_empty() {
            sort_by_name(&mut results);
        }
        results
    }

    #[inline] pub fn count(&self) -> usize { self.filtered().len() }

    #[inline] pub fn total_pages(&self) -> usize { self.page.total_pages(self.count()) }

    /// Move to a page, clamped to the available range.
    pub fn go_to_page(&mut self, page: usize) {
        let count = self.count();
        self.page.go_to(page, count);
    }

    /// Resources on the current page.
    pub fn visible(&self) -> Vec<&Resource> {
        self.page.slice(&self.filtered()).to_vec()
    }

    /// First filtered resource whose name equals `name`, ignoring case and surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<&Resource> {
        let wanted = name.trim().to_lowercase();
        self.filtered().into_iter().find(|r| r.name.trim().to_lowercase() == wanted)
    }

    /// Page-number strip for the pagination control.
    pub fn links(&self) -> Vec<PageLink> { self.page.links(self.count()) }
}
