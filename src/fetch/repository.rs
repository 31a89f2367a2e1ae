use super::source::{fetch_all, PageSource};
use crate::resource::{Resource, SchemaVersion};

/// Loading/error/data contract exposed to views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState {
    pub records: Vec<Resource>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for FetchState {
    fn default() -> Self {
        Self { records: Vec::new(), loading: true, error: None }
    }
}

/// Owns the fetched resource set. Constructed once, refreshed explicitly.
#[derive(Debug)]
pub struct ResourceRepository<S: PageSource> {
    source: S,
    schema: SchemaVersion,
    state: FetchState,
}

impl<S: PageSource> ResourceRepository<S> {
    pub fn new(source: S, schema: SchemaVersion) -> Self {
        Self { source, schema, state: FetchState::default() }
    }

    #[inline] pub fn state(&self) -> &FetchState { &self.state }

    #[inline] pub fn resources(&self) -> &[Resource] { &self.state.records }

    #[inline] pub fn is_loading(&self) -> bool { self.state.loading }

    #[inline] pub fn error(&self) -> Option<&str> { self.state.error.as_deref() }

    /// Re-run the full paged fetch. On failure the record set is left empty and the error is kept.
    pub fn refresh(&mut self) -> &FetchState {
        self.state = FetchState::default();
        match fetch_all(&self.source, self.schema) {
            Ok(records) => self.state.records = records,
            Err(e) => {
                tracing::error!("Error fetching resource data: {e}");
                self.state.error = Some(e.to_string());
            }
        }
        self.state.loading = false;
        &self.state
    }

    /// Take the fetched records, leaving the repository empty.
    pub fn into_resources(self) -> Vec<Resource> { self.state.records }
}

#[cfg(test)]
mod tests {
    use super::super::source::stub::{page, StubSource};
    use super::super::source::FetchError;
    use super::*;

    #[test]
    fn starts_loading() {
        let repo = ResourceRepository::new(StubSource::new(vec![]), SchemaVersion::Assets2024);
        assert!(repo.is_loading());
        assert!(repo.resources().is_empty());
        assert!(repo.error().is_none());
    }

    #[test]
    fn refresh_collects_all_pages() {
        let source = StubSource::new(vec![
            Ok(page(&["A", "B"], Some("p1"))),
            Ok(page(&["C"], None)),
        ]);
        let mut repo = ResourceRepository::new(source, SchemaVersion::Assets2024);
        let state = repo.refresh();
        assert!(!state.loading);
        assert_eq!(state.records.len(), 3);
        assert_eq!(state.error, None);
    }

    #[test]
    fn failed_refresh_shows_error_not_partial_data() {
        let source = StubSource::new(vec![
            Ok(page(&["A"], Some("p1"))),
            Err(FetchError::Status(401)),
        ]);
        let mut repo = ResourceRepository::new(source, SchemaVersion::Assets2024);
        repo.refresh();
        assert!(!repo.is_loading());
        assert!(repo.resources().is_empty());
        assert_eq!(repo.error(), Some("HTTP error! Status: 401"));
    }
}
