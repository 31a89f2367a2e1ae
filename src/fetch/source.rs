use thiserror::Error;

use crate::resource::{RawPage, Resource, SchemaVersion};

/// Failure while paging through the table API. Paging stops at the first one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP error! Status: {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Anything that can return one page of raw records for a continuation token.
pub trait PageSource {
    /// Fetch the page after `offset`, or the first page when `offset` is `None`.
    fn fetch_page(&self, offset: Option<&str>) -> Result<RawPage, FetchError>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn fetch_page(&self, offset: Option<&str>) -> Result<RawPage, FetchError> {
        (**self).fetch_page(offset)
    }
}

/// Page through `source` until no continuation token is returned, normalizing every record.
/// Pages are requested one after another; nothing is returned unless every page succeeds.
pub fn fetch_all<S: PageSource>(source: &S, schema: SchemaVersion) -> Result<Vec<Resource>, FetchError> {
    let mut resources = Vec::new();
    let mut offset: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = source.fetch_page(offset.as_deref())?;
        pages += 1;
        tracing::debug!(page = pages, records = page.records.len(), "fetched page");

        resources.extend(page.records.iter().map(|record| schema.adapt(record)));

        match page.offset {
            Some(next) if !next.is_empty() => offset = Some(next),
            _ => break,
        }
    }

    tracing::info!(pages, records = resources.len(), schema = schema.to_str(), "fetched all records");
    Ok(resources)
}


#[cfg(test)]
mod tests {
    use super::stub::{page, StubSource};
    use super::*;

    #[test]
    fn follows_offsets_until_exhausted() {
        let source = StubSource::new(vec![
            Ok(page(&["A", "B"], Some("p1"))),
            Ok(page(&["C"], Some("p2"))),
            Ok(page(&["D"], None)),
        ]);
        let resources = fetch_all(&source, SchemaVersion::Assets2024).unwrap();
        let names: Vec<_> = resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
        assert_eq!(
            *source.requested.borrow(),
            vec![None, Some("p1".to_string()), Some("p2".to_string())]
        );
    }

    #[test]
    fn empty_offset_ends_paging() {
        let source = StubSource::new(vec![Ok(page(&["A"], Some("")))]);
        let resources = fetch_all(&source, SchemaVersion::Assets2024).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(source.requested.borrow().len(), 1);
    }

    #[test]
    fn error_on_later_page_discards_everything() {
        let source = StubSource::new(vec![
            Ok(page(&["A"], Some("p1"))),
            Err(FetchError::Status(500)),
            Ok(page(&["never"], None)),
        ]);
        let err = fetch_all(&source, SchemaVersion::Assets2024).unwrap_err();
        assert_eq!(err, FetchError::Status(500));
        assert_eq!(err.to_string(), "HTTP error! Status: 500");
        assert_eq!(source.requested.borrow().len(), 2);
    }
}
