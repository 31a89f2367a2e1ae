use std::cmp::Ordering;

use super::fuzzy::FuzzyMatcher;
use super::selection::{Dimension, FilterSelection};
use crate::resource::{AssetFeature, Resource};

/// A record the filter engine can evaluate.
pub trait Filterable {
    /// Display name, also the sort key.
    fn name(&self) -> &str;

    /// Values of this record for a categorical dimension (empty if it has no such field).
    fn dimension_values(&self, dim: Dimension) -> Vec<&str>;

    /// Text fields searched by the free-text query.
    fn search_fields(&self) -> Vec<&str>;

    /// Hidden records never pass any filter.
    fn is_hidden(&self) -> bool { false }
}

impl Filterable for Resource {
    fn name(&self) -> &str { &self.name }

    fn dimension_values(&self, dim: Dimension) -> Vec<&str> {
        let values = match dim {
            Dimension::County => &self.counties,
            Dimension::ServiceCategory => &self.service_categories,
            Dimension::OrganizationType => &self.organization_types,
            Dimension::PopulationServed => &self.populations_served,
            Dimension::ZipCode => return Vec::new(),
        };
        values.iter().map(String::as_str).collect()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.description.as_str()];
        fields.extend(self.service_categories.iter().map(String::as_str));
        fields.extend(self.organization_types.iter().map(String::as_str));
        fields.extend(self.counties.iter().map(String::as_str));
        fields
    }

    fn is_hidden(&self) -> bool { self.hidden }
}

impl Filterable for AssetFeature {
    fn name(&self) -> &str { &self.name }

    fn dimension_values(&self, dim: Dimension) -> Vec<&str> {
        match dim {
            Dimension::County => vec![self.geography.as_str()],
            Dimension::ZipCode => vec![self.zip_code.as_str()],
            Dimension::ServiceCategory | Dimension::OrganizationType => self.types(),
            Dimension::PopulationServed => Vec::new(),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.primary_type.as_str(),
            self.geography.as_str(),
            self.address.as_str(),
        ]
    }
}

/// Case- and surrounding-whitespace-insensitive equality.
#[inline]
fn same_option(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Does `item` pass one dimension? Inactive dimensions pass everything.
pub fn matches_dimension<T: Filterable + ?Sized>(item: &T, dim: Dimension, selection: &FilterSelection) -> bool {
    let selected = selection.selected(dim);
    if selected.is_empty() { return true }
    let values = item.dimension_values(dim);
    selected.iter().any(|option| values.iter().any(|value| same_option(value, option)))
}

/// Does `item` pass every categorical dimension of `selection`? Hidden items never do.
/// The free-text query is not considered here; see [`filter`].
pub fn matches<T: Filterable + ?Sized>(item: &T, selection: &FilterSelection) -> bool {
    !item.is_hidden()
        && Dimension::order().iter().all(|dim| matches_dimension(item, *dim, selection))
}

/// Apply hidden, categorical and free-text filtering.
/// With a query, results are ordered best match first (ties keep input order); otherwise input order is kept.
pub fn filter<'a, T: Filterable>(items: &'a [T], selection: &FilterSelection, matcher: &FuzzyMatcher) -> Vec<&'a T> {
    let candidates = items.iter().filter(|item| matches(*item, selection));

    if selection.query().trim().is_empty() {
        return candidates.collect();
    }

    let mut scored: Vec<(f64, usize, &T)> = candidates
        .enumerate()
        .filter_map(|(pos, item)| {
            matcher.score(selection.query(), item.search_fields()).map(|score| (score, pos, item))
        })
        .collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, _, item)| item).collect()
}

/// Compare names case-insensitively, falling back to the raw text for a total order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Stable ascending sort by display name.
pub fn sort_by_name<T: Filterable + ?Sized>(items: &mut [&T]) {
    items.sort_by(|a, b| compare_names(a.name(), b.name()));
}
