mod fuzzy;
mod predicate;
mod selection;

pub use fuzzy::{FuzzyMatcher, DEFAULT_THRESHOLD};
pub use predicate::{compare_names, filter, matches, matches_dimension, sort_by_name, Filterable};
pub use selection::{Dimension, FilterSelection};
