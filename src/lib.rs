#![doc = "Resource Finder public API"]
pub mod browse;
pub mod export;
pub mod fetch;
pub mod filter;
pub mod io;
pub mod map;
pub mod page;
pub mod resource;
pub mod view;

#[doc(inline)]
pub use resource::{read_asset_features, AssetFeature, FeatureGeometry, Resource, SchemaVersion};

#[doc(inline)]
pub use fetch::{fetch_all, FetchConfig, FetchError, PageSource, ResourceRepository, TableClient};

#[doc(inline)]
pub use filter::{Dimension, FilterSelection, Filterable, FuzzyMatcher};

#[doc(inline)]
pub use page::{PageError, PageState};

#[doc(inline)]
pub use map::{Geography, Key, MapCommand, MapEvent, MapSync, RegionIndex, Viewport};

#[doc(inline)]
pub use browse::{ListBrowser, ResourceFinder, ViewMode};
