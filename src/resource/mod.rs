mod feature;
mod resource;
mod schema;

pub(crate) use feature::read_property;
pub use feature::{read_asset_features, read_asset_features_from_bytes, AssetFeature, FeatureGeometry};
pub use resource::{join_values, normalize_website, Resource};
pub use schema::{RawPage, RawRecord, SchemaVersion};
