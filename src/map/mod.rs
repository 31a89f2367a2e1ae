mod keyboard;
mod markers;
mod region;
mod sync;
mod viewport;

pub use keyboard::{Key, KeyboardNav, NavAction};
pub use markers::marker_collection;
pub use region::{Geography, GeographyKind, RegionIndex, COUNTY_PROPERTY, ZIP_PROPERTY};
pub use sync::{MapEvent, MapSync};
pub use viewport::{default_bounds, MapCommand, Viewport, ASSET_ZOOM, FIT_PADDING};
