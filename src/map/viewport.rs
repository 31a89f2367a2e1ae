use geo::{coord, Point, Rect};
use serde_json::{json, Value};

use super::region::Geography;

/// Padding (pixels) used whenever the viewport is fit to bounds.
pub const FIT_PADDING: u32 = 20;

/// Zoom level used when centering on a single asset.
pub const ASSET_ZOOM: f64 = 14.0;

/// Whole-region default bounds (North Carolina), south-west to north-east in lon/lat.
pub fn default_bounds() -> Rect<f64> {
    Rect::new(coord! { x: -84.3219, y: 33.7529 }, coord! { x: -75.4001, y: 36.588 })
}

/// What the map is currently showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Viewport {
    /// Whole-region default bounds.
    #[default]
    Default,
    /// Fit to one county or zip code. `bounds` is `None` when the boundary source has no shape for it.
    Region { geography: Geography, bounds: Option<Rect<f64>> },
    /// Centered on one selected asset.
    Asset { id: String, center: Point<f64> },
}

impl Viewport {
    #[inline] pub fn is_default(&self) -> bool { matches!(self, Viewport::Default) }

    /// The selected geography, if the viewport is bounded to one.
    pub fn geography(&self) -> Option<&Geography> {
        match self {
            Viewport::Region { geography, .. } => Some(geography),
            _ => None,
        }
    }

    /// The selected asset id, if the viewport is centered on one.
    pub fn asset(&self) -> Option<&str> {
        match self {
            Viewport::Asset { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// An imperative instruction for the map engine.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    /// Replace the marker source with this GeoJSON FeatureCollection.
    SetMarkers(Value),
    /// Animate the viewport to fit `bounds`.
    FitBounds { bounds: Rect<f64>, padding: u32 },
    /// Animate the viewport to `center` at `zoom`.
    FlyTo { center: Point<f64>, zoom: f64 },
    /// Update the screen-reader status region.
    Announce(String),
}

impl MapCommand {
    pub(crate) fn fit(bounds: Rect<f64>) -> Self {
        MapCommand::FitBounds { bounds, padding: FIT_PADDING }
    }

    pub(crate) fn fit_default() -> Self { Self::fit(default_bounds()) }

    /// JSON form for handing the command to a front end.
    pub fn to_json(&self) -> Value {
        match self {
            MapCommand::SetMarkers(data) => json!({
                "command": "setMarkers",
                "count": data["features"].as_array().map_or(0, Vec::len),
            }),
            MapCommand::FitBounds { bounds, padding } => json!({
                "command": "fitBounds",
                "bounds": [[bounds.min().x, bounds.min().y], [bounds.max().x, bounds.max().y]],
                "padding": padding,
            }),
            MapCommand::FlyTo { center, zoom } => json!({
                "command": "flyTo",
                "center": [center.x(), center.y()],
                "zoom": zoom,
            }),
            MapCommand::Announce(text) => json!({ "command": "announce", "text": text }),
        }
    }
}
