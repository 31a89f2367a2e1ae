use anyhow::{anyhow, Context, Result};
use geo::Point;
use serde_json::{Map, Value};

use super::schema::text;

/// Geometry of an asset feature. Only points are drawn as markers.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Point(Point<f64>),
    Other(String), // GeoJSON geometry type name, e.g. "Polygon"
}

/// One feature of the GeoJSON assets dataset used by the map view.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetFeature {
    pub id: String,
    pub geometry: FeatureGeometry,
    pub name: String,
    pub geography: String,
    pub zip_code: String,
    pub primary_type: String,
    pub website: String,
    pub description: String,
    pub address: String,
    pub maps_link: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl AssetFeature {
    /// A feature with only id, name and geometry set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, geometry: FeatureGeometry) -> Self {
        Self {
            id: id.into(),
            geometry,
            name: name.into(),
            geography: String::new(),
            zip_code: String::new(),
            primary_type: String::new(),
            website: String::new(),
            description: String::new(),
            address: String::new(),
            maps_link: String::new(),
            contact_name: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
        }
    }

    /// Get the point location, if this feature is a Point.
    #[inline]
    pub fn point(&self) -> Option<Point<f64>> {
        match self.geometry {
            FeatureGeometry::Point(p) => Some(p),
            FeatureGeometry::Other(_) => None,
        }
    }

    #[inline] pub fn is_point(&self) -> bool { self.point().is_some() }

    /// Primary type split into its individual categories.
    pub fn types(&self) -> Vec<&str> {
        self.primary_type.split([',', ';'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Build from a GeoJSON Feature. `index` is used as the id when the feature has none.
    pub fn from_geojson(feature: &Value, index: usize) -> Result<Self> {
        let geometry = feature.get("geometry")
            .and_then(Value::as_object)
            .ok_or_else(|| anyhow!("feature {index} has no geometry"))?;
        let geometry = parse_geometry(geometry)
            .with_context(|| format!("feature {index} has invalid geometry"))?;

        let empty = Map::new();
        let props = feature.get("properties").and_then(Value::as_object).unwrap_or(&empty);
        let prop = |key: &str| text(props.get(key));

        let id = match feature.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => index.to_string(),
        };

        Ok(Self {
            id,
            geometry,
            name: prop("name"),
            geography: prop("geography"),
            zip_code: prop("zip_code"),
            primary_type: prop("primary_type"),
            website: prop("website"),
            description: prop("description"),
            address: prop("address_geocode"),
            maps_link: prop("googlemaps_link"),
            contact_name: prop("contact_name"),
            contact_email: prop("contact_email"),
            contact_phone: prop("contact_phone"),
        })
    }
}

/// Text of one property of a GeoJSON Feature, empty when absent.
pub(crate) fn read_property(feature: &Value, key: &str) -> String {
    text(feature.get("properties").and_then(|props| props.get(key)))
}

/// Read every feature of a GeoJSON FeatureCollection.
/// Features without a usable geometry are skipped with a warning.
pub fn read_asset_features(collection: &Value) -> Result<Vec<AssetFeature>> {
    let features = collection.get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("GeoJSON is not a FeatureCollection"))?;

    let mut assets = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        match AssetFeature::from_geojson(feature, index) {
            Ok(asset) => assets.push(asset),
            Err(e) => tracing::warn!("skipping asset feature: {e:#}"),
        }
    }
    Ok(assets)
}

/// Parse the asset dataset from raw GeoJSON bytes.
pub fn read_asset_features_from_bytes(bytes: &[u8]) -> Result<Vec<AssetFeature>> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;
    read_asset_features(&value)
}

fn parse_geometry(geometry: &Map<String, Value>) -> Result<FeatureGeometry> {
    let ty = geometry.get("type").and_then(Value::as_str)
        .ok_or_else(|| anyhow!("geometry has no type"))?;
    if ty != "Point" {
        return Ok(FeatureGeometry::Other(ty.to_string()));
    }
    let coords = geometry.get("coordinates").and_then(Value::as_array)
        .ok_or_else(|| anyhow!("Point has no coordinates"))?;
    let (Some(x), Some(y)) = (coords.first().and_then(Value::as_f64), coords.get(1).and_then(Value::as_f64)) else {
        return Err(anyhow!("Point coordinates must be [lon, lat] numbers"));
    };
    Ok(FeatureGeometry::Point(Point::new(x, y)))
}
