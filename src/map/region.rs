use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use geo::{BoundingRect, Coord, LineString, MultiPolygon, Polygon, Rect};
use serde_json::Value;

use crate::filter::compare_names;
use crate::resource::read_property;

/// Boundary property holding the county name.
pub const COUNTY_PROPERTY: &str = "County";

/// Boundary property holding the 5-digit zip code (ZCTA).
pub const ZIP_PROPERTY: &str = "ZCTA5CE20";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeographyKind {
    County,
    ZipCode,
}

/// A county or zip code region used for spatial filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Geography {
    pub value: String,
    pub label: String,
    pub kind: GeographyKind,
}

impl Geography {
    pub fn county(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { label: name.clone(), value: name, kind: GeographyKind::County }
    }

    pub fn zip_code(code: impl Into<String>) -> Self {
        let code = code.into();
        Self { label: code.clone(), value: code, kind: GeographyKind::ZipCode }
    }

    /// "Wake County" for counties, the bare code for zip codes.
    pub fn display_name(&self) -> String {
        match self.kind {
            GeographyKind::County => format!("{} County", self.label),
            GeographyKind::ZipCode => self.label.clone(),
        }
    }

    /// Guess the kind from user input: five digits is a zip code, anything else a county.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.len() == 5 && input.chars().all(|c| c.is_ascii_digit()) {
            Self::zip_code(input)
        } else {
            Self::county(input.strip_suffix(" County").unwrap_or(input))
        }
    }
}

/// Bounding rectangles of every known geography, plus their navigation order.
#[derive(Debug, Clone, Default)]
pub struct RegionIndex {
    bounds: HashMap<(GeographyKind, String), Rect<f64>>,
    order: Vec<Geography>,
}

impl RegionIndex {
    pub fn new() -> Self { Self::default() }

    /// Build from optional county and zip code boundary FeatureCollections.
    pub fn from_sources(counties: Option<&Value>, zip_codes: Option<&Value>) -> Result<Self> {
        let mut index = Self::new();
        if let Some(counties) = counties {
            index.add_source(GeographyKind::County, COUNTY_PROPERTY, counties)
                .context("Failed to read county boundaries")?;
        }
        if let Some(zip_codes) = zip_codes {
            index.add_source(GeographyKind::ZipCode, ZIP_PROPERTY, zip_codes)
                .context("Failed to read zip code boundaries")?;
        }
        Ok(index)
    }

    #[inline] pub fn len(&self) -> usize { self.order.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// Geographies in navigation order: counties, then zip codes, each sorted by label.
    #[inline] pub fn geographies(&self) -> &[Geography] { &self.order }

    /// Bounding rectangle of a geography, if its boundary is known.
    pub fn bounds(&self, geography: &Geography) -> Option<Rect<f64>> {
        self.bounds.get(&(geography.kind, geography.value.clone())).copied()
    }

    /// Find a geography by value or label, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&Geography> {
        let wanted = Geography::parse(name);
        self.order.iter().find(|g| {
            g.kind == wanted.kind
                && (g.value.eq_ignore_ascii_case(&wanted.value) || g.label.eq_ignore_ascii_case(&wanted.label))
        })
    }

    /// Add a region by hand. Extends the existing rectangle if the geography is already known.
    pub fn insert(&mut self, geography: Geography, rect: Rect<f64>) {
        let key = (geography.kind, geography.value.clone());
        match self.bounds.get_mut(&key) {
            Some(existing) => *existing = union(existing, &rect),
            None => {
                self.bounds.insert(key, rect);
                self.order.push(geography);
                self.order.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| compare_names(&a.label, &b.label)));
            }
        }
    }

    fn add_source(&mut self, kind: GeographyKind, property: &str, collection: &Value) -> Result<()> {
        let features = collection.get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("boundary source is not a FeatureCollection"))?;

        for (idx, feature) in features.iter().enumerate() {
            let name = read_property(feature, property);
            if name.trim().is_empty() {
                tracing::warn!(idx, property, "boundary feature has no name, skipping");
                continue;
            }
            let Some(shape) = feature.get("geometry").map(parse_polygons).transpose()?.flatten() else {
                tracing::warn!(idx, name = %name, "boundary feature has no polygon geometry, skipping");
                continue;
            };
            let Some(rect) = shape.bounding_rect() else { continue };

            let geography = match kind {
                GeographyKind::County => Geography::county(name.trim()),
                GeographyKind::ZipCode => Geography::zip_code(name.trim()),
            };
            self.insert(geography, rect);
        }
        Ok(())
    }
}

fn union(a: &Rect<f64>, b: &Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}

/// Parse a GeoJSON Polygon or MultiPolygon geometry. Other geometry types yield `None`.
fn parse_polygons(geometry: &Value) -> Result<Option<MultiPolygon<f64>>> {
    let coords = geometry.get("coordinates").and_then(Value::as_array);
    match (geometry.get("type").and_then(Value::as_str), coords) {
        (Some("Polygon"), Some(rings)) => Ok(Some(MultiPolygon(vec![parse_polygon(rings)?]))),
        (Some("MultiPolygon"), Some(polygons)) => {
            let polygons = polygons.iter()
                .map(|p| p.as_array().ok_or_else(|| anyhow!("Invalid MultiPolygon: polygon is not an array")))
                .map(|rings| rings.and_then(|rings| parse_polygon(rings)))
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(MultiPolygon(polygons)))
        }
        _ => Ok(None),
    }
}

/// `[exterior, hole, hole, ...]` where each ring is `[[x, y], ...]`.
fn parse_polygon(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        ring.as_array()
            .ok_or_else(|| anyhow!("Invalid Polygon: ring is not an array"))
            .and_then(|coords| parse_ring(coords))
    });
    let exterior = rings.next()
        .ok_or_else(|| anyhow!("Invalid Polygon: missing exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());
    for pair in coords {
        let pair = pair.as_array().ok_or_else(|| anyhow!("Invalid coordinate: not an array"))?;
        let x = pair.first().and_then(Value::as_f64)
            .ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
        let y = pair.get(1).and_then(Value::as_f64)
            .ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
        points.push(Coord { x, y });
    }
    Ok(LineString(points))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Value {
        json!([[[x, y], [x + size, y], [x + size, y + size], [x, y + size], [x, y]]])
    }

    fn counties() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "County": "Wake" },
                  "geometry": { "type": "Polygon", "coordinates": square(-79.0, 35.5, 0.5) } },
                { "type": "Feature", "properties": { "County": "Durham" },
                  "geometry": { "type": "MultiPolygon", "coordinates": [square(-79.1, 35.9, 0.2), square(-78.8, 36.1, 0.1)] } },
                { "type": "Feature", "properties": { "County": "Wake" },
                  "geometry": { "type": "Polygon", "coordinates": square(-78.4, 35.6, 0.1) } },
                { "type": "Feature", "properties": { "County": "Nowhere" },
                  "geometry": { "type": "Point", "coordinates": [0.0, 0.0] } },
            ]
        })
    }

    #[test]
    fn bounds_cover_whole_multipolygon() {
        let index = RegionIndex::from_sources(Some(&counties()), None).unwrap();
        let durham = index.bounds(&Geography::county("Durham")).unwrap();
        assert_eq!(durham.min(), Coord { x: -79.1, y: 35.9 });
        assert!((durham.max().x - -78.7).abs() < 1e-9);
        assert!((durham.max().y - 36.2).abs() < 1e-9);
    }

    #[test]
    fn repeated_names_are_merged() {
        let index = RegionIndex::from_sources(Some(&counties()), None).unwrap();
        let wake = index.bounds(&Geography::county("Wake")).unwrap();
        assert_eq!(wake.min(), Coord { x: -79.0, y: 35.5 });
        assert!((wake.max().x - -78.3).abs() < 1e-9);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn order_is_counties_then_zips_by_label() {
        let zips = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "ZCTA5CE20": "27601" },
                  "geometry": { "type": "Polygon", "coordinates": square(-78.65, 35.77, 0.02) } },
            ]
        });
        let index = RegionIndex::from_sources(Some(&counties()), Some(&zips)).unwrap();
        let labels: Vec<_> = index.geographies().iter().map(|g| g.display_name()).collect();
        assert_eq!(labels, vec!["Durham County", "Wake County", "27601"]);
    }

    #[test]
    fn find_by_name_or_code() {
        let mut index = RegionIndex::new();
        index.insert(Geography::county("Wake"), Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }));
        index.insert(Geography::zip_code("27601"), Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }));
        assert_eq!(index.find("wake").map(|g| g.kind), Some(GeographyKind::County));
        assert_eq!(index.find("Wake County").map(|g| g.kind), Some(GeographyKind::County));
        assert_eq!(index.find("27601").map(|g| g.kind), Some(GeographyKind::ZipCode));
        assert!(index.find("Durham").is_none());
    }

    #[test]
    fn parse_geography_kind() {
        assert_eq!(Geography::parse("27601").kind, GeographyKind::ZipCode);
        assert_eq!(Geography::parse("Wake County"), Geography::county("Wake"));
        assert_eq!(Geography::parse("2760").kind, GeographyKind::County);
    }

    #[test]
    fn invalid_coordinates_are_errors() {
        let bad = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "County": "Bad" },
                  "geometry": { "type": "Polygon", "coordinates": [[["x", 1.0]]] } },
            ]
        });
        assert!(RegionIndex::from_sources(Some(&bad), None).is_err());
    }
}
