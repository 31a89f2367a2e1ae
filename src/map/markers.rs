use serde_json::{json, Value};

use crate::resource::AssetFeature;

/// Marker-layer data: a FeatureCollection of the Point features among `assets`.
/// Non-point features are left out of the map but stay in list and page counts.
pub fn marker_collection<'a, I>(assets: I) -> Value
where I: IntoIterator<Item = &'a AssetFeature> {
    let features: Vec<Value> = assets.into_iter()
        .filter_map(|asset| {
            let point = asset.point()?;
            Some(json!({
                "type": "Feature",
                "id": asset.id, // Feature ID for efficient source updates
                "geometry": { "type": "Point", "coordinates": [point.x(), point.y()] },
                "properties": {
                    "name": asset.name,
                    "geography": asset.geography,
                    "zip_code": asset.zip_code,
                    "primary_type": asset.primary_type,
                    "website": asset.website,
                    "description": asset.description,
                    "address_geocode": asset.address,
                    "googlemaps_link": asset.maps_link,
                    "contact_name": asset.contact_name,
                    "contact_email": asset.contact_email,
                    "contact_phone": asset.contact_phone,
                },
            }))
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
