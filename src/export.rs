use std::io::Write;

use anyhow::{Context, Result};

use crate::resource::{join_values, normalize_website, AssetFeature, Resource};

const RESOURCE_HEADER: [&str; 9] = [
    "name", "organization_types", "description", "contact_name", "contact_email",
    "service_categories", "website", "counties", "populations_served",
];

const ASSET_HEADER: [&str; 14] = [
    "id", "name", "geography", "zip_code", "primary_type", "website", "description", "address",
    "googlemaps_link", "contact_name", "contact_email", "contact_phone", "longitude", "latitude",
];

#[inline]
fn joined(values: &[String]) -> String { values.join("; ") }

/// Write resources as CSV with a header row. Multi-valued fields are joined with `"; "`.
pub fn write_csv<'a, I, W>(resources: I, writer: W) -> Result<()>
where I: IntoIterator<Item = &'a Resource>, W: Write {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(RESOURCE_HEADER)
        .context("[export::csv] Failed to write header")?;

    let mut rows = 0usize;
    for resource in resources {
        let organization_types = joined(&resource.organization_types);
        let service_categories = joined(&resource.service_categories);
        let counties = joined(&resource.counties);
        let populations = joined(&resource.populations_served);
        csv.write_record([
            resource.name.as_str(),
            organization_types.as_str(),
            resource.description.as_str(),
            resource.contact_name.as_str(),
            resource.contact_email.as_str(),
            service_categories.as_str(),
            resource.website.as_str(),
            counties.as_str(),
            populations.as_str(),
        ]).with_context(|| format!("[export::csv] Failed to write row for {:?}", resource.name))?;
        rows += 1;
    }
    csv.flush().context("[export::csv] Failed to flush writer")?;
    tracing::debug!(rows, "wrote resource csv");
    Ok(())
}

/// Write asset features as CSV. Non-point features get empty coordinates.
pub fn write_assets_csv<'a, I, W>(assets: I, writer: W) -> Result<()>
where I: IntoIterator<Item = &'a AssetFeature>, W: Write {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(ASSET_HEADER)
        .context("[export::csv] Failed to write header")?;

    for asset in assets {
        let (lon, lat) = asset.point()
            .map(|p| (p.x().to_string(), p.y().to_string()))
            .unwrap_or_default();
        let fields = [
            &asset.id, &asset.name, &asset.geography, &asset.zip_code, &asset.primary_type,
            &asset.website, &asset.description, &asset.address, &asset.maps_link,
            &asset.contact_name, &asset.contact_email, &asset.contact_phone, &lon, &lat,
        ];
        csv.write_record(fields)
            .with_context(|| format!("[export::csv] Failed to write row for asset {}", asset.id))?;
    }
    csv.flush().context("[export::csv] Failed to flush writer")?;
    Ok(())
}

/// Printable single-record summary. Lines for empty optional fields are left out.
pub fn summary_text(resource: &Resource) -> String {
    let mut lines = vec![
        resource.name.clone(),
        format!("Location: {}", join_values(&resource.counties)),
        format!("Service type: {}", join_values(&resource.organization_types)),
    ];
    if resource.has_website() {
        lines.push(format!("Website: {}", normalize_website(&resource.website)));
    }
    if !resource.description.is_empty() {
        lines.push(format!("Description: {}", resource.description));
    }
    lines.push(format!("Populations served: {}", join_values(&resource.populations_served)));
    if !resource.contact_name.is_empty() {
        lines.push(format!("Contact: {}", resource.contact_name));
    }
    if !resource.contact_email.is_empty() {
        lines.push(format!("Email: {}", resource.contact_email));
    }
    lines.join("\n") + "\n"
}
