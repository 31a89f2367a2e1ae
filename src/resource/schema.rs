use serde::Deserialize;
use serde_json::{Map, Value};

use super::resource::{normalize_website, Resource};

/// One page of the table API: `{records: [{id, fields}], offset?}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPage {
    #[serde(default)]
    pub records: Vec<RawRecord>,
    #[serde(default)]
    pub offset: Option<String>,
}

/// A record exactly as the table API returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Field layouts the source table has used over time for the same canonical record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    /// "Full Assets 2024 Cleaned" table, space separated column names.
    #[default]
    Assets2024,
    /// Older export with underscore separated column names.
    Legacy,
}

/// Column names of one schema version, in canonical field order.
struct FieldNames {
    name: &'static str,
    organization_types: &'static str,
    description: &'static str,
    contact_name: &'static str,
    contact_email: &'static str,
    service_categories: &'static str,
    website: &'static str,
    counties: &'static str,
    populations_served: &'static str,
    hidden: &'static str,
}

impl SchemaVersion {
    pub fn to_str(&self) -> &'static str {
        match self {
            SchemaVersion::Assets2024 => "assets2024",
            SchemaVersion::Legacy => "legacy",
        }
    }

    fn field_names(&self) -> FieldNames {
        match self {
            SchemaVersion::Assets2024 => FieldNames {
                name: "Asset",
                organization_types: "Organization Sub-Type",
                description: "Asset Description",
                contact_name: "Key Contact",
                contact_email: "Contact Email",
                service_categories: "Live Site Category",
                website: "Website",
                counties: "County",
                populations_served: "Asset Covered Population",
                hidden: "Hide",
            },
            SchemaVersion::Legacy => FieldNames {
                name: "Asset",
                organization_types: "Organization_Sub_Type",
                description: "Asset_Description",
                contact_name: "Key_Contact",
                contact_email: "Contact_Email",
                service_categories: "Live_Site_Category",
                website: "Website",
                counties: "County",
                populations_served: "Asset_Covered_Population",
                hidden: "Hide",
            },
        }
    }

    /// Map a raw table record into the canonical `Resource` shape.
    pub fn adapt(&self, record: &RawRecord) -> Resource {
        let names = self.field_names();
        let fields = &record.fields;
        Resource {
            name: text(fields.get(names.name)),
            organization_types: text_list(fields.get(names.organization_types)),
            description: text(fields.get(names.description)),
            contact_name: text(fields.get(names.contact_name)),
            contact_email: text(fields.get(names.contact_email)),
            service_categories: text_list(fields.get(names.service_categories)),
            website: normalize_website(&text(fields.get(names.website))),
            counties: text_list(fields.get(names.counties)),
            populations_served: text_list(fields.get(names.populations_served)),
            hidden: flag(fields.get(names.hidden)),
        }
    }
}

impl std::str::FromStr for SchemaVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "assets2024" | "2024" => Ok(SchemaVersion::Assets2024),
            "legacy" => Ok(SchemaVersion::Legacy),
            other => anyhow::bail!("Unknown schema version: {other}"),
        }
    }
}

/// Scalar text: strings as-is, numbers and bools stringified, lists take their first entry.
pub(crate) fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(items)) => text(items.first()),
        _ => String::new(),
    }
}

/// Multi-valued text: lists keep their non-empty scalar entries, a lone scalar becomes a one-element list.
pub(crate) fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter()
            .map(|item| text(Some(item)))
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        scalar => {
            let s = text(scalar);
            if s.trim().is_empty() { Vec::new() } else { vec![s] }
        }
    }
}

/// Checkbox-like fields: `true`, `1`, `"true"`, `"yes"`, `"checked"`.
pub(crate) fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "checked"),
        _ => false,
    }
}
