use serde::{Deserialize, Serialize};

/// A single organization, service or location in the directory.
/// Optional text fields are empty strings and optional lists are empty vectors, never missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub organization_types: Vec<String>,
    pub description: String,
    pub contact_name: String,
    pub contact_email: String,
    pub service_categories: Vec<String>,
    pub website: String, // absolute URL or empty
    pub counties: Vec<String>,
    pub populations_served: Vec<String>,
    #[serde(default)]
    pub hidden: bool,
}

impl Resource {
    /// Create a visible resource with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    #[inline] pub fn has_website(&self) -> bool { !self.website.is_empty() }

    #[inline] pub fn has_contact(&self) -> bool { !self.contact_name.is_empty() || !self.contact_email.is_empty() }
}

/// Prefix `https://` onto a URL that has no http(s) scheme. Empty input stays empty.
pub fn normalize_website(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        String::new()
    } else if url.starts_with("https://") || url.starts_with("http://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Join a multi-valued field for display, e.g. `["Wake", "Durham"]` -> `"Wake, Durham"`.
pub fn join_values(values: &[String]) -> String {
    values.join(", ")
}
