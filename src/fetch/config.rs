use anyhow::{anyhow, Context, Result};
use reqwest::Url;

use crate::resource::SchemaVersion;

pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";
pub const DEFAULT_TABLE: &str = "Full Assets 2024 Cleaned";

/// Where and how to fetch the resource table.
/// Missing credentials stay empty; the API then answers with an HTTP error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub api_url: String,
    pub base_id: String,
    pub api_key: String,
    pub table: String,
    pub schema: SchemaVersion,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            base_id: String::new(),
            api_key: String::new(),
            table: DEFAULT_TABLE.to_string(),
            schema: SchemaVersion::default(),
        }
    }
}

impl FetchConfig {
    /// `{api_url}/{base_id}/{table}` with each path segment percent-encoded.
    pub fn table_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .with_context(|| format!("invalid API url {}", self.api_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("API url cannot be a base: {}", self.api_url))?
            .pop_if_empty()
            .push(&self.base_id)
            .push(&self.table);
        Ok(url)
    }
}
