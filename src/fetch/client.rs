use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{blocking::Client, header, redirect::Policy, Url};

use super::config::FetchConfig;
use super::source::{FetchError, PageSource};
use crate::resource::RawPage;

/// Blocking client for the spreadsheet-backed table API.
#[derive(Debug, Clone)]
pub struct TableClient {
    client: Client,
    url: Url,
    api_key: String,
}

impl TableClient {
    /// Build a client for `{api_url}/{base_id}/{table}`.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("resource-finder/", env!("CARGO_PKG_VERSION")))
            .redirect(Policy::limited(10))
            .timeout(Duration::from_secs(30))
            .build()
            .context("build HTTP client")?;

        Ok(Self { client, url: config.table_url()?, api_key: config.api_key.clone() })
    }

    /// Full table URL, without any continuation token.
    #[inline] pub fn url(&self) -> &Url { &self.url }
}

impl PageSource for TableClient {
    fn fetch_page(&self, offset: Option<&str>) -> Result<RawPage, FetchError> {
        let mut request = self.client
            .get(self.url.clone())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        let response = request.send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.json::<RawPage>()
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
