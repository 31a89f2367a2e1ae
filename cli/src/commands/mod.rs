pub mod fetch;
pub mod list;
pub mod map;

use anyhow::{bail, Result};
use resource_finder::{Resource, ResourceRepository, TableClient};

use crate::cli::RemoteArgs;

/// Run the paged fetch against the API. A failed fetch is an error here, not an empty list.
pub(crate) fn fetch_remote(remote: &RemoteArgs) -> Result<Vec<Resource>> {
    let config = remote.config();
    let client = TableClient::new(&config)?;
    tracing::info!(url = %client.url(), schema = config.schema.to_str(), "fetching resources");

    let mut repository = ResourceRepository::new(client, config.schema);
    repository.refresh();
    if let Some(error) = repository.error() {
        bail!("Failed to fetch resources: {error}");
    }
    Ok(repository.into_resources())
}
