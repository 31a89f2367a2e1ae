mod client;
mod config;
mod repository;
mod source;

pub use client::TableClient;
pub use config::{FetchConfig, DEFAULT_API_URL, DEFAULT_TABLE};
pub use repository::{FetchState, ResourceRepository};
pub use source::{fetch_all, FetchError, PageSource};
