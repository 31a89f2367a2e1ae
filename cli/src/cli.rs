use std::path::PathBuf;

use resource_finder::SchemaVersion;

/// Digital opportunity resource directory CLI
#[derive(clap::Parser, Debug)]
#[command(name = "resource-finder", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Fetch every record from the table and save a JSON snapshot (forbids stdout)
    Fetch(FetchArgs),

    /// Filter and page the resource list
    List(ListArgs),

    /// Drive the map finder over a GeoJSON asset file
    Map(MapArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct RemoteArgs {
    /// Table base id
    #[arg(long, env = "AIRTABLE_BASE_ID", default_value = "", hide_env_values = true)]
    pub base_id: String,

    /// API key
    #[arg(long, env = "AIRTABLE_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Table name
    #[arg(long, default_value = resource_finder::fetch::DEFAULT_TABLE)]
    pub table: String,

    /// API root url
    #[arg(long, default_value = resource_finder::fetch::DEFAULT_API_URL)]
    pub api_url: String,

    /// Column layout of the table (assets2024, legacy)
    #[arg(long, default_value = "assets2024")]
    pub schema: SchemaVersion,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub remote: RemoteArgs,

    /// Output snapshot file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Read resources from a snapshot written by `fetch` instead of the API
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub remote: RemoteArgs,

    /// County filter (repeatable)
    #[arg(long)]
    pub county: Vec<String>,

    /// Service category filter (repeatable)
    #[arg(long)]
    pub service: Vec<String>,

    /// Organization type filter (repeatable)
    #[arg(long = "org-type")]
    pub org_type: Vec<String>,

    /// Population served filter (repeatable)
    #[arg(long)]
    pub population: Vec<String>,

    /// Free-text search
    #[arg(short, long)]
    pub query: Option<String>,

    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Show description, populations and contact on each card
    #[arg(long)]
    pub details: bool,

    /// Print the printable summary of one resource (by name) instead of the list
    #[arg(long, value_name = "NAME")]
    pub summary: Option<String>,

    /// Also write the filtered set as CSV
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub csv: Option<PathBuf>,

    /// Overwrite existing output files
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct MapArgs {
    /// GeoJSON FeatureCollection of assets
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub assets: PathBuf,

    /// County boundaries (GeoJSON, `County` property)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub counties: Option<PathBuf>,

    /// Zip code boundaries (GeoJSON, `ZCTA5CE20` property)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub zipcodes: Option<PathBuf>,

    /// County name or 5-digit zip code
    #[arg(short, long)]
    pub geography: Option<String>,

    /// Service type filter (repeatable)
    #[arg(short = 't', long = "type")]
    pub types: Vec<String>,

    /// Free-text search
    #[arg(short, long)]
    pub query: Option<String>,

    /// Select one asset by id
    #[arg(long)]
    pub select: Option<String>,

    /// Keys sent to the focused map, e.g. right,right,enter
    #[arg(long, value_delimiter = ',')]
    pub keys: Vec<resource_finder::Key>,

    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Show the list view instead of the map view
    #[arg(long)]
    pub list: bool,

    /// Print every map command as a JSON line
    #[arg(long)]
    pub commands: bool,

    /// Write the marker FeatureCollection to this file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub markers: Option<PathBuf>,

    /// Also write the filtered set as CSV
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub csv: Option<PathBuf>,

    /// Overwrite existing output files
    #[arg(long)]
    pub force: bool,
}

impl RemoteArgs {
    pub fn config(&self) -> resource_finder::FetchConfig {
        resource_finder::FetchConfig {
            api_url: self.api_url.clone(),
            base_id: self.base_id.clone(),
            api_key: self.api_key.clone(),
            table: self.table.clone(),
            schema: self.schema,
        }
    }
}
