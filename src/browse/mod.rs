mod finder;
mod list;

pub use finder::{ResourceFinder, ViewMode, DEFAULT_REGION_NAME};
pub use list::ListBrowser;
