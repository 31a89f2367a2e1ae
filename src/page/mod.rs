mod paginator;
mod state;

pub use paginator::{page, page_numbers, total_pages, PageError, PageLink, DEFAULT_PAGE_SIZE};
pub use state::PageState;
