pub mod client;
pub mod config;
pub mod nav;
pub mod page;
pub mod search;
pub mod test_utils;

pub use client::{HttpSearchClient, SearchClient};
pub use nav::highlight_nav_links;
pub use search::{PlayerSearch, SearchHandle, SearchOptions};
