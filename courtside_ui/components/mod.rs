pub mod nav;
pub mod search_results;

pub use nav::{NavItem, NavLinks, site_nav};
pub use search_results::{PanelContent, SearchResults};
