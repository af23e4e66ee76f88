//! Search-as-you-type widget bound to the player search form.

mod session;
mod widget;

pub use widget::{PlayerSearch, SearchHandle, SearchOptions};

pub const SEARCH_INPUT_ID: &str = "player-search";
pub const SEARCH_FORM_ID: &str = "player-search-form";
pub const SEARCH_RESULTS_ID: &str = "search-results";
