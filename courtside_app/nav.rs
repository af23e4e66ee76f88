use courtside_ui::is_active_link;

use crate::page::Page;

pub const NAV_LINK_CLASS: &str = "nav-link";
pub const ACTIVE_CLASS: &str = "active";

/// Marks the navigation link pointing at the current page.
///
/// Runs once per page load: links are only ever marked, never unmarked.
/// Returns how many links were marked.
pub fn highlight_nav_links(page: &dyn Page) -> usize {
    let current_path = page.current_path();
    let mut marked = 0;

    for node in page.query_class(NAV_LINK_CLASS) {
        let Some(href) = page.attribute(node, "href") else {
            continue;
        };
        if is_active_link(&href, &current_path) {
            page.add_class(node, ACTIVE_CLASS);
            marked += 1;
        }
    }

    tracing::debug!(path = %current_path, marked, "Highlighted navigation links");
    marked
}
