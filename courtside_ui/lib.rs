mod components;
mod view_helpers;

use dioxus::prelude::*;

pub use components::{NavItem, NavLinks, PanelContent, SearchResults, site_nav};
pub use view_helpers::{format_rating, is_active_link};

#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en");

/// Switches the locale used by every rendered string.
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Renders the inner HTML of the search results panel.
pub fn render_panel(content: &PanelContent) -> String {
    dioxus_ssr::render_element(rsx! {
        SearchResults { content: content.clone() }
    })
}

/// Renders the navigation bar with the link for `current_path` marked active.
pub fn render_nav(items: &[NavItem], current_path: &str) -> String {
    dioxus_ssr::render_element(rsx! {
        NavLinks { items: items.to_vec(), current_path: current_path.to_string() }
    })
}
