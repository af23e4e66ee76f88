use dioxus::prelude::*;
use rust_i18n::t;

use crate::view_helpers::is_active_link;

#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub href: String,
    pub label: String,
}

impl NavItem {
    pub fn new(href: &str, label: &str) -> Self {
        Self {
            href: href.to_string(),
            label: label.to_string(),
        }
    }
}

/// Top-level pages of the ratings site, labelled in the current locale.
pub fn site_nav() -> Vec<NavItem> {
    vec![
        NavItem::new("/", &t!("nav.home")),
        NavItem::new("/rankings", &t!("nav.rankings")),
        NavItem::new("/results", &t!("nav.results")),
        NavItem::new("/schedule", &t!("nav.schedule")),
        NavItem::new("/regulations", &t!("nav.regulations")),
        NavItem::new("/faq", &t!("nav.faq")),
        NavItem::new("/application", &t!("nav.application")),
    ]
}

#[component]
pub fn NavLinks(items: Vec<NavItem>, current_path: String) -> Element {
    let link_class = |href: &str| -> &'static str {
        if is_active_link(href, &current_path) {
            "nav-link active"
        } else {
            "nav-link"
        }
    };

    rsx! {
        nav { class: "navbar-nav",
            for item in items {
                a { class: link_class(&item.href), href: "{item.href}", "{item.label}" }
            }
        }
    }
}
