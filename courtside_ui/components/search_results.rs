use courtside_types::player::PlayerRecord;
use dioxus::prelude::*;
use rust_i18n::t;

use crate::view_helpers::format_rating;

/// What the results panel currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Loading,
    Players(Vec<PlayerRecord>),
    Failed,
}

/// Dropdown body of the player search widget.
#[component]
pub fn SearchResults(content: PanelContent) -> Element {
    match content {
        PanelContent::Loading => rsx! {
            div { class: "search-loading", "{t!(\"search.loading\")}" }
        },
        PanelContent::Failed => rsx! {
            div { class: "no-results", "{t!(\"search.error\")}" }
        },
        PanelContent::Players(players) if players.is_empty() => rsx! {
            div { class: "no-results", "{t!(\"search.empty\")}" }
        },
        PanelContent::Players(players) => rsx! {
            for player in players {
                SearchResultItem { player: player }
            }
        },
    }
}

#[component]
fn SearchResultItem(player: PlayerRecord) -> Element {
    let name = player.full_name();
    let initials = player.initials();
    let details = t!("search.rating", rating = format_rating(player.current_rating));

    rsx! {
        div {
            class: "search-result-item",
            "data-player-id": "{player.id}",
            div { class: "player-avatar", "{initials}" }
            div { class: "player-info",
                div { class: "player-name", "{name}" }
                div { class: "player-details", "• {details}" }
            }
        }
    }
}
