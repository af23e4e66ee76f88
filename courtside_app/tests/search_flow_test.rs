
use axum::http::StatusCode;
use std::{sync::Arc, time::Duration};
use tokio::time::timeout;

use courtside_app::{
    HttpSearchClient, PlayerSearch, SearchHandle, SearchOptions, highlight_nav_links,
    page::{MemoryPage, Page},
    search::{SEARCH_INPUT_ID, SEARCH_RESULTS_ID},
};
use courtside_types::panel::PanelState;

use crate::test_utils::tests::{echo_router, failing_router, malformed_router, spawn_server};

async fn wait_for_state(handle: &SearchHandle, expected: PanelState) {
    let mut state = handle.watch();
    let reached = timeout(Duration::from_secs(5), state.wait_for(|s| *s == expected)).await;
    assert!(
        matches!(reached, Ok(Ok(_))),
        "panel never reached {:?}",
        expected
    );
}

#[tokio::test]
async fn test_typing_searches_renders_and_navigates() {
    let base_url = spawn_server(echo_router()).await;
    let page = Arc::new(MemoryPage::new("/").with_search_form());
    let client = Arc::new(HttpSearchClient::new(&base_url).unwrap());
    let handle = PlayerSearch::attach(page.clone(), client, SearchOptions::default()).unwrap();

    page.type_text(SEARCH_INPUT_ID, "Ann");
    wait_for_state(&handle, PanelState::ShowingResults).await;

    let html = page.inner_html(SEARCH_RESULTS_ID);
    assert!(html.contains("Ann Lee"));
    assert!(html.contains("Rating: 1500"));
    assert!(html.contains("Bo Kim"));
    assert!(html.contains("Rating: N/A"));

    page.click_result(SEARCH_RESULTS_ID, "2");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(page.navigations(), vec!["/player/2"]);

    handle.teardown().await;
    assert_eq!(page.listener_count(), 0);
}

#[tokio::test]
async fn test_backend_failure_shows_generic_error() {
    let base_url = spawn_server(failing_router(StatusCode::BAD_GATEWAY)).await;
    let page = Arc::new(MemoryPage::new("/").with_search_form());
    let client = Arc::new(HttpSearchClient::new(&base_url).unwrap());
    let handle = PlayerSearch::attach(page.clone(), client, SearchOptions::default()).unwrap();

    page.type_text(SEARCH_INPUT_ID, "Ann");
    wait_for_state(&handle, PanelState::ShowingError).await;

    assert!(
        page.inner_html(SEARCH_RESULTS_ID)
            .contains("Error loading search results")
    );
}

#[tokio::test]
async fn test_unreadable_response_shows_generic_error() {
    let base_url = spawn_server(malformed_router()).await;
    let page = Arc::new(MemoryPage::new("/").with_search_form());
    let client = Arc::new(HttpSearchClient::new(&base_url).unwrap());
    let handle = PlayerSearch::attach(page.clone(), client, SearchOptions::default()).unwrap();

    page.type_text(SEARCH_INPUT_ID, "Ann");
    wait_for_state(&handle, PanelState::ShowingError).await;

    assert!(
        page.inner_html(SEARCH_RESULTS_ID)
            .contains("Error loading search results")
    );
    assert!(page.is_visible(SEARCH_RESULTS_ID));
}

#[tokio::test]
async fn test_page_load_wiring() {
    let base_url = spawn_server(echo_router()).await;
    let page = Arc::new(
        MemoryPage::new("/players")
            .with_nav_link("/")
            .with_nav_link("/players")
            .with_nav_link("/about")
            .with_search_form(),
    );
    let client = Arc::new(HttpSearchClient::new(&base_url).unwrap());

    assert_eq!(highlight_nav_links(page.as_ref()), 1);
    let handle =
        PlayerSearch::attach_if_present(page.clone(), client, SearchOptions::default()).unwrap();

    assert!(handle.is_some());
    assert_eq!(page.current_path(), "/players");
}
