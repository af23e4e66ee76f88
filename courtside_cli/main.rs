use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use courtside_app::{
    HttpSearchClient, PlayerSearch, SearchHandle, SearchOptions,
    config::Config,
    highlight_nav_links,
    page::{MemoryPage, Page},
    search::{SEARCH_FORM_ID, SEARCH_INPUT_ID, SEARCH_RESULTS_ID},
};
use courtside_types::{Result, errors::ApplicationError, panel::PanelState};
use courtside_ui::{render_nav, set_locale, site_nav};

mod commands;
mod logs;

use commands::{Command, HELP, parse_command};
use logs::setup_logging;

const BODY_ID: &str = "page-body";

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    let _log_guard = setup_logging();
    let config = Config::from_env();
    set_locale(&config.locale);

    let page = Arc::new(build_page(&config));
    let marked = highlight_nav_links(page.as_ref());
    tracing::info!(path = %config.page_path, marked, "Navigation highlighted");
    println!("{}", render_nav(&site_nav(), &config.page_path));

    let client = Arc::new(HttpSearchClient::new(&config.api_url)?);
    let handle = PlayerSearch::attach(page.clone(), client, SearchOptions::from(&config))?;
    tracing::info!(api = %config.api_url, "Player search ready");
    println!("{}", HELP);

    spawn_panel_printer(page.clone(), handle.watch());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::State)) => print_panel(&page, handle.state()),
            Ok(Some(command)) => apply(&page, &handle, command),
            Ok(None) => {}
            Err(e) => eprintln!("{}\n{}", e, HELP),
        }
    }

    handle.teardown().await;
    Ok(())
}

fn build_page(config: &Config) -> MemoryPage {
    site_nav()
        .iter()
        .fold(MemoryPage::new(&config.page_path), |page, item| {
            page.with_nav_link(&item.href)
        })
        .with_element(BODY_ID, None)
        .with_search_form()
}

fn apply(page: &MemoryPage, handle: &SearchHandle, command: Command) {
    match command {
        Command::Type(text) => page.type_text(SEARCH_INPUT_ID, &text),
        Command::Focus => page.focus(SEARCH_INPUT_ID),
        Command::Blur => page.blur(SEARCH_INPUT_ID),
        Command::Submit => page.submit(SEARCH_FORM_ID),
        Command::Click(id) => page.click(&id),
        Command::Pick(player_id) => page.click_result(SEARCH_RESULTS_ID, &player_id),
        Command::Key(press) => page.press_key(press),
        Command::Search(query) => handle.search(query),
        Command::State | Command::Quit => {}
    }
}

fn spawn_panel_printer(page: Arc<MemoryPage>, mut state: watch::Receiver<PanelState>) {
    tokio::spawn(async move {
        while state.changed().await.is_ok() {
            let current = *state.borrow_and_update();
            print_panel(&page, current);
        }
    });
}

fn print_panel(page: &MemoryPage, state: PanelState) {
    println!("[{:?}]", state);
    if state.is_visible() {
        println!("{}", page.inner_html(SEARCH_RESULTS_ID));
    }
}
