use std::future;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{JoinError, JoinSet};
use tokio::time::{Instant, sleep_until};

use courtside_types::{errors::SearchError, panel::PanelState, player::PlayerRecord};
use courtside_ui::{PanelContent, render_panel};

use super::{SEARCH_FORM_ID, SEARCH_INPUT_ID, SEARCH_RESULTS_ID, SearchOptions};
use crate::{
    client::SearchClient,
    page::{ClickEvent, DomEvent, KeyPress, ListenerId, Page},
};

/// Which subscription delivered an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Binding {
    Input,
    Focus,
    InputKeyDown,
    Submit,
    ResultClick,
    DocumentClick,
    DocumentKeyDown,
}

/// Work for the session task. DOM signals carry the search input's value as
/// it was when the event fired, not when the task gets to it.
#[derive(Debug)]
pub(super) enum Signal {
    Dom {
        binding: Binding,
        event: DomEvent,
        value: String,
    },
    Search(String),
}

type SearchOutcome = (u64, Result<Vec<PlayerRecord>, SearchError>);

/// State owned by the widget's task.
///
/// Every issued search carries a sequence number; a response is applied only
/// when it answers the latest one, so a slow earlier request can never
/// overwrite a newer result set.
pub(super) struct SearchSession {
    page: Arc<dyn Page>,
    client: Arc<dyn SearchClient>,
    options: SearchOptions,
    state: watch::Sender<PanelState>,
    results: Vec<PlayerRecord>,
    debounce: Option<(Instant, String)>,
    issued: u64,
    inflight: JoinSet<SearchOutcome>,
    listeners: Vec<ListenerId>,
}

impl SearchSession {
    pub(super) fn new(
        page: Arc<dyn Page>,
        client: Arc<dyn SearchClient>,
        options: SearchOptions,
        state: watch::Sender<PanelState>,
        listeners: Vec<ListenerId>,
    ) -> Self {
        Self {
            page,
            client,
            options,
            state,
            results: Vec::new(),
            debounce: None,
            issued: 0,
            inflight: JoinSet::new(),
            listeners,
        }
    }

    pub(super) async fn run(
        mut self,
        mut signals: mpsc::UnboundedReceiver<Signal>,
        mut shutdown: oneshot::Receiver<()>,
    ) {
        tracing::debug!("Player search attached");

        loop {
            let deadline = self.debounce.as_ref().map(|(at, _)| *at);

            tokio::select! {
                _ = &mut shutdown => break,
                signal = signals.recv() => match signal {
                    Some(signal) => self.handle(signal),
                    None => break,
                },
                Some(joined) = self.inflight.join_next(), if !self.inflight.is_empty() => {
                    self.complete(joined)
                }
                _ = debounce_elapsed(deadline), if deadline.is_some() => self.fire_debounced(),
            }
        }

        self.detach();
    }

    fn handle(&mut self, signal: Signal) {
        match signal {
            Signal::Search(query) => self.perform_search(query),
            Signal::Dom {
                binding,
                event,
                value: input,
            } => match (binding, event) {
                (Binding::Input, DomEvent::Input { value }) => self.on_input(&value),
                (Binding::Focus, DomEvent::Focus) => self.on_focus(input.trim()),
                (Binding::Submit, DomEvent::Submit) => self.on_submit(input.trim()),
                (Binding::ResultClick, DomEvent::Click(click)) => self.on_result_click(&click),
                (Binding::DocumentClick, DomEvent::Click(click)) => self.on_document_click(&click),
                (Binding::InputKeyDown, DomEvent::KeyDown(key)) => {
                    self.on_input_key(&key, &input)
                }
                (Binding::DocumentKeyDown, DomEvent::KeyDown(key)) => self.on_document_key(&key),
                (binding, event) => {
                    tracing::trace!(?binding, ?event, "Ignoring event for binding")
                }
            },
        }
    }

    fn is_too_short(&self, query: &str) -> bool {
        query.chars().count() < self.options.min_query_len
    }

    fn on_input(&mut self, value: &str) {
        self.debounce = None;

        let query = value.trim();
        if self.is_too_short(query) {
            self.hide();
            return;
        }

        self.debounce = Some((Instant::now() + self.options.debounce, query.to_string()));
    }

    fn fire_debounced(&mut self) {
        if let Some((_, query)) = self.debounce.take() {
            self.perform_search(query);
        }
    }

    fn on_focus(&mut self, query: &str) {
        if self.is_too_short(query) || self.results.is_empty() {
            return;
        }
        // A pending request will replace the panel anyway.
        if self.current_state() == PanelState::Loading {
            return;
        }
        self.show_results();
    }

    fn on_submit(&mut self, query: &str) {
        if query.is_empty() {
            return;
        }
        self.debounce = None;
        self.perform_search(query.to_string());
    }

    fn on_result_click(&mut self, click: &ClickEvent) {
        if self.current_state() != PanelState::ShowingResults {
            return;
        }
        let Some(player_id) = click.player_id.as_deref() else {
            return;
        };

        if let Some(player) = self.results.iter().find(|p| p.matches_id(player_id)) {
            let href = player.href();
            tracing::info!(%href, "Opening player page");
            self.page.navigate(&href);
        }
    }

    fn on_document_click(&mut self, click: &ClickEvent) {
        if !click.is_within(SEARCH_FORM_ID) {
            self.hide();
        }
    }

    fn on_document_key(&mut self, key: &KeyPress) {
        if key.is_shortcut("k") {
            self.page.focus(SEARCH_INPUT_ID);
            self.page.select(SEARCH_INPUT_ID);
        }

        if key.is_escape() && self.current_state().is_visible() {
            self.hide();
            self.page.blur(SEARCH_INPUT_ID);
        }
    }

    fn on_input_key(&mut self, key: &KeyPress, value: &str) {
        if key.is_escape() && value.is_empty() {
            self.page.blur(SEARCH_INPUT_ID);
            self.hide();
        }
    }

    fn perform_search(&mut self, query: String) {
        self.issued += 1;
        let seq = self.issued;

        self.render(PanelContent::Loading, PanelState::Loading);
        tracing::debug!(seq, %query, "Searching players");

        let client = self.client.clone();
        self.inflight
            .spawn(async move { (seq, client.search(&query).await) });
    }

    fn complete(&mut self, joined: Result<SearchOutcome, JoinError>) {
        let (seq, outcome) = match joined {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => return,
            Err(e) => {
                // The sequence is lost with the panicked task; only a panel
                // still waiting on some request is switched to the error view.
                tracing::error!("Search error: {}", SearchError::Aborted(e.to_string()));
                if self.current_state() == PanelState::Loading {
                    self.render(PanelContent::Failed, PanelState::ShowingError);
                }
                return;
            }
        };

        if seq != self.issued {
            tracing::debug!(seq, latest = self.issued, "Discarding stale search response");
            return;
        }

        match outcome {
            Ok(players) => {
                tracing::debug!(seq, count = players.len(), "Search completed");
                self.results = players;
                self.show_results();
            }
            Err(e) => {
                tracing::error!("Search error: {}", e);
                self.render(PanelContent::Failed, PanelState::ShowingError);
            }
        }
    }

    fn show_results(&mut self) {
        let state = if self.results.is_empty() {
            PanelState::ShowingEmpty
        } else {
            PanelState::ShowingResults
        };
        self.render(PanelContent::Players(self.results.clone()), state);
    }

    fn render(&mut self, content: PanelContent, state: PanelState) {
        self.page
            .set_inner_html(SEARCH_RESULTS_ID, render_panel(&content));
        self.page.set_visible(SEARCH_RESULTS_ID, true);
        self.state.send_replace(state);
    }

    fn hide(&mut self) {
        if self.current_state() == PanelState::Loading {
            // Abandon the in-flight request: its response must not reopen the panel.
            self.issued += 1;
        }
        self.page.set_visible(SEARCH_RESULTS_ID, false);
        self.state.send_replace(PanelState::Hidden);
    }

    fn current_state(&self) -> PanelState {
        *self.state.borrow()
    }

    fn detach(&mut self) {
        for id in self.listeners.drain(..) {
            self.page.unlisten(id);
        }
        self.inflight.abort_all();
        self.debounce = None;
        tracing::debug!("Player search detached");
    }
}

async fn debounce_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => future::pending().await,
    }
}
