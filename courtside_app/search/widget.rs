use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use courtside_types::{errors::WidgetError, panel::PanelState};

use super::session::{Binding, SearchSession, Signal};
use super::{SEARCH_FORM_ID, SEARCH_INPUT_ID, SEARCH_RESULTS_ID};
use crate::{
    client::SearchClient,
    config::Config,
    page::{EventKind, EventSink, EventTarget, Page},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Quiet period after the last keystroke before a search is issued.
    pub debounce: Duration,
    /// Shorter (trimmed) queries hide the panel instead of searching.
    pub min_query_len: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Config::default().into()
    }
}

impl From<&Config> for SearchOptions {
    fn from(config: &Config) -> Self {
        Self {
            debounce: config.debounce,
            min_query_len: config.min_query_len,
        }
    }
}

impl From<Config> for SearchOptions {
    fn from(config: Config) -> Self {
        (&config).into()
    }
}

pub struct PlayerSearch;

impl PlayerSearch {
    /// Binds the widget to the page's search form.
    ///
    /// Fails with `WidgetError::MissingElement` when the input, the form or the
    /// results container is absent. Must be called inside a tokio runtime.
    pub fn attach(
        page: Arc<dyn Page>,
        client: Arc<dyn SearchClient>,
        options: SearchOptions,
    ) -> Result<SearchHandle, WidgetError> {
        for id in [SEARCH_INPUT_ID, SEARCH_FORM_ID, SEARCH_RESULTS_ID] {
            if !page.has_element(id) {
                return Err(WidgetError::MissingElement(id.to_string()));
            }
        }

        let (signals_tx, signals_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(PanelState::Hidden);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let bindings = [
            (EventTarget::element(SEARCH_INPUT_ID), EventKind::Input, Binding::Input),
            (EventTarget::element(SEARCH_INPUT_ID), EventKind::Focus, Binding::Focus),
            (EventTarget::element(SEARCH_INPUT_ID), EventKind::KeyDown, Binding::InputKeyDown),
            (EventTarget::element(SEARCH_FORM_ID), EventKind::Submit, Binding::Submit),
            (EventTarget::element(SEARCH_RESULTS_ID), EventKind::Click, Binding::ResultClick),
            (EventTarget::Document, EventKind::Click, Binding::DocumentClick),
            (EventTarget::Document, EventKind::KeyDown, Binding::DocumentKeyDown),
        ];

        let listeners = bindings
            .into_iter()
            .map(|(target, kind, binding)| {
                let tx = signals_tx.clone();
                let reader = Arc::downgrade(&page);
                let sink = EventSink::new(move |event| {
                    let value = reader
                        .upgrade()
                        .map(|page| page.value(SEARCH_INPUT_ID))
                        .unwrap_or_default();
                    // The session may already be gone; late events are dropped.
                    let _ = tx.send(Signal::Dom {
                        binding,
                        event,
                        value,
                    });
                });
                page.listen(target, kind, sink)
            })
            .collect();

        let session = SearchSession::new(page, client, options, state_tx, listeners);
        let task = tokio::spawn(session.run(signals_rx, shutdown_rx));

        Ok(SearchHandle {
            signals: signals_tx,
            state: state_rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    /// Attaches only on pages that carry the search form.
    pub fn attach_if_present(
        page: Arc<dyn Page>,
        client: Arc<dyn SearchClient>,
        options: SearchOptions,
    ) -> Result<Option<SearchHandle>, WidgetError> {
        if !page.has_element(SEARCH_FORM_ID) {
            tracing::debug!("No player search form on page");
            return Ok(None);
        }
        Self::attach(page, client, options).map(Some)
    }
}

/// Owner of an attached widget.
///
/// Dropping the handle detaches the widget as well; `teardown` additionally
/// waits until every listener has been removed from the page.
pub struct SearchHandle {
    signals: mpsc::UnboundedSender<Signal>,
    state: watch::Receiver<PanelState>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SearchHandle {
    pub fn state(&self) -> PanelState {
        *self.state.borrow()
    }

    pub fn watch(&self) -> watch::Receiver<PanelState> {
        self.state.clone()
    }

    /// Searches right away, skipping the debounce and the length check.
    pub fn search(&self, query: impl Into<String>) {
        let _ = self.signals.send(Signal::Search(query.into()));
    }

    pub async fn teardown(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Player search task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for SearchHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}
