#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use courtside_types::{errors::SearchError, player::PlayerRecord};

    use crate::{
        client::SearchClient,
        page::MemoryPage,
        search::{PlayerSearch, SearchHandle, SearchOptions},
    };

    pub const OUTSIDE_ID: &str = "page-body";

    #[derive(Debug, Clone)]
    enum StubResponse {
        Players {
            players: Vec<PlayerRecord>,
            delay: Duration,
        },
        Failure,
    }

    /// Scripted `SearchClient`; unknown queries answer with an empty list.
    #[derive(Debug, Default)]
    pub struct StubSearchClient {
        calls: Mutex<Vec<String>>,
        responses: Mutex<HashMap<String, StubResponse>>,
    }

    impl StubSearchClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, query: &str, players: Vec<PlayerRecord>) {
            self.respond_after(query, Duration::ZERO, players);
        }

        pub fn respond_after(&self, query: &str, delay: Duration, players: Vec<PlayerRecord>) {
            self.responses
                .lock()
                .unwrap()
                .insert(query.to_string(), StubResponse::Players { players, delay });
        }

        pub fn fail(&self, query: &str) {
            self.responses
                .lock()
                .unwrap()
                .insert(query.to_string(), StubResponse::Failure);
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchClient for StubSearchClient {
        async fn search(&self, query: &str) -> Result<Vec<PlayerRecord>, SearchError> {
            self.calls.lock().unwrap().push(query.to_string());
            let response = {
                let responses = self.responses.lock().unwrap();
                responses.get(query).cloned()
            };

            match response {
                Some(StubResponse::Players { players, delay }) => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    Ok(players)
                }
                Some(StubResponse::Failure) => {
                    Err(SearchError::Transport("connection refused".to_string()))
                }
                None => Ok(vec![]),
            }
        }
    }

    /// A page with the search form plus an unrelated element to click on.
    pub fn search_page(path: &str) -> Arc<MemoryPage> {
        Arc::new(
            MemoryPage::new(path)
                .with_element(OUTSIDE_ID, None)
                .with_search_form(),
        )
    }

    pub fn attach_widget(page: &Arc<MemoryPage>, client: &Arc<StubSearchClient>) -> SearchHandle {
        PlayerSearch::attach(page.clone(), client.clone(), SearchOptions::default())
            .expect("search form should be present")
    }

    /// Lets the widget task run for `ms` of (possibly paused) tokio time.
    pub async fn settle(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
