use async_trait::async_trait;
use reqwest::{Client, Url};

use courtside_types::{
    errors::{SearchError, WidgetError},
    player::PlayerRecord,
};

pub const SEARCH_ENDPOINT: &str = "/api/search-players";

/// Looks players up by free-text query.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<PlayerRecord>, SearchError>;
}

/// `SearchClient` backed by `GET /api/search-players?q=...`.
///
/// No timeout or retry is layered on top of the transport defaults.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    http: Client,
    endpoint: Url,
}

impl HttpSearchClient {
    pub fn new(base_url: &str) -> Result<Self, WidgetError> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(SEARCH_ENDPOINT))
            .map_err(|_| WidgetError::InvalidEndpoint(base_url.to_string()))?;

        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn search_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().clear().append_pair("q", query);
        url
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<PlayerRecord>, SearchError> {
        let url = self.search_url(query);
        tracing::debug!(%url, "Requesting player search");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_is_rooted_at_base() {
        let client = HttpSearchClient::new("http://ratings.local:5000").unwrap();

        assert_eq!(
            client.endpoint().as_str(),
            "http://ratings.local:5000/api/search-players"
        );
    }

    #[test]
    fn test_query_is_url_encoded() {
        let client = HttpSearchClient::new("http://ratings.local").unwrap();

        let url = client.search_url("ann lee&x=1");
        assert_eq!(url.query(), Some("q=ann+lee%26x%3D1"));

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("q".to_string(), "ann lee&x=1".to_string())]);
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpSearchClient::new("not a url");

        assert_eq!(
            result.unwrap_err(),
            WidgetError::InvalidEndpoint("not a url".to_string())
        );
    }
}
