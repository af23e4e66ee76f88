use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub page_path: String,
    pub debounce: Duration,
    pub min_query_len: usize,
    pub locale: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_path: "/".to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            locale: "en".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let api_url = match env::var("COURTSIDE_API_URL") {
            Ok(val) => val,
            Err(_) => DEFAULT_API_URL.to_string(),
        };

        let page_path = match env::var("COURTSIDE_PAGE_PATH") {
            Ok(val) => val,
            Err(_) => "/".to_string(),
        };

        let debounce_ms = match env::var("COURTSIDE_SEARCH_DEBOUNCE_MS") {
            Ok(val) => val.parse::<u64>().unwrap_or(DEFAULT_DEBOUNCE_MS),
            Err(_) => DEFAULT_DEBOUNCE_MS,
        };

        let min_query_len = match env::var("COURTSIDE_SEARCH_MIN_CHARS") {
            Ok(val) => val.parse::<usize>().unwrap_or(DEFAULT_MIN_QUERY_LEN).max(1),
            Err(_) => DEFAULT_MIN_QUERY_LEN,
        };

        let locale = match env::var("COURTSIDE_LOCALE") {
            Ok(val) => val,
            Err(_) => "en".to_string(),
        };

        Self {
            api_url,
            page_path,
            debounce: Duration::from_millis(debounce_ms),
            min_query_len,
            locale,
        }
    }
}
