use std::env;
use std::time::Duration;

const DEFAULT_DATA_BASE_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_SP500_LISTING_URL: &str =
    "https://raw.githubusercontent.com/datasets/s-and-p-500-companies/main/data/constituents.csv";
const DEFAULT_NASDAQ_LISTING_URL: &str =
    "https://raw.githubusercontent.com/datasets/nasdaq-listings/main/data/nasdaq-listed.csv";

/// Application-wide settings: endpoints and fetch behaviour.
///
/// Everything has a working default; environment variables (or a `.env`
/// file) override them, and CLI flags override the scan-level knobs on top.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_base_url: String,
    pub sp500_listing_url: String,
    pub nasdaq_listing_url: String,
    pub request_timeout: Duration,
    pub fetch_concurrency: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let data_base_url = env::var("DATA_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATA_BASE_URL.to_string());

        let sp500_listing_url = env::var("SP500_LISTING_URL")
            .unwrap_or_else(|_| DEFAULT_SP500_LISTING_URL.to_string());

        let nasdaq_listing_url = env::var("NASDAQ_LISTING_URL")
            .unwrap_or_else(|_| DEFAULT_NASDAQ_LISTING_URL.to_string());

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let fetch_concurrency = env::var("FETCH_CONCURRENCY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4);

        Self {
            data_base_url,
            sp500_listing_url,
            nasdaq_listing_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            fetch_concurrency,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_base_url: DEFAULT_DATA_BASE_URL.to_string(),
            sp500_listing_url: DEFAULT_SP500_LISTING_URL.to_string(),
            nasdaq_listing_url: DEFAULT_NASDAQ_LISTING_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            fetch_concurrency: 4,
        }
    }
}
