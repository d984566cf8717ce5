use crate::blockchain::{FetchPolicy, DEFAULT_WALLET_CONCURRENCY};
use crate::models::SortOrder;
use std::env;
use std::time::Duration;

// Default Moralis wallet-history API base URL
pub const DEFAULT_BASE_URL: &str = "https://deep-index.moralis.io/api/v2.2";

// Configuration for a contract-interaction scan
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String, // Moralis API key
    pub base_url: String, // Transaction-history API base URL
    pub addresses_file: String, // Line-delimited wallet addresses
    pub contracts_file: String, // Line-delimited contract addresses
    pub chains_file: String, // Line-delimited chain identifiers
    pub output_file: String, // Path of the exported report
    pub wallet_concurrency: usize, // Wallets processed at the same time
    pub order: SortOrder, // Sort direction requested from the API
    pub page_limit: u32, // Page size requested from the API
    pub max_attempts: u32, // Attempts per page before giving up
    pub retry_delay_secs: u64, // Fixed delay between attempts
    pub max_pages: u32, // Pages followed per (address, chain)
    pub request_timeout_secs: u64, // HTTP request timeout
}

// Reads an optional numeric variable, falling back to the default on absence or parse failure
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

impl Config {
    // Loads configuration from environment variables, with defaults for optional fields
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync + 'static>> {
        let config = Config {
            // Required: Moralis API key
            api_key: env::var("MORALIS_API_KEY").map_err(|_| "MORALIS_API_KEY must be set")?,
            // Optional: API base URL
            base_url: env::var("MORALIS_BASE_URL").unwrap_or(DEFAULT_BASE_URL.to_string()),
            // Optional: input and output paths
            addresses_file: env::var("ADDRESSES_FILE").unwrap_or("addresses.txt".to_string()),
            contracts_file: env::var("CONTRACTS_FILE").unwrap_or("contracts.txt".to_string()),
            chains_file: env::var("CHAINS_FILE").unwrap_or("chains.txt".to_string()),
            output_file: env::var("OUTPUT_FILE").unwrap_or("contract_interactions.csv".to_string()),
            // Optional: concurrency cap for wallets (defaults to 5)
            wallet_concurrency: env_or("WALLET_CONCURRENCY", DEFAULT_WALLET_CONCURRENCY),
            // Optional: sort order (defaults to ASC)
            order: match env::var("FETCH_ORDER") {
                Ok(v) => v.parse()?,
                Err(_) => SortOrder::Asc,
            },
            // Optional: fetch tuning
            page_limit: env_or("PAGE_LIMIT", 300),
            max_attempts: env_or("FETCH_MAX_ATTEMPTS", 3),
            retry_delay_secs: env_or("FETCH_RETRY_DELAY_SECS", 5),
            max_pages: env_or("MAX_PAGES", 1),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
        };

        // Validate fields that would make the run meaningless
        if config.api_key.trim().is_empty() {
            return Err("MORALIS_API_KEY must not be empty".into());
        }
        if config.wallet_concurrency == 0 || config.max_attempts == 0 || config.max_pages == 0 {
            return Err("WALLET_CONCURRENCY, FETCH_MAX_ATTEMPTS and MAX_PAGES must be positive".into());
        }

        Ok(config)
    }

    // Fetch behaviour derived from this configuration
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            order: self.order,
            page_limit: self.page_limit,
            max_attempts: self.max_attempts,
            retry_delay: Duration::from_secs(self.retry_delay_secs),
            max_pages: self.max_pages,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
