#![allow(dead_code)]

use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use walletscan::blockchain::{FetchPolicy, TransactionSource};
use walletscan::models::{HistoryQuery, TransactionPage, TransactionRecord};
use walletscan::FetchError;

pub enum Script {
    // Pages served in order; page n is requested with cursor "n"
    Pages(Vec<TransactionPage>),
    // Fails the first n calls, then serves the page
    FailThen(u32, TransactionPage),
    AlwaysFail,
}

// In-process transaction source driven by per-(address, chain) scripts.
// Unscripted pairs get an empty page.
#[derive(Default)]
pub struct ScriptedSource {
    scripts: HashMap<(String, String), Script>,
    calls: Mutex<HashMap<(String, String), u32>>,
    max_delay_ms: u64,
    delays: HashMap<String, u64>,
    events: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, address: &str, chain: &str, script: Script) -> Self {
        self.scripts.insert((address.to_string(), chain.to_string()), script);
        self
    }

    // Every call sleeps for a random time up to `max_delay_ms`
    pub fn with_random_delay(mut self, max_delay_ms: u64) -> Self {
        self.max_delay_ms = max_delay_ms;
        self
    }

    // Every call for `address` sleeps for exactly `delay_ms`
    pub fn with_delay(mut self, address: &str, delay_ms: u64) -> Self {
        self.delays.insert(address.to_string(), delay_ms);
        self
    }

    // Call log of "start:<address>" and "end:<address>" entries
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn calls(&self, address: &str, chain: &str) -> u32 {
        let calls = self.calls.lock().unwrap();
        calls.get(&(address.to_string(), chain.to_string())).copied().unwrap_or(0)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionSource for ScriptedSource {
    async fn wallet_transactions(&self, query: &HistoryQuery) -> Result<TransactionPage, FetchError> {
        let key = (query.address.clone(), query.chain.clone());
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let n = calls.entry(key.clone()).or_insert(0);
            *n += 1;
            *n
        };

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        self.events.lock().unwrap().push(format!("start:{}", query.address));
        if let Some(delay) = self.delays.get(&query.address) {
            tokio::time::sleep(Duration::from_millis(*delay)).await;
        }
        if self.max_delay_ms > 0 {
            let delay = rand::thread_rng().gen_range(0..=self.max_delay_ms);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.events.lock().unwrap().push(format!("end:{}", query.address));

        match self.scripts.get(&key) {
            None => Ok(TransactionPage::default()),
            Some(Script::Pages(pages)) => {
                let index = query.cursor.as_deref().map(|c| c.parse::<usize>().unwrap()).unwrap_or(0);
                Ok(pages[index].clone())
            }
            Some(Script::FailThen(failures, page)) => {
                if call <= *failures {
                    Err(unavailable())
                } else {
                    Ok(page.clone())
                }
            }
            Some(Script::AlwaysFail) => Err(unavailable()),
        }
    }
}

pub fn unavailable() -> FetchError {
    FetchError::Status {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

pub fn tx(to: &str, value: &str, timestamp: &str) -> TransactionRecord {
    TransactionRecord {
        to_address: Some(to.to_string()),
        value: value.to_string(),
        block_timestamp: Some(timestamp.to_string()),
    }
}

pub fn page(transactions: Vec<TransactionRecord>) -> TransactionPage {
    TransactionPage {
        result: transactions,
        cursor: None,
    }
}

// Default policy with a retry delay short enough for tests
pub fn fast_policy() -> FetchPolicy {
    FetchPolicy {
        retry_delay: Duration::from_millis(1),
        ..FetchPolicy::default()
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
