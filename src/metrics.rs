use prometheus::{register_counter, register_histogram, Counter, Histogram};

// Defines Prometheus metrics for monitoring a scan run
lazy_static::lazy_static! {
    // Counter for every call made to the transaction-history API
    pub static ref FETCH_ATTEMPTS: Counter = register_counter!(
        "walletscan_fetch_attempts_total",
        "Total transaction-history requests attempted"
    ).unwrap();

    // Counter for failed calls, retried or not
    pub static ref FETCH_FAILURES: Counter = register_counter!(
        "walletscan_fetch_failures_total",
        "Total failed transaction-history requests"
    ).unwrap();

    // Counter for (address, chain) pages that ran out of attempts
    pub static ref FETCH_EXHAUSTED: Counter = register_counter!(
        "walletscan_fetch_exhausted_total",
        "Pages given up on after all attempts failed"
    ).unwrap();

    // Counter for wallets whose record has been collected
    pub static ref WALLETS_PROCESSED: Counter = register_counter!(
        "walletscan_wallets_processed_total",
        "Total wallets processed"
    ).unwrap();

    // Histogram for measuring per-wallet processing time in seconds
    pub static ref WALLET_PROCESS_TIME: Histogram = register_histogram!(
        "walletscan_wallet_process_seconds",
        "Wallet processing time in seconds"
    ).unwrap();
}

// Encodes all registered metrics in the Prometheus text format
pub fn render() -> String {
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode_to_string(&metric_families).unwrap_or_default()
}
