pub mod aggregator;
pub mod batch;
pub mod fetcher;
pub mod processor;
pub mod source;

pub use aggregator::aggregate;
pub use batch::{BatchOrchestrator, DEFAULT_WALLET_CONCURRENCY};
pub use fetcher::{FetchPolicy, TransactionFetcher};
pub use processor::WalletProcessor;
pub use source::{MoralisClient, TransactionSource};
