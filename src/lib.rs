pub mod blockchain;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod report;
pub mod utils;

pub use config::Config;
pub use error::{ExportError, FetchError};
pub use models::{ContractInteractionStats, TransactionPage, TransactionRecord, WalletRecord};
