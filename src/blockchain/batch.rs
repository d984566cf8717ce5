use super::fetcher::TransactionFetcher;
use super::processor::WalletProcessor;
use super::source::TransactionSource;
use crate::error::ExportError;
use crate::metrics::{WALLETS_PROCESSED, WALLET_PROCESS_TIME};
use crate::models::WalletRecord;
use crate::report::{build_table, ReportLayout, ReportSink, ReportTable};
use futures::stream::{self, StreamExt};
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;

// Default number of wallets processed at the same time
pub const DEFAULT_WALLET_CONCURRENCY: usize = 5;

// Runs the per-wallet processing for a whole address list and assembles the report
pub struct BatchOrchestrator<S> {
    fetcher: Arc<TransactionFetcher<S>>,
    wallet_concurrency: usize,
}

impl<S: TransactionSource + 'static> BatchOrchestrator<S> {
    pub fn new(fetcher: TransactionFetcher<S>, wallet_concurrency: usize) -> Self {
        BatchOrchestrator {
            fetcher: Arc::new(fetcher),
            // At least one wallet must be in flight for the batch to progress
            wallet_concurrency: wallet_concurrency.max(1),
        }
    }

    // Scans every address and returns the report, rows in input order
    pub async fn run(&self, addresses: &[String], contracts: &[String], chains: &[String]) -> ReportTable {
        // Compute the chain x contract layout once for the whole run
        let layout = Arc::new(ReportLayout::new(chains.iter().cloned(), contracts.iter().cloned()));
        // Share one processor between all wallet tasks
        let processor = Arc::new(WalletProcessor::new(self.fetcher.clone(), layout.clone()));

        info!(
            "Scanning {} wallets across {} chains for {} contracts",
            addresses.len(),
            layout.chains().len(),
            layout.contracts().len()
        );

        // Collect records back in input order, then widen them into the table
        let records = self.collect_records(processor, addresses).await;
        build_table(&layout, &records)
    }

    // Scans every address and hands the finished report to `sink`
    pub async fn run_and_export(
        &self,
        addresses: &[String],
        contracts: &[String],
        chains: &[String],
        sink: &mut dyn ReportSink,
    ) -> Result<ReportTable, ExportError> {
        let table = self.run(addresses, contracts, chains).await;
        // The sink only sees the finished table
        sink.export(&table)?;
        Ok(table)
    }

    // Processes wallets with at most `wallet_concurrency` in flight
    async fn collect_records(&self, processor: Arc<WalletProcessor<S>>, addresses: &[String]) -> Vec<WalletRecord> {
        let chain_count = processor.layout().chains().len();

        let tasks = addresses.iter().cloned().enumerate().map(|(index, address)| {
            let processor = processor.clone();
            async move {
                let start_time = Instant::now();
                // Each wallet runs on its own task so a panic stays contained
                let task_address = address.clone();
                let handle = tokio::spawn(async move { processor.process(&task_address).await });

                let record = match handle.await {
                    Ok(record) => record,
                    Err(e) => {
                        error!("Wallet task for {} failed: {}", address, e);
                        WalletRecord::address_only(&address, chain_count)
                    }
                };

                // Record wallet processing metrics
                let elapsed = start_time.elapsed();
                WALLETS_PROCESSED.inc();
                WALLET_PROCESS_TIME.observe(elapsed.as_secs_f64());
                info!("Processed wallet {} in {:.2}s", address, elapsed.as_secs_f64());
                (index, record)
            }
        });

        // A finished wallet frees its slot right away, whatever its position
        let completed: Vec<(usize, WalletRecord)> = stream::iter(tasks)
            .buffer_unordered(self.wallet_concurrency)
            .collect()
            .await;

        // Put every record back at its input position
        let mut slots: Vec<Option<WalletRecord>> = vec![None; addresses.len()];
        for (index, record) in completed {
            slots[index] = Some(record);
        }
        slots
            .into_iter()
            .zip(addresses)
            .map(|(record, address)| record.unwrap_or_else(|| WalletRecord::address_only(address, chain_count)))
            .collect()
    }
}
