use super::aggregator::aggregate;
use super::fetcher::TransactionFetcher;
use super::source::TransactionSource;
use crate::models::WalletRecord;
use crate::report::ReportLayout;
use futures::future::join_all;
use log::debug;
use std::sync::Arc;

// Builds the record of one wallet across every chain of the layout
pub struct WalletProcessor<S> {
    fetcher: Arc<TransactionFetcher<S>>,
    layout: Arc<ReportLayout>,
}

impl<S: TransactionSource> WalletProcessor<S> {
    pub fn new(fetcher: Arc<TransactionFetcher<S>>, layout: Arc<ReportLayout>) -> Self {
        WalletProcessor { fetcher, layout }
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    // Queries all chains concurrently. A chain whose fetch gave up is left as
    // `None`; a chain with no matching transactions gets zeroed stats.
    pub async fn process(&self, address: &str) -> WalletRecord {
        let contracts = self.layout.contracts();
        let chain_tasks = self.layout.chains().iter().map(|chain| async move {
            let Some(page) = self.fetcher.fetch(address, chain).await else {
                return None;
            };
            debug!(
                "{} on {}: {} transactions in page",
                address,
                chain,
                page.result.len()
            );
            Some(aggregate(Some(&page), contracts))
        });

        WalletRecord {
            address: address.to_string(),
            chains: join_all(chain_tasks).await,
        }
    }
}
