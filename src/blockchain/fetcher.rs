use super::source::TransactionSource;
use crate::metrics::{FETCH_ATTEMPTS, FETCH_EXHAUSTED, FETCH_FAILURES};
use crate::models::{HistoryQuery, SortOrder, TransactionPage};
use backoff::backoff::Constant;
use backoff::future::retry_notify;
use log::{error, warn};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

// Default delay between two attempts for the same page
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

// How pages are requested and retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    pub order: SortOrder,
    pub page_limit: u32,
    pub max_attempts: u32,
    pub retry_delay: Duration,
    // Only the first page is requested unless raised above 1
    pub max_pages: u32,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        FetchPolicy {
            order: SortOrder::Asc,
            page_limit: 300,
            max_attempts: 3,
            retry_delay: DEFAULT_RETRY_DELAY,
            max_pages: 1,
        }
    }
}

pub struct TransactionFetcher<S> {
    source: S,
    policy: FetchPolicy,
}

impl<S: TransactionSource> TransactionFetcher<S> {
    pub fn new(source: S, policy: FetchPolicy) -> Self {
        TransactionFetcher { source, policy }
    }

    // Fetches the wallet history of `address` on `chain`. Returns `None` when the
    // first page could not be fetched within the attempt budget; never errors.
    pub async fn fetch(&self, address: &str, chain: &str) -> Option<TransactionPage> {
        let mut query = HistoryQuery::new(address, chain, self.policy.order, self.policy.page_limit);
        let mut page = self.fetch_page(&query).await?;

        let mut pages = 1;
        while pages < self.policy.max_pages {
            let Some(cursor) = page.cursor.take().filter(|c| !c.is_empty()) else {
                break;
            };
            query.cursor = Some(cursor);
            match self.fetch_page(&query).await {
                Some(next) => {
                    page.result.extend(next.result);
                    page.cursor = next.cursor;
                    pages += 1;
                }
                None => {
                    warn!(
                        "Stopping pagination for {} on {} after {} page(s)",
                        address, chain, pages
                    );
                    break;
                }
            }
        }

        Some(page)
    }

    async fn fetch_page(&self, query: &HistoryQuery) -> Option<TransactionPage> {
        let max_attempts = self.policy.max_attempts.max(1);
        let attempt = AtomicU32::new(0);

        let result = retry_notify(
            Constant::new(self.policy.retry_delay),
            || {
                let current = attempt.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    FETCH_ATTEMPTS.inc();
                    self.source.wallet_transactions(query).await.map_err(|e| {
                        FETCH_FAILURES.inc();
                        warn!(
                            "Error fetching data for {} on {} (attempt {}/{}): {}",
                            query.address, query.chain, current, max_attempts, e
                        );
                        if current < max_attempts {
                            backoff::Error::transient(e)
                        } else {
                            backoff::Error::permanent(e)
                        }
                    })
                }
            },
            |_, delay: Duration| {
                warn!(
                    "Retrying {} on {} in {:?} ({}/{})",
                    query.address,
                    query.chain,
                    delay,
                    attempt.load(Ordering::SeqCst),
                    max_attempts
                );
            },
        )
        .await;

        match result {
            Ok(page) => Some(page),
            Err(e) => {
                FETCH_EXHAUSTED.inc();
                error!(
                    "Giving up on {} on {} after {} attempts: {}",
                    query.address, query.chain, max_attempts, e
                );
                None
            }
        }
    }
}
