use crate::error::FetchError;
use crate::models::{HistoryQuery, TransactionPage};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

// Remote capability returning one page of wallet transaction history
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn wallet_transactions(&self, query: &HistoryQuery) -> Result<TransactionPage, FetchError>;
}

#[async_trait]
impl<S: TransactionSource + ?Sized> TransactionSource for Arc<S> {
    async fn wallet_transactions(&self, query: &HistoryQuery) -> Result<TransactionPage, FetchError> {
        (**self).wallet_transactions(query).await
    }
}

// Moralis wallet-history client
pub struct MoralisClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MoralisClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        info!("Using transaction-history API at {}", base_url);
        Ok(MoralisClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl TransactionSource for MoralisClient {
    async fn wallet_transactions(&self, query: &HistoryQuery) -> Result<TransactionPage, FetchError> {
        let mut params = vec![
            ("chain", query.chain.clone()),
            ("order", query.order.as_str().to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(cursor) = &query.cursor {
            params.push(("cursor", cursor.clone()));
        }

        let response = self
            .client
            .get(format!("{}/{}", self.base_url, query.address))
            .header("X-API-Key", &self.api_key)
            .header("Accept", "application/json")
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let page: TransactionPage = serde_json::from_str(&body)?;
        debug!(
            "Fetched {} transactions for {} on {}",
            page.result.len(),
            query.address,
            query.chain
        );
        Ok(page)
    }
}
