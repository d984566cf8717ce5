use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

// Sort direction requested from the transaction-history API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

// Parameters of a single wallet-history page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub address: String,
    pub chain: String,
    pub order: SortOrder,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl HistoryQuery {
    pub fn new(address: &str, chain: &str, order: SortOrder, limit: u32) -> Self {
        HistoryQuery {
            address: address.to_string(),
            chain: chain.to_string(),
            order,
            limit,
            cursor: None,
        }
    }
}

fn default_value() -> String {
    "0".to_string()
}

// Treats an explicit `null` value like a missing one
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_value))
}

// A single row is never allowed to fail the whole page: every field tolerates
// absence or `null`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionRecord {
    #[serde(default)]
    pub to_address: Option<String>,
    #[serde(default = "default_value", deserialize_with = "null_as_zero")]
    pub value: String,
    #[serde(default)]
    pub block_timestamp: Option<String>,
}

// One page of wallet history as returned by the remote API
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransactionPage {
    #[serde(default)]
    pub result: Vec<TransactionRecord>,
    #[serde(default)]
    pub cursor: Option<String>,
}

// Fixed set of contracts of interest, matched on their lowercase form
#[derive(Debug, Clone, Default)]
pub struct ContractSet {
    contracts: Vec<String>,
    index: HashMap<String, usize>,
}

impl ContractSet {
    // Builds the set keeping the first occurrence of each contract
    pub fn new<I, S>(contracts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = ContractSet::default();
        for contract in contracts {
            let contract = contract.into();
            let key = contract.to_lowercase();
            if set.index.contains_key(&key) {
                continue;
            }
            set.index.insert(key, set.contracts.len());
            set.contracts.push(contract);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.contracts.iter().map(String::as_str)
    }

    // Position of a recipient address in the set, compared in lowercase
    pub fn position(&self, address: &str) -> Option<usize> {
        self.index.get(&address.to_lowercase()).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractInteractionStats {
    pub count: u64,
    pub first_interaction: Option<NaiveDateTime>,
    pub last_interaction: Option<NaiveDateTime>,
    pub values: Vec<String>,
}

// Aggregated result for one wallet. `chains[i]` is `None` when the fetch for
// the i-th chain of the layout exhausted its retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletRecord {
    pub address: String,
    pub chains: Vec<Option<Vec<ContractInteractionStats>>>,
}

impl WalletRecord {
    // Record for a wallet with no chain data at all
    pub fn address_only(address: &str, chain_count: usize) -> Self {
        WalletRecord {
            address: address.to_string(),
            chains: vec![None; chain_count],
        }
    }

    pub fn stats(&self, chain: usize, contract: usize) -> Option<&ContractInteractionStats> {
        self.chains.get(chain)?.as_ref()?.get(contract)
    }
}
