use crate::models::ContractSet;

// The fixed chain x contract cross product of a run. Built once and shared by
// every wallet so records are addressed by position instead of column names.
#[derive(Debug, Clone)]
pub struct ReportLayout {
    chains: Vec<String>,
    contracts: ContractSet,
}

impl ReportLayout {
    pub fn new<C, K>(chains: C, contracts: K) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for chain in chains {
            let chain = chain.into();
            if !unique.contains(&chain) {
                unique.push(chain);
            }
        }
        ReportLayout {
            chains: unique,
            contracts: ContractSet::new(contracts),
        }
    }

    pub fn chains(&self) -> &[String] {
        &self.chains
    }

    pub fn contracts(&self) -> &ContractSet {
        &self.contracts
    }

    // Column name prefix shared by every field of a (chain, contract) pair
    pub fn prefix(&self, chain: usize, contract: &str) -> String {
        format!("{}_{}", self.chains[chain], contract)
    }

    pub fn count_column(&self, chain: usize, contract: &str) -> String {
        format!("{}_transaction_count", self.prefix(chain, contract))
    }

    pub fn first_interaction_column(&self, chain: usize, contract: &str) -> String {
        format!("{}_first_interaction", self.prefix(chain, contract))
    }

    pub fn last_interaction_column(&self, chain: usize, contract: &str) -> String {
        format!("{}_last_interaction", self.prefix(chain, contract))
    }

    // Value columns are numbered from 1
    pub fn value_column(&self, chain: usize, contract: &str, k: usize) -> String {
        format!("{}_value_{}", self.prefix(chain, contract), k)
    }
}
