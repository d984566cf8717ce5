use crate::models::{ContractInteractionStats, ContractSet, TransactionPage};
use crate::utils::normalize_timestamp;
use log::warn;

// Reduces a page of wallet transactions into per-contract statistics. The
// result holds one entry per contract, in `ContractSet` order.
pub fn aggregate(page: Option<&TransactionPage>, contracts: &ContractSet) -> Vec<ContractInteractionStats> {
    let mut stats = vec![ContractInteractionStats::default(); contracts.len()];
    let mut first_seen: Vec<Option<&str>> = vec![None; contracts.len()];
    let mut last_seen: Vec<Option<&str>> = vec![None; contracts.len()];

    let transactions = page.map(|p| p.result.as_slice()).unwrap_or_default();
    for tx in transactions {
        let Some(position) = tx.to_address.as_deref().and_then(|to| contracts.position(to)) else {
            continue;
        };
        let entry = &mut stats[position];
        entry.count += 1;
        entry.values.push(tx.value.clone());
        // A row without a timestamp still counts but leaves first/last alone
        let Some(timestamp) = tx.block_timestamp.as_deref() else {
            continue;
        };
        if first_seen[position].is_none() {
            first_seen[position] = Some(timestamp);
        }
        // Page order wins over timestamp order
        last_seen[position] = Some(timestamp);
    }

    for (entry, (first, last)) in stats.iter_mut().zip(first_seen.into_iter().zip(last_seen)) {
        entry.first_interaction = first.and_then(parse_timestamp);
        entry.last_interaction = last.and_then(parse_timestamp);
    }

    stats
}

fn parse_timestamp(raw: &str) -> Option<chrono::NaiveDateTime> {
    let parsed = normalize_timestamp(raw);
    if parsed.is_none() {
        warn!("Ignoring unparseable block timestamp {:?}", raw);
    }
    parsed
}
