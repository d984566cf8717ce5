use super::layout::ReportLayout;
use crate::models::{ContractInteractionStats, WalletRecord};
use chrono::NaiveDateTime;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Text(String),
    Count(u64),
    Timestamp(NaiveDateTime),
    Value(String),
}

impl Cell {
    fn timestamp(ts: Option<NaiveDateTime>) -> Self {
        ts.map(Cell::Timestamp).unwrap_or(Cell::Empty)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) | Cell::Value(s) => f.write_str(s),
            Cell::Count(n) => write!(f, "{}", n),
            Cell::Timestamp(ts) => write!(f, "{}", ts),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    // Cell of `row` under the column called `name`
    pub fn cell(&self, row: usize, name: &str) -> Option<&Cell> {
        self.rows.get(row)?.get(self.column_index(name)?)
    }
}

// Number of value columns for each (chain, contract), the widest list among all records
fn value_widths(layout: &ReportLayout, records: &[WalletRecord]) -> Vec<Vec<usize>> {
    let contract_count = layout.contracts().len();
    (0..layout.chains().len())
        .map(|chain| {
            (0..contract_count)
                .map(|contract| {
                    records
                        .iter()
                        .filter_map(|r| r.stats(chain, contract))
                        .map(|s| s.values.len())
                        .max()
                        .unwrap_or(0)
                })
                .collect()
        })
        .collect()
}

// Builds the wide table. Row order follows `records`.
pub fn build_table(layout: &ReportLayout, records: &[WalletRecord]) -> ReportTable {
    let widths = value_widths(layout, records);

    // Header: address, then count/first/last/values per chain and contract
    let mut columns = vec!["address".to_string()];
    for (chain, chain_widths) in widths.iter().enumerate() {
        for (contract, width) in layout.contracts().iter().zip(chain_widths) {
            columns.push(layout.count_column(chain, contract));
            columns.push(layout.first_interaction_column(chain, contract));
            columns.push(layout.last_interaction_column(chain, contract));
            columns.extend((1..=*width).map(|k| layout.value_column(chain, contract, k)));
        }
    }

    // One row per record, padded to the header width
    let rows = records
        .iter()
        .map(|record| {
            let mut row = Vec::with_capacity(columns.len());
            row.push(Cell::Text(record.address.clone()));
            for (chain, chain_widths) in widths.iter().enumerate() {
                let chain_stats = record.chains.get(chain).and_then(Option::as_ref);
                for (contract, width) in chain_widths.iter().enumerate() {
                    // Failed chain: every cell of the pair stays empty
                    match chain_stats.and_then(|s| s.get(contract)) {
                        Some(stats) => push_stats(&mut row, stats, *width),
                        None => row.extend(std::iter::repeat(Cell::Empty).take(3 + width)),
                    }
                }
            }
            row
        })
        .collect();

    ReportTable { columns, rows }
}

fn push_stats(row: &mut Vec<Cell>, stats: &ContractInteractionStats, width: usize) {
    // Count and interaction bounds
    row.push(Cell::Count(stats.count));
    row.push(Cell::timestamp(stats.first_interaction));
    row.push(Cell::timestamp(stats.last_interaction));
    // Values in page order, then blanks up to the widest wallet
    row.extend(stats.values.iter().cloned().map(Cell::Value));
    row.extend(std::iter::repeat(Cell::Empty).take(width - stats.values.len()));
}
