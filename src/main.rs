use chrono::Local;
use log::{debug, info};
use std::error::Error;
use std::io;
use std::time::Instant;
use walletscan::blockchain::{BatchOrchestrator, MoralisClient, TransactionFetcher};
use walletscan::report::CsvExporter;
use walletscan::{metrics, utils, Config};

// Reads a list file with the given reader, naming the path in the error
fn load(
    path: &str,
    read: fn(String) -> io::Result<Vec<String>>,
) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
    read(path.to_string()).map_err(|e| format!("failed to read {}: {}", path, e).into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Load .env if present, then default the log level to info
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    // Read the wallet, contract and chain lists once at startup
    let addresses = load(&config.addresses_file, utils::read_list)?;
    let contracts = load(&config.contracts_file, utils::read_contracts)?;
    let chains = load(&config.chains_file, utils::read_list)?;

    let start_time = Local::now();
    let started = Instant::now();
    info!("Starting search at {}", start_time.format("%Y-%m-%d %H:%M:%S"));

    // Wire the API client, fetcher and orchestrator
    let client = MoralisClient::new(&config.base_url, &config.api_key, config.request_timeout())?;
    let fetcher = TransactionFetcher::new(client, config.fetch_policy());
    let orchestrator = BatchOrchestrator::new(fetcher, config.wallet_concurrency);

    // Scan and export; a failed export aborts the run
    let mut exporter = CsvExporter::new(&config.output_file);
    let table = orchestrator
        .run_and_export(&addresses, &contracts, &chains, &mut exporter)
        .await?;

    let end_time = Local::now();
    info!(
        "Data successfully saved to {} ({} rows) at {}",
        config.output_file,
        table.rows.len(),
        end_time.format("%Y-%m-%d %H:%M:%S")
    );
    info!("Execution time: {:?}", started.elapsed());
    info!(
        "Fetch attempts: {}, failures: {}, exhausted: {}",
        metrics::FETCH_ATTEMPTS.get(),
        metrics::FETCH_FAILURES.get(),
        metrics::FETCH_EXHAUSTED.get()
    );
    debug!("Run metrics:\n{}", metrics::render());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_the_given_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contracts.txt");
        std::fs::write(&path, "0xABC\n\n0xDef\n").unwrap();
        let path = path.to_str().unwrap();

        assert_eq!(load(path, utils::read_contracts).unwrap(), vec!["0xabc", "0xdef"]);
        assert_eq!(load(path, utils::read_list).unwrap(), vec!["0xABC", "0xDef"]);
    }

    #[test]
    fn load_names_the_missing_path() {
        let err = load("no/such/list.txt", utils::read_list).unwrap_err();
        assert!(err.to_string().contains("no/such/list.txt"));
    }
}
