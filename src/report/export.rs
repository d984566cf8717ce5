use super::table::ReportTable;
use crate::error::ExportError;
use csv::WriterBuilder;
use log::info;
use std::io::Write;
use std::path::PathBuf;

// Destination of a finished report
pub trait ReportSink {
    fn export(&mut self, table: &ReportTable) -> Result<(), ExportError>;
}

// Writes the report as a header row followed by one row per wallet
pub fn write_csv<W: Write>(table: &ReportTable, writer: W) -> Result<(), ExportError> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
    w.write_record(&table.columns)?;
    for row in &table.rows {
        w.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    w.flush()?;
    Ok(())
}

pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvExporter { path: path.into() }
    }
}

impl ReportSink for CsvExporter {
    fn export(&mut self, table: &ReportTable) -> Result<(), ExportError> {
        let file = std::fs::File::create(&self.path)?;
        write_csv(table, file)?;
        info!("Wrote {} rows to {}", table.rows.len(), self.path.display());
        Ok(())
    }
}
