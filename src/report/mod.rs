pub mod export;
pub mod layout;
pub mod table;

pub use export::{write_csv, CsvExporter, ReportSink};
pub use layout::ReportLayout;
pub use table::{build_table, Cell, ReportTable};
