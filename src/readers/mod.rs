pub mod netcdf_reader;
pub mod spreadsheet_reader;

pub use netcdf_reader::read_dataset;
pub use spreadsheet_reader::{Extraction, SpreadsheetReader};
