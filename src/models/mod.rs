pub mod dataset;
pub mod site;
pub mod table;

pub use dataset::{AltDataset, DatasetSummary, GlobalAttributes};
pub use site::SiteRecord;
pub use table::{CleanTable, ColumnLabel, RawTable, RowBlock};
