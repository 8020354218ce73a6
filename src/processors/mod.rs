pub mod cell_cleaner;
pub mod cleaning_report;
pub mod column_normalizer;
pub mod dataset_assembler;
pub mod row_filter;
pub mod site_corrector;
pub mod temporal_framer;

pub use cell_cleaner::{clean_cell, CellCleaner, CellOutcome, CleanedCell, CleaningStats};
pub use cleaning_report::{BlockCount, CleaningReport, YearCount};
pub use column_normalizer::ColumnNormalizer;
pub use dataset_assembler::{DatasetAssembler, Provenance};
pub use row_filter::RowFilter;
pub use site_corrector::{LatitudeCorrection, SiteCorrector};
pub use temporal_framer::{TemporalFramer, TimeAxis};
