use calamine::{Data, Range};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::Result;
use crate::fetch::{download_stamp, ensure_source};
use crate::models::{AltDataset, CleanTable, RowBlock};
use crate::processors::{
    CellCleaner, CleaningReport, ColumnNormalizer, DatasetAssembler, Provenance, RowFilter,
    SiteCorrector,
};
use crate::readers::{Extraction, SpreadsheetReader};
use crate::utils::constants::CALM_ROW_BLOCKS;
use crate::utils::progress::ProgressReporter;
use crate::writers::NetcdfWriter;

/// Result of a full conversion run.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub output: PathBuf,
    pub report: CleaningReport,
}

/// Fetch, extract, clean and emit, in that order.
pub struct Pipeline {
    settings: Settings,
    blocks: Vec<RowBlock>,
    silent: bool,
}

impl Pipeline {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            blocks: CALM_ROW_BLOCKS.to_vec(),
            silent: false,
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<RowBlock>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Suppress progress bars
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Make sure the source spreadsheet is on disk
    pub async fn fetch(&self) -> Result<PathBuf> {
        let progress = ProgressReporter::new_spinner("Downloading source spreadsheet...", self.silent);
        let path = ensure_source(
            &self.settings.source_url,
            &self.settings.work_dir,
            Some(&progress),
        )
        .await?;
        progress.finish_with_message(&format!("Source ready: {}", path.display()));

        Ok(path)
    }

    /// Load the workbook off the async runtime, then extract the blocks
    pub async fn extract_path(&self, path: &Path) -> Result<Extraction> {
        let path = path.to_path_buf();
        let range =
            tokio::task::spawn_blocking(move || SpreadsheetReader::new().read_workbook(&path))
                .await??;
        self.extract(&range)
    }

    pub fn extract(&self, range: &Range<Data>) -> Result<Extraction> {
        let extraction = SpreadsheetReader::new().read_blocks(range, &self.blocks)?;
        info!(
            "Extracted {} rows and {} columns from {} blocks",
            extraction.table.row_count(),
            extraction.table.columns().len(),
            self.blocks.len()
        );
        Ok(extraction)
    }

    /// Normalize, clean, correct and filter the extracted table
    pub fn transform(&self, extraction: Extraction) -> Result<(CleanTable, CleaningReport)> {
        let Extraction {
            mut table,
            block_rows,
        } = extraction;

        let renamed = ColumnNormalizer::new().normalize(&mut table);
        debug!("Applied {} column renames", renamed);

        let (mut clean, stats) = CellCleaner::new().clean(&table)?;
        debug!(
            "Cleaned {} year cells ({} missing)",
            stats.total(),
            stats.missing()
        );

        let correction = SiteCorrector::new().apply(&mut clean.sites)?;

        let (filtered, dropped) = RowFilter::new().filter(clean);
        info!(
            "Retained {} sites across {} years ({} dropped with no data)",
            filtered.site_count(),
            filtered.year_count(),
            dropped.len()
        );

        for site in filtered.sites.iter().filter(|s| !s.has_coordinates()) {
            warn!("Site '{}' ({}) has no coordinates", site.code, site.name);
        }

        let report = CleaningReport::new(&block_rows, stats, correction, &dropped, &filtered);
        for year in report.empty_years() {
            warn!("Year {} has no observations", year);
        }

        Ok((filtered, report))
    }

    pub fn assemble(&self, table: &CleanTable, provenance: &Provenance) -> Result<AltDataset> {
        DatasetAssembler::new().assemble(table, provenance)
    }

    pub fn write(&self, dataset: &AltDataset) -> Result<PathBuf> {
        NetcdfWriter::new()
            .with_prefix(&self.settings.output_prefix)
            .write(dataset, &self.settings.output_dir)
    }

    /// Everything up to, but not including, building the dataset
    pub async fn summarize(&self) -> Result<CleaningReport> {
        let source = self.fetch().await?;
        let extraction = self.extract_path(&source).await?;
        let (_, report) = self.transform(extraction)?;
        Ok(report)
    }

    pub async fn run(&self) -> Result<Conversion> {
        let source = self.fetch().await?;
        let provenance = Provenance::new(&self.settings.source_url, download_stamp(&source)?);

        let extraction = self.extract_path(&source).await?;
        let (table, report) = self.transform(extraction)?;
        let dataset = self.assemble(&table, &provenance)?;
        let output = self.write(&dataset)?;

        Ok(Conversion { output, report })
    }
}
