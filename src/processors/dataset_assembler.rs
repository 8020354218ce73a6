use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::models::{AltDataset, CleanTable, GlobalAttributes};
use crate::processors::temporal_framer::TemporalFramer;
use crate::utils::constants::{
    DATASET_INSTITUTION, DATASET_REFERENCES, DATASET_TITLE, DATASET_VERSION,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Where the data came from and when it was processed.
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    pub source_url: String,
    pub downloaded: NaiveDate,
    pub generated: NaiveDate,
}

impl Provenance {
    /// Provenance generated today
    pub fn new(source_url: impl Into<String>, downloaded: NaiveDate) -> Self {
        Self {
            source_url: source_url.into(),
            downloaded,
            generated: Local::now().date_naive(),
        }
    }

    pub fn with_generated(mut self, generated: NaiveDate) -> Self {
        self.generated = generated;
        self
    }

    pub fn history(&self) -> String {
        format!(
            "Downloaded on {} and generated netCDF file on {} with {}",
            self.downloaded.format(DATE_FORMAT),
            self.generated.format(DATE_FORMAT),
            tool_link()
        )
    }
}

/// Name, version and home of this tool, for the `history` attribute
pub fn tool_link() -> String {
    format!(
        "{} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_REPOSITORY")
    )
}

/// Pivots a cleaned table into the (time, sites) dataset.
pub struct DatasetAssembler {
    framer: TemporalFramer,
}

impl DatasetAssembler {
    pub fn new() -> Self {
        Self {
            framer: TemporalFramer::new(),
        }
    }

    pub fn assemble(&self, table: &CleanTable, provenance: &Provenance) -> Result<AltDataset> {
        if table.sites.is_empty() {
            return Err(ProcessingError::MissingData(
                "No sites left after filtering".to_string(),
            ));
        }

        let axis = self.framer.frame(&table.years)?;
        let site_count = table.site_count();

        // Transpose site-major rows into time-major storage
        let mut alt = vec![f64::NAN; axis.len() * site_count];
        for (site_idx, row) in table.values.iter().enumerate() {
            for (time_idx, value) in row.iter().enumerate() {
                if let Some(v) = value {
                    alt[time_idx * site_count + site_idx] = *v;
                }
            }
        }

        let dataset = AltDataset {
            time: axis.time,
            time_bounds: axis.bounds,
            alt,
            site_code: table.sites.iter().map(|s| s.code.clone()).collect(),
            site_name: table.sites.iter().map(|s| s.name.clone()).collect(),
            lat: table.sites.iter().map(|s| s.latitude).collect(),
            lon: table.sites.iter().map(|s| s.longitude).collect(),
            attributes: GlobalAttributes {
                title: DATASET_TITLE.to_string(),
                versions: DATASET_VERSION.to_string(),
                institutions: DATASET_INSTITUTION.to_string(),
                source: provenance.source_url.clone(),
                history: provenance.history(),
                references: DATASET_REFERENCES.to_string(),
            },
        };
        dataset.check_shape()?;

        debug!(
            "Assembled dataset with {} time steps and {} sites",
            dataset.time_len(),
            dataset.site_len()
        );

        Ok(dataset)
    }
}

impl Default for DatasetAssembler {
    fn default() -> Self {
        Self::new()
    }
}
