use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::utils::calendar::NoLeapDateTime;
use crate::utils::filename::output_file_name;

/// Dataset-level provenance written as global attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalAttributes {
    pub title: String,
    pub versions: String,
    pub institutions: String,
    pub source: String,
    pub history: String,
    pub references: String,
}

/// Active layer thickness on a (time, sites) grid with its coordinates.
///
/// `alt` is stored row-major: `alt[t * site_count + s]`. Missing values are
/// NaN. Time values are days since 1850-01-01 on the no-leap calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct AltDataset {
    pub time: Vec<f64>,
    pub time_bounds: Vec<[f64; 2]>,
    pub alt: Vec<f64>,
    pub site_code: Vec<String>,
    pub site_name: Vec<String>,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub attributes: GlobalAttributes,
}

impl AltDataset {
    pub fn time_len(&self) -> usize {
        self.time.len()
    }

    pub fn site_len(&self) -> usize {
        self.site_code.len()
    }

    pub fn value(&self, time_index: usize, site_index: usize) -> Option<f64> {
        if site_index >= self.site_len() {
            return None;
        }
        self.alt
            .get(time_index * self.site_len() + site_index)
            .copied()
            .filter(|v| !v.is_nan())
    }

    /// Values of one time slice, NaN for missing
    pub fn time_slice(&self, time_index: usize) -> &[f64] {
        let n = self.site_len();
        let start = (time_index * n).min(self.alt.len());
        let end = (start + n).min(self.alt.len());
        &self.alt[start..end]
    }

    /// Flattened (time, 2) bounds in row-major order
    pub fn flat_time_bounds(&self) -> Vec<f64> {
        self.time_bounds.iter().flat_map(|b| b.iter().copied()).collect()
    }

    /// Calendar year each time interval starts in
    pub fn years(&self) -> Result<Vec<i32>> {
        self.time_bounds
            .iter()
            .map(|b| NoLeapDateTime::from_days_since_epoch(b[0]).map(|d| d.year))
            .collect()
    }

    pub fn year_span(&self) -> Result<(i32, i32)> {
        let years = self.years()?;
        match (years.first(), years.last()) {
            (Some(&start), Some(&end)) => Ok((start, end)),
            _ => Err(ProcessingError::MissingData(
                "dataset has no time steps".to_string(),
            )),
        }
    }

    pub fn file_name(&self, prefix: &str) -> Result<String> {
        let (start, end) = self.year_span()?;
        Ok(output_file_name(prefix, start, end))
    }

    /// Check that every array matches the time and site dimensions
    pub fn check_shape(&self) -> Result<()> {
        let (nt, ns) = (self.time_len(), self.site_len());
        let checks = [
            ("time_bnds", self.time_bounds.len(), nt),
            ("alt", self.alt.len(), nt * ns),
            ("site_name", self.site_name.len(), ns),
            ("lat", self.lat.len(), ns),
            ("lon", self.lon.len(), ns),
        ];

        for (name, actual, expected) in checks {
            if actual != expected {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Variable '{}' has {} values, expected {}",
                    name, actual, expected
                )));
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> Result<DatasetSummary> {
        let years = self.years()?;
        let observed_sites = (0..self.time_len())
            .map(|t| self.time_slice(t).iter().filter(|v| !v.is_nan()).count())
            .collect::<Vec<_>>();

        Ok(DatasetSummary {
            time: self.time_len(),
            sites: self.site_len(),
            years: years.into_iter().zip(observed_sites).collect(),
            attributes: self.attributes.clone(),
        })
    }
}

/// Human-facing overview of a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub time: usize,
    pub sites: usize,
    /// (year, number of sites with a value)
    pub years: Vec<(i32, usize)>,
    pub attributes: GlobalAttributes,
}

impl DatasetSummary {
    pub fn detailed_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Dataset Summary ===\n");
        summary.push_str(&format!("Title: {}\n", self.attributes.title));
        summary.push_str(&format!("Version: {}\n", self.attributes.versions));
        summary.push_str(&format!("Source: {}\n", self.attributes.source));
        summary.push_str(&format!("History: {}\n", self.attributes.history));
        summary.push_str(&format!(
            "Dimensions: time={}, sites={}, nb=2\n",
            self.time, self.sites
        ));

        if let (Some(first), Some(last)) = (self.years.first(), self.years.last()) {
            summary.push_str(&format!("Years: {}-{}\n", first.0, last.0));
        }

        summary.push_str("\nSites observed per year:\n");
        for (year, count) in &self.years {
            summary.push_str(&format!("  {}: {}\n", year, count));
        }

        summary
    }
}
