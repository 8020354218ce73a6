//! Turns raw spreadsheet cells into typed site records and yearly values.

use calamine::Data;
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::models::{CleanTable, RawTable, SiteRecord};
use crate::utils::constants::{
    COL_LATITUDE, COL_LONGITUDE, COL_METHOD, COL_SITE_CODE, COL_SITE_NAME, DECORATION_CHARS,
    MISSING_SENTINELS,
};

/// How a year cell was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOutcome {
    /// Numeric cell
    Number,
    /// Text with `*`, `<` or `>` marks around a number
    Decorated,
    /// `-` or `inactive`
    Sentinel,
    /// Empty cell, whitespace, a bare decoration, or an error cell like `#N/A`
    Blank,
    /// Plain numeric text
    ParsedText,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanedCell {
    pub value: Option<f64>,
    pub outcome: CellOutcome,
}

impl CleanedCell {
    fn new(value: Option<f64>, outcome: CellOutcome) -> Self {
        Self { value, outcome }
    }
}

/// Tally of cell outcomes over every year cell of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningStats {
    pub numbers: usize,
    pub decorated: usize,
    pub sentinels: usize,
    pub blanks: usize,
    pub parsed_text: usize,
}

impl CleaningStats {
    fn record(&mut self, outcome: CellOutcome) {
        match outcome {
            CellOutcome::Number => self.numbers += 1,
            CellOutcome::Decorated => self.decorated += 1,
            CellOutcome::Sentinel => self.sentinels += 1,
            CellOutcome::Blank => self.blanks += 1,
            CellOutcome::ParsedText => self.parsed_text += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.numbers + self.decorated + self.sentinels + self.blanks + self.parsed_text
    }

    pub fn missing(&self) -> usize {
        self.sentinels + self.blanks
    }
}

/// Interpret one year cell. `None` means the cell holds something that is
/// neither a value nor a recognised missing marker.
pub fn clean_cell(cell: &Data) -> Option<CleanedCell> {
    match cell {
        Data::Empty => Some(CleanedCell::new(None, CellOutcome::Blank)),
        Data::Int(i) => Some(CleanedCell::new(Some(*i as f64), CellOutcome::Number)),
        Data::Float(f) if f.is_finite() => Some(CleanedCell::new(Some(*f), CellOutcome::Number)),
        Data::String(s) => clean_text(s),
        Data::Error(_) => Some(CleanedCell::new(None, CellOutcome::Blank)),
        _ => None,
    }
}

fn clean_text(text: &str) -> Option<CleanedCell> {
    let trimmed = text.trim();
    if MISSING_SENTINELS.contains(&trimmed) {
        return Some(CleanedCell::new(None, CellOutcome::Sentinel));
    }

    let stripped: String = trimmed
        .chars()
        .filter(|c| !DECORATION_CHARS.contains(c))
        .collect();
    let stripped = stripped.trim();

    if stripped.is_empty() || stripped.eq_ignore_ascii_case("nan") {
        return Some(CleanedCell::new(None, CellOutcome::Blank));
    }

    let value: f64 = stripped.parse().ok().filter(|v: &f64| v.is_finite())?;
    let outcome = if stripped.len() == trimmed.len() {
        CellOutcome::ParsedText
    } else {
        CellOutcome::Decorated
    };

    Some(CleanedCell::new(Some(value), outcome))
}

/// Display text of an identity cell. Integral numbers lose their `.0`.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{:.0}", f),
        other => other.to_string(),
    }
}

/// Parse a coordinate cell; blank and error cells are NaN
fn coordinate(cell: &Data, site: &str, column: &str) -> Result<f64> {
    let invalid = || {
        ProcessingError::InvalidFormat(format!(
            "Non-numeric {} '{}' for site '{}'",
            column, cell, site
        ))
    };

    match cell {
        Data::Empty | Data::Error(_) => Ok(f64::NAN),
        Data::Float(f) => Ok(*f),
        Data::Int(i) => Ok(*i as f64),
        Data::String(s) if s.trim().is_empty() => Ok(f64::NAN),
        Data::String(s) => s.trim().parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

pub struct CellCleaner;

impl CellCleaner {
    pub fn new() -> Self {
        Self
    }

    /// Build the typed site-by-year table. Every year column is kept, in
    /// ascending order; any cell that cannot be interpreted aborts.
    pub fn clean(&self, table: &RawTable) -> Result<(CleanTable, CleaningStats)> {
        let code_col = table.require_column(COL_SITE_CODE)?;
        let name_col = table.require_column(COL_SITE_NAME)?;
        let lat_col = table.require_column(COL_LATITUDE)?;
        let lon_col = table.require_column(COL_LONGITUDE)?;
        let method_col = table.require_column(COL_METHOD).ok();

        let year_columns = table.year_columns();
        let mut stats = CleaningStats::default();
        let mut sites = Vec::with_capacity(table.row_count());
        let mut values = Vec::with_capacity(table.row_count());

        for row in 0..table.row_count() {
            let code = cell_text(table.cell(row, code_col));
            let name = cell_text(table.cell(row, name_col));
            let method = method_col
                .map(|col| cell_text(table.cell(row, col)))
                .filter(|m| !m.is_empty());

            let latitude = coordinate(table.cell(row, lat_col), &code, COL_LATITUDE)?;
            let longitude = coordinate(table.cell(row, lon_col), &code, COL_LONGITUDE)?;

            let mut row_values = Vec::with_capacity(year_columns.len());
            for &(year, col) in &year_columns {
                let cell = table.cell(row, col);
                let cleaned = clean_cell(cell).ok_or_else(|| ProcessingError::InvalidCell {
                    site: code.clone(),
                    year,
                    value: cell.to_string(),
                })?;
                stats.record(cleaned.outcome);
                row_values.push(cleaned.value);
            }

            sites.push(SiteRecord::new(code, name, latitude, longitude).with_method(method));
            values.push(row_values);
        }

        let clean = CleanTable {
            years: year_columns.iter().map(|(year, _)| *year).collect(),
            sites,
            values,
        };

        Ok((clean, stats))
    }
}

impl Default for CellCleaner {
    fn default() -> Self {
        Self::new()
    }
}
