use calamine::Data;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{ProcessingError, Result};
use crate::models::SiteRecord;
use crate::utils::constants::HEADER_ROW_OFFSET;

/// A contiguous run of data rows in the worksheet, given as 1-based row
/// numbers of the first and last data row. The block's header sits
/// `HEADER_ROW_OFFSET` rows above `first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowBlock {
    pub first: u32,
    pub last: u32,
}

impl RowBlock {
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    pub fn validate(&self) -> Result<()> {
        if self.first <= HEADER_ROW_OFFSET {
            return Err(ProcessingError::InvalidFormat(format!(
                "Block starting at row {} leaves no room for a header row",
                self.first
            )));
        }
        if self.last < self.first {
            return Err(ProcessingError::InvalidFormat(format!(
                "Block ends at row {} before it starts at row {}",
                self.last, self.first
            )));
        }
        Ok(())
    }

    /// 0-based worksheet index of the header row
    pub fn header_index(&self) -> u32 {
        self.first - HEADER_ROW_OFFSET - 1
    }

    /// 0-based worksheet indices of the data rows
    pub fn data_indices(&self) -> RangeInclusive<u32> {
        (self.first - 1)..=(self.last - 1)
    }

    pub fn len(&self) -> usize {
        (self.last - self.first + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }
}

impl fmt::Display for RowBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rows {}-{}", self.first, self.last)
    }
}

/// Column header as read from the sheet. Integral numeric headers are
/// observation years, everything else is a named field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnLabel {
    Year(i32),
    Name(String),
}

impl ColumnLabel {
    pub fn name(name: impl Into<String>) -> Self {
        ColumnLabel::Name(name.into())
    }

    pub fn as_year(&self) -> Option<i32> {
        match self {
            ColumnLabel::Year(year) => Some(*year),
            ColumnLabel::Name(_) => None,
        }
    }

    pub fn is_year(&self) -> bool {
        matches!(self, ColumnLabel::Year(_))
    }
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnLabel::Year(year) => write!(f, "{}", year),
            ColumnLabel::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Untyped rows of spreadsheet cells under a set of column labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<ColumnLabel>,
    rows: Vec<Vec<Data>>,
}

impl RawTable {
    pub fn new(columns: Vec<ColumnLabel>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding with empty cells or truncating to the column count
    pub fn push_row(&mut self, mut row: Vec<Data>) {
        row.resize(self.columns.len(), Data::Empty);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[ColumnLabel] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Data>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, label: &ColumnLabel) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(&ColumnLabel::name(name))
            .ok_or_else(|| ProcessingError::MissingColumn(name.to_string()))
    }

    pub fn cell(&self, row: usize, column: usize) -> &Data {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&Data::Empty)
    }

    /// Year columns as (year, column index), ordered by year
    pub fn year_columns(&self) -> Vec<(i32, usize)> {
        let mut years: Vec<(i32, usize)> = self
            .columns
            .iter()
            .enumerate()
            .filter_map(|(idx, label)| label.as_year().map(|year| (year, idx)))
            .collect();
        years.sort_by_key(|(year, _)| *year);
        years
    }

    /// Relabel a column. When the new label already exists, the two columns
    /// are merged, keeping the existing cell wherever it is non-empty.
    /// Returns false when `from` is not present.
    pub fn rename_column(&mut self, from: &ColumnLabel, to: ColumnLabel) -> bool {
        let Some(source) = self.column_index(from) else {
            return false;
        };

        match self.column_index(&to) {
            Some(target) if target != source => {
                for row in &mut self.rows {
                    let cell = std::mem::take(&mut row[source]);
                    if row[target] == Data::Empty {
                        row[target] = cell;
                    }
                    row.remove(source);
                }
                self.columns.remove(source);
            }
            _ => self.columns[source] = to,
        }

        true
    }

    /// Stack tables vertically. Columns are the union of all labels in order
    /// of first appearance; cells a table lacks are left empty.
    pub fn concat(tables: Vec<RawTable>) -> RawTable {
        let mut columns: Vec<ColumnLabel> = Vec::new();
        for table in &tables {
            for label in &table.columns {
                if !columns.contains(label) {
                    columns.push(label.clone());
                }
            }
        }

        let mut combined = RawTable::new(columns);
        for table in tables {
            let mapping: Vec<usize> = table
                .columns
                .iter()
                .filter_map(|label| combined.column_index(label))
                .collect();

            for row in table.rows {
                let mut combined_row = vec![Data::Empty; combined.columns.len()];
                for (cell, &target) in row.into_iter().zip(mapping.iter()) {
                    combined_row[target] = cell;
                }
                combined.rows.push(combined_row);
            }
        }

        combined
    }
}

/// Typed site-by-year table after cleaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanTable {
    /// Observation years, ascending
    pub years: Vec<i32>,
    pub sites: Vec<SiteRecord>,
    /// One row per site, one entry per year
    pub values: Vec<Vec<Option<f64>>>,
}

impl CleanTable {
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn year_count(&self) -> usize {
        self.years.len()
    }

    pub fn is_row_missing(&self, row: usize) -> bool {
        self.values
            .get(row)
            .map_or(true, |values| values.iter().all(Option::is_none))
    }

    /// Number of sites with a value, per year
    pub fn observations_per_year(&self) -> Vec<usize> {
        (0..self.years.len())
            .map(|col| {
                self.values
                    .iter()
                    .filter(|row| row.get(col).copied().flatten().is_some())
                    .count()
            })
            .collect()
    }

    pub fn value(&self, row: usize, year: i32) -> Option<f64> {
        let col = self.years.iter().position(|&y| y == year)?;
        self.values.get(row)?.get(col).copied().flatten()
    }
}
