use crate::error::{ProcessingError, Result};
use crate::models::{ColumnLabel, RawTable, RowBlock};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Concatenated table plus the number of rows each block contributed.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub table: RawTable,
    pub block_rows: Vec<(RowBlock, usize)>,
}

pub struct SpreadsheetReader {
    sheet_index: usize,
}

impl SpreadsheetReader {
    pub fn new() -> Self {
        Self { sheet_index: 0 }
    }

    /// Open a workbook (xls, xlsx, xlsb or ods) and load its first sheet
    pub fn read_workbook(&self, path: &Path) -> Result<Range<Data>> {
        let mut workbook = open_workbook_auto(path)?;

        let range = workbook
            .worksheet_range_at(self.sheet_index)
            .ok_or_else(|| {
                ProcessingError::MissingData(format!(
                    "Sheet {} not found in '{}'",
                    self.sheet_index,
                    path.display()
                ))
            })??;

        debug!(
            "Loaded sheet {} of {} ({} rows x {} columns)",
            self.sheet_index,
            path.display(),
            range.height(),
            range.width()
        );

        Ok(range)
    }

    /// Read every block as its own table and stack them in order
    pub fn read_blocks(&self, range: &Range<Data>, blocks: &[RowBlock]) -> Result<Extraction> {
        let mut tables = Vec::with_capacity(blocks.len());
        let mut block_rows = Vec::with_capacity(blocks.len());

        for block in blocks {
            let table = self.read_block(range, block)?;
            debug!("Read {} rows from block {}", table.row_count(), block);
            block_rows.push((*block, table.row_count()));
            tables.push(table);
        }

        Ok(Extraction {
            table: RawTable::concat(tables),
            block_rows,
        })
    }

    /// Read one block: its header row labels the columns, its data rows
    /// become table rows. Rows past the end of the sheet are not read.
    pub fn read_block(&self, range: &Range<Data>, block: &RowBlock) -> Result<RawTable> {
        block.validate()?;

        let (last_row, last_col) = range
            .end()
            .ok_or_else(|| ProcessingError::MissingData("Worksheet is empty".to_string()))?;
        let width = last_col as usize + 1;

        let header_row = block.header_index();
        let labels = (0..width)
            .map(|col| header_label(cell_at(range, header_row, col), col))
            .collect();

        let mut table = RawTable::new(dedup_labels(labels));
        for row in block.data_indices().filter(|&row| row <= last_row) {
            let cells = (0..width)
                .map(|col| cell_at(range, row, col).clone())
                .collect();
            table.push_row(cells);
        }

        Ok(table)
    }
}

impl Default for SpreadsheetReader {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_at(range: &Range<Data>, row: u32, col: usize) -> &Data {
    range.get_value((row, col as u32)).unwrap_or(&Data::Empty)
}

/// Label for a header cell. Blank headers are named after their 0-based
/// column position.
pub fn header_label(cell: &Data, column: usize) -> ColumnLabel {
    match cell {
        Data::Empty => unnamed(column),
        Data::String(s) if s.is_empty() => unnamed(column),
        Data::String(s) => ColumnLabel::Name(s.clone()),
        Data::Int(i) => i32::try_from(*i)
            .map(ColumnLabel::Year)
            .unwrap_or_else(|_| ColumnLabel::Name(i.to_string())),
        Data::Float(f) if f.fract() == 0.0 && f.abs() <= i32::MAX as f64 => {
            ColumnLabel::Year(*f as i32)
        }
        other => ColumnLabel::Name(other.to_string()),
    }
}

fn unnamed(column: usize) -> ColumnLabel {
    ColumnLabel::Name(format!("Unnamed: {}", column))
}

/// Make repeated labels unique by suffixing `.1`, `.2`, ... to each repeat
pub fn dedup_labels(labels: Vec<ColumnLabel>) -> Vec<ColumnLabel> {
    let mut counts: HashMap<ColumnLabel, usize> = HashMap::new();
    let mut unique = Vec::with_capacity(labels.len());

    for mut label in labels {
        let mut current = counts.get(&label).copied().unwrap_or(0);
        while current > 0 {
            counts.insert(label.clone(), current + 1);
            label = ColumnLabel::Name(format!("{}.{}", label, current));
            current = counts.get(&label).copied().unwrap_or(0);
        }
        counts.insert(label.clone(), current + 1);
        unique.push(label);
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Sheet with a title row and two blocks, each under its own header
    fn sample_sheet() -> Range<Data> {
        let mut range = Range::new((0, 0), (7, 4));
        range.set_value((0, 0), Data::String("CALM Summary".into()));

        range.set_value((1, 2), Data::String("LAT".into()));
        range.set_value((1, 3), Data::Float(2000.0));
        range.set_value((1, 4), Data::String("###".into()));
        range.set_value((2, 0), Data::String("U1".into()));
        range.set_value((2, 1), Data::String("Barrow".into()));
        range.set_value((2, 2), Data::Float(71.3));
        range.set_value((2, 3), Data::Float(30.0));
        range.set_value((3, 0), Data::String("U2".into()));

        range.set_value((5, 2), Data::String("LAT".into()));
        range.set_value((5, 3), Data::Int(2001));
        range.set_value((6, 0), Data::String("R1".into()));
        range.set_value((6, 3), Data::String("*45".into()));
        range
    }

    #[test]
    fn test_read_single_block() {
        let range = sample_sheet();
        let reader = SpreadsheetReader::new();

        let table = reader.read_block(&range, &RowBlock::new(3, 4)).unwrap();

        assert_eq!(
            table.columns(),
            &[
                ColumnLabel::name("Unnamed: 0"),
                ColumnLabel::name("Unnamed: 1"),
                ColumnLabel::name("LAT"),
                ColumnLabel::Year(2000),
                ColumnLabel::name("###"),
            ]
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, 1), &Data::String("Barrow".into()));
        assert_eq!(table.cell(1, 2), &Data::Empty);
    }

    #[test]
    fn test_read_blocks_concatenates() {
        let range = sample_sheet();
        let reader = SpreadsheetReader::new();
        let blocks = [RowBlock::new(3, 4), RowBlock::new(7, 7)];

        let extraction = reader.read_blocks(&range, &blocks).unwrap();

        assert_eq!(extraction.table.row_count(), 3);
        assert_eq!(extraction.block_rows, vec![(blocks[0], 2), (blocks[1], 1)]);
        // 2001 from the second header is appended after the first block's columns
        let idx_2001 = extraction
            .table
            .column_index(&ColumnLabel::Year(2001))
            .unwrap();
        assert_eq!(idx_2001, 5);
        assert_eq!(extraction.table.cell(2, idx_2001), &Data::String("*45".into()));
        assert_eq!(extraction.table.cell(0, idx_2001), &Data::Empty);
    }

    #[test]
    fn test_rows_past_sheet_end_are_skipped() {
        let range = sample_sheet();
        let table = SpreadsheetReader::new()
            .read_block(&range, &RowBlock::new(7, 20))
            .unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_empty_sheet_is_an_error() {
        let range: Range<Data> = Range::empty();
        let result = SpreadsheetReader::new().read_block(&range, &RowBlock::new(2, 3));
        assert!(matches!(result, Err(ProcessingError::MissingData(_))));
    }

    #[test]
    fn test_header_labels() {
        assert_eq!(header_label(&Data::Float(1990.0), 3), ColumnLabel::Year(1990));
        assert_eq!(header_label(&Data::Int(1991), 3), ColumnLabel::Year(1991));
        assert_eq!(header_label(&Data::Float(1.5), 3), ColumnLabel::name("1.5"));
        assert_eq!(header_label(&Data::Empty, 4), ColumnLabel::name("Unnamed: 4"));
        assert_eq!(
            header_label(&Data::String("1990".into()), 0),
            ColumnLabel::name("1990")
        );
    }

    #[test]
    fn test_dedup_labels() {
        let labels = vec![
            ColumnLabel::name("###"),
            ColumnLabel::name("###"),
            ColumnLabel::Year(1996),
            ColumnLabel::name("###"),
            ColumnLabel::Year(1996),
        ];

        assert_eq!(
            dedup_labels(labels),
            vec![
                ColumnLabel::name("###"),
                ColumnLabel::name("###.1"),
                ColumnLabel::Year(1996),
                ColumnLabel::name("###.2"),
                ColumnLabel::name("1996.1"),
            ]
        );
    }
}
