use serde::{Deserialize, Serialize};

use crate::models::{CleanTable, RowBlock, SiteRecord};
use crate::processors::cell_cleaner::CleaningStats;
use crate::processors::site_corrector::LatitudeCorrection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCount {
    pub first: u32,
    pub last: u32,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub observed_sites: usize,
}

/// What the extract and clean stages did to the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub blocks: Vec<BlockCount>,
    pub extracted_rows: usize,
    pub cells: CleaningStats,
    pub dropped_sites: Vec<String>,
    pub retained_sites: usize,
    pub years: Vec<YearCount>,
    pub latitude_correction: Option<LatitudeCorrection>,
}

impl CleaningReport {
    pub fn new(
        block_rows: &[(RowBlock, usize)],
        cells: CleaningStats,
        latitude_correction: Option<LatitudeCorrection>,
        dropped: &[SiteRecord],
        retained: &CleanTable,
    ) -> Self {
        let blocks: Vec<BlockCount> = block_rows
            .iter()
            .map(|(block, rows)| BlockCount {
                first: block.first,
                last: block.last,
                rows: *rows,
            })
            .collect();

        let years = retained
            .years
            .iter()
            .zip(retained.observations_per_year())
            .map(|(&year, observed_sites)| YearCount {
                year,
                observed_sites,
            })
            .collect();

        Self {
            extracted_rows: blocks.iter().map(|b| b.rows).sum(),
            blocks,
            cells,
            dropped_sites: dropped.iter().map(|s| s.code.clone()).collect(),
            retained_sites: retained.site_count(),
            years,
            latitude_correction,
        }
    }

    /// Blocks that yielded fewer rows than they span
    pub fn short_blocks(&self) -> Vec<&BlockCount> {
        self.blocks
            .iter()
            .filter(|b| b.rows < (b.last - b.first + 1) as usize)
            .collect()
    }

    /// Years kept on the time axis without a single observation
    pub fn empty_years(&self) -> Vec<i32> {
        self.years
            .iter()
            .filter(|y| y.observed_sites == 0)
            .map(|y| y.year)
            .collect()
    }

    pub fn year_span(&self) -> Option<(i32, i32)> {
        Some((self.years.first()?.year, self.years.last()?.year))
    }

    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Cleaning Report ===\n");
        summary.push_str(&format!(
            "Extracted Rows: {} from {} blocks\n",
            self.extracted_rows,
            self.blocks.len()
        ));
        for block in &self.blocks {
            summary.push_str(&format!(
                "  rows {:>3}-{:<3}: {} rows\n",
                block.first, block.last, block.rows
            ));
        }

        let short = self.short_blocks();
        if !short.is_empty() {
            summary.push_str(&format!(
                "Short Blocks: {} (sheet ends before the block does)\n",
                short.len()
            ));
        }

        summary.push_str(&format!("\nYear Cells: {}\n", self.cells.total()));
        summary.push_str(&format!("  numeric: {}\n", self.cells.numbers));
        summary.push_str(&format!("  numeric text: {}\n", self.cells.parsed_text));
        summary.push_str(&format!("  decorated: {}\n", self.cells.decorated));
        summary.push_str(&format!("  sentinel: {}\n", self.cells.sentinels));
        summary.push_str(&format!("  blank: {}\n", self.cells.blanks));

        summary.push_str(&format!(
            "\nRetained Sites: {} (dropped {})\n",
            self.retained_sites,
            self.dropped_sites.len()
        ));
        if !self.dropped_sites.is_empty() {
            summary.push_str(&format!("  dropped: {}\n", self.dropped_sites.join(", ")));
        }

        if let Some((start, end)) = self.year_span() {
            summary.push_str(&format!("Years: {}-{} ({})\n", start, end, self.years.len()));
        }
        let empty = self.empty_years();
        if !empty.is_empty() {
            let listed: Vec<String> = empty.iter().map(|y| y.to_string()).collect();
            summary.push_str(&format!("Years with no data: {}\n", listed.join(", ")));
        }

        match &self.latitude_correction {
            Some(fix) => summary.push_str(&format!(
                "\nLatitude Correction: {} {} -> {}\n",
                fix.site, fix.original, fix.corrected
            )),
            None => summary.push_str("\nLatitude Correction: not needed\n"),
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report() -> CleaningReport {
        let retained = CleanTable {
            years: vec![2000, 2001],
            sites: vec![SiteRecord::new("A".into(), "Alpha".into(), 70.0, 0.0)],
            values: vec![vec![Some(1.0), None]],
        };
        let dropped = vec![SiteRecord::new("B".into(), "Beta".into(), 70.0, 0.0)];
        let cells = CleaningStats {
            numbers: 1,
            sentinels: 2,
            blanks: 1,
            ..CleaningStats::default()
        };

        CleaningReport::new(
            &[(RowBlock::new(3, 4), 2), (RowBlock::new(7, 9), 1)],
            cells,
            None,
            &dropped,
            &retained,
        )
    }

    #[test]
    fn test_report_counts() {
        let report = report();

        assert_eq!(report.extracted_rows, 3);
        assert_eq!(report.retained_sites, 1);
        assert_eq!(report.dropped_sites, vec!["B".to_string()]);
        assert_eq!(report.empty_years(), vec![2001]);
        assert_eq!(report.year_span(), Some((2000, 2001)));
        assert_eq!(report.short_blocks().len(), 1);
    }

    #[test]
    fn test_summary_text() {
        let summary = report().generate_summary();

        assert!(summary.contains("Extracted Rows: 3 from 2 blocks"));
        assert!(summary.contains("Years with no data: 2001"));
        assert!(summary.contains("Latitude Correction: not needed"));
        assert!(summary.contains("dropped: B"));
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["extracted_rows"], 3);
        assert_eq!(json["years"][0]["year"], 2000);
        assert!(json["latitude_correction"].is_null());
    }
}
