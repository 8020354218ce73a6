use tracing::debug;

use crate::models::{ColumnLabel, RawTable};
use crate::utils::constants::{NAME_RENAMES, YEAR_RENAMES};

/// Renames positional and placeholder headers to their canonical labels.
pub struct ColumnNormalizer {
    renames: Vec<(ColumnLabel, ColumnLabel)>,
}

impl ColumnNormalizer {
    pub fn new() -> Self {
        let names = NAME_RENAMES
            .iter()
            .map(|(from, to)| (ColumnLabel::name(*from), ColumnLabel::name(*to)));
        let years = YEAR_RENAMES
            .iter()
            .map(|(from, year)| (ColumnLabel::name(*from), ColumnLabel::Year(*year)));

        Self {
            renames: names.chain(years).collect(),
        }
    }

    /// Apply every rename present in the table, returning how many applied
    pub fn normalize(&self, table: &mut RawTable) -> usize {
        let mut applied = 0;

        for (from, to) in &self.renames {
            if table.rename_column(from, to.clone()) {
                debug!("Renamed column '{}' to '{}'", from, to);
                applied += 1;
            }
        }

        applied
    }
}

impl Default for ColumnNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
