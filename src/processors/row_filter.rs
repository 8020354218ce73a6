use tracing::debug;

use crate::models::{CleanTable, SiteRecord};

/// Drops sites with no value in any year.
pub struct RowFilter;

impl RowFilter {
    pub fn new() -> Self {
        Self
    }

    /// Returns the retained table and the dropped sites, both in their
    /// original order. Year columns are never removed.
    pub fn filter(&self, table: CleanTable) -> (CleanTable, Vec<SiteRecord>) {
        let CleanTable {
            years,
            sites,
            values,
        } = table;

        let mut kept_sites = Vec::with_capacity(sites.len());
        let mut kept_values = Vec::with_capacity(values.len());
        let mut dropped = Vec::new();

        for (site, row) in sites.into_iter().zip(values) {
            if row.iter().any(Option::is_some) {
                kept_sites.push(site);
                kept_values.push(row);
            } else {
                debug!("Dropping site '{}' with no observations", site.code);
                dropped.push(site);
            }
        }

        let filtered = CleanTable {
            years,
            sites: kept_sites,
            values: kept_values,
        };

        (filtered, dropped)
    }
}

impl Default for RowFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn site(code: &str) -> SiteRecord {
        SiteRecord::new(code.to_string(), code.to_lowercase(), 70.0, 0.0)
    }

    #[test]
    fn test_all_missing_rows_are_dropped_in_order() {
        let table = CleanTable {
            years: vec![2000, 2001],
            sites: vec![site("A"), site("B"), site("C"), site("D")],
            values: vec![
                vec![Some(1.0), None],
                vec![None, None],
                vec![None, Some(3.0)],
                vec![None, None],
            ],
        };

        let (filtered, dropped) = RowFilter::new().filter(table);

        let codes: Vec<&str> = filtered.sites.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "C"]);
        assert_eq!(filtered.values, vec![vec![Some(1.0), None], vec![None, Some(3.0)]]);
        assert_eq!(filtered.years, vec![2000, 2001]);
        assert_eq!(dropped.len(), 2);
        assert_eq!(dropped[1].code, "D");
    }

    #[test]
    fn test_year_with_no_values_is_kept() {
        let table = CleanTable {
            years: vec![2000, 2001],
            sites: vec![site("A")],
            values: vec![vec![Some(1.0), None]],
        };

        let (filtered, dropped) = RowFilter::new().filter(table);

        assert_eq!(filtered.years, vec![2000, 2001]);
        assert_eq!(filtered.observations_per_year(), vec![1, 0]);
        assert!(dropped.is_empty());
    }
}
