use crate::error::{ProcessingError, Result};
use crate::utils::calendar::NoLeapDateTime;

/// Yearly time coordinate: each year spans [Jan 1, Jan 1 of the next year)
/// and is stamped at the midpoint of that interval.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub years: Vec<i32>,
    /// Days since 1850-01-01, no-leap calendar
    pub time: Vec<f64>,
    pub bounds: Vec<[f64; 2]>,
}

impl TimeAxis {
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

pub struct TemporalFramer;

impl TemporalFramer {
    pub fn new() -> Self {
        Self
    }

    /// Build the axis for strictly ascending years; gaps are preserved.
    pub fn frame(&self, years: &[i32]) -> Result<TimeAxis> {
        if years.is_empty() {
            return Err(ProcessingError::MissingData(
                "No year columns to build a time axis from".to_string(),
            ));
        }
        if let Some(pair) = years.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ProcessingError::InvalidFormat(format!(
                "Years must be strictly ascending, found {} before {}",
                pair[0], pair[1]
            )));
        }

        let bounds: Vec<[f64; 2]> = years
            .iter()
            .map(|&year| {
                [
                    NoLeapDateTime::start_of_year(year).days_since_epoch(),
                    NoLeapDateTime::start_of_year(year + 1).days_since_epoch(),
                ]
            })
            .collect();
        let time = bounds
            .iter()
            .map(|[start, end]| start + 0.5 * (end - start))
            .collect();

        Ok(TimeAxis {
            years: years.to_vec(),
            time,
            bounds,
        })
    }
}

impl Default for TemporalFramer {
    fn default() -> Self {
        Self::new()
    }
}
