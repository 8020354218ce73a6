//! Date arithmetic on the 365-day ("noleap") calendar used for the time axis.

use std::fmt;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{DAYS_PER_YEAR, EPOCH_YEAR};

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const SECONDS_PER_DAY: f64 = 86_400.0;

/// A timestamp on the no-leap calendar, to second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NoLeapDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub second_of_day: u32,
}

impl NoLeapDateTime {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ProcessingError::InvalidFormat(format!(
                "Month {} out of range",
                month
            )));
        }
        if day == 0 || day > DAYS_IN_MONTH[(month - 1) as usize] {
            return Err(ProcessingError::InvalidFormat(format!(
                "Day {} out of range for month {}",
                day, month
            )));
        }

        Ok(Self {
            year,
            month,
            day,
            second_of_day: 0,
        })
    }

    /// January 1st, midnight
    pub fn start_of_year(year: i32) -> Self {
        Self {
            year,
            month: 1,
            day: 1,
            second_of_day: 0,
        }
    }

    /// Days since 1850-01-01 00:00
    pub fn days_since_epoch(&self) -> f64 {
        let whole_days = (self.year - EPOCH_YEAR) as i64 * DAYS_PER_YEAR as i64
            + self.day_of_year() as i64;
        whole_days as f64 + self.second_of_day as f64 / SECONDS_PER_DAY
    }

    /// Inverse of [`days_since_epoch`](Self::days_since_epoch), rounded to the nearest second
    pub fn from_days_since_epoch(days: f64) -> Result<Self> {
        if !days.is_finite() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Non-finite time value {}",
                days
            )));
        }

        let total_seconds = (days * SECONDS_PER_DAY).round() as i64;
        let seconds_per_year = DAYS_PER_YEAR as i64 * SECONDS_PER_DAY as i64;
        let year_offset = total_seconds.div_euclid(seconds_per_year);
        let seconds_in_year = total_seconds.rem_euclid(seconds_per_year);

        let mut day_of_year = (seconds_in_year / SECONDS_PER_DAY as i64) as u32;
        let second_of_day = (seconds_in_year % SECONDS_PER_DAY as i64) as u32;

        let mut month = 1;
        for length in DAYS_IN_MONTH {
            if day_of_year < length {
                break;
            }
            day_of_year -= length;
            month += 1;
        }

        Ok(Self {
            year: EPOCH_YEAR + year_offset as i32,
            month,
            day: day_of_year + 1,
            second_of_day,
        })
    }

    /// 0-based day within the year
    pub fn day_of_year(&self) -> u32 {
        DAYS_IN_MONTH[..(self.month - 1) as usize].iter().sum::<u32>() + self.day - 1
    }
}

impl fmt::Display for NoLeapDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year,
            self.month,
            self.day,
            self.second_of_day / 3600,
            (self.second_of_day % 3600) / 60,
            self.second_of_day % 60
        )
    }
}
