//! Date windows used to scope ledgers and reports.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Returns the three-letter English abbreviation for a 1-based month.
pub fn month_abbrev(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_ABBREVIATIONS.get(idx as usize))
        .copied()
        .unwrap_or("???")
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Restricts a ledger to one calendar month or an inclusive date range.
pub enum LedgerWindow {
    Month {
        year: i32,
        month: u32,
    },
    Range {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl LedgerWindow {
    pub fn month(year: i32, month: u32) -> Result<Self, WindowError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(WindowError::InvalidMonth { year, month });
        }
        Ok(LedgerWindow::Month { year, month })
    }

    /// Builds the month window containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        LedgerWindow::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Builds an inclusive range; either bound may be open.
    pub fn range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, WindowError> {
        if let (Some(start), Some(end)) = (from, to) {
            if start > end {
                return Err(WindowError::InvalidRange);
            }
        }
        Ok(LedgerWindow::Range { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            LedgerWindow::Month { year, month } => date.year() == year && date.month() == month,
            LedgerWindow::Range { from, to } => {
                from.map_or(true, |start| date >= start) && to.map_or(true, |end| date <= end)
            }
        }
    }

    pub fn label(&self) -> String {
        match *self {
            LedgerWindow::Month { year, month } => format!("{} {}", month_abbrev(month), year),
            LedgerWindow::Range { from, to } => match (from, to) {
                (Some(start), Some(end)) => format!("{start} to {end}"),
                (Some(start), None) => format!("from {start}"),
                (None, Some(end)) => format!("until {end}"),
                (None, None) => "all time".into(),
            },
        }
    }
}

impl fmt::Display for LedgerWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`LedgerWindow`] values.
pub enum WindowError {
    InvalidMonth { year: i32, month: u32 },
    InvalidRange,
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::InvalidMonth { year, month } => {
                write!(f, "invalid month {year}-{month:02}")
            }
            WindowError::InvalidRange => f.write_str("window start must not be after its end"),
        }
    }
}

impl std::error::Error for WindowError {}
