use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A report period: one calendar month.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Month must be 1-12, got {}", month));
        }
        Ok(Self { year, month })
    }

    /// The month containing today, in local time.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn month_name(&self) -> &'static str {
        match self.month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Parse a period selector: `this`, `last`, `YYYY-MM` or `M/YYYY`.
pub fn parse_period(input: &str) -> Result<Period> {
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "this" | "current" => return Ok(Period::current()),
        "last" | "previous" => return Ok(Period::current().previous()),
        _ => {}
    }

    if let Some((year_str, month_str)) = input.split_once('-') {
        let year: i32 = year_str.parse().map_err(|_| anyhow!("Invalid year: '{}'", year_str))?;
        let month: u32 = month_str.parse().map_err(|_| anyhow!("Invalid month: '{}'", month_str))?;
        return Period::new(year, month);
    }

    if let Some((month_str, year_str)) = input.split_once('/') {
        let month: u32 = month_str.parse().map_err(|_| anyhow!("Invalid month: '{}'", month_str))?;
        let year: i32 = year_str.parse().map_err(|_| anyhow!("Invalid year: '{}'", year_str))?;
        return Period::new(year, month);
    }

    Err(anyhow!("Could not parse period: '{}' (expected YYYY-MM, M/YYYY, 'this' or 'last')", input))
}

/// Parse an entry date: `today`, `yesterday` or `YYYY-MM-DD`.
pub fn parse_entry_date(input: &str) -> Result<NaiveDate> {
    let today = Local::now().date_naive();

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yest" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| anyhow!("Could not parse date: '{}' (expected YYYY-MM-DD, 'today' or 'yesterday')", input))
}
