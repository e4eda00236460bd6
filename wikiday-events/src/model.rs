use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InvalidMonthDay;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A historical event: the day it happened and what happened.
///
/// Dates use proleptic Gregorian, astronomical year numbering, so 44 BC is
/// year `-43`. `Display` renders `"<date> - <description>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    date: NaiveDate,
    description: String,
}

impl Event {
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            date,
            description: description.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.date, self.description)
    }
}

/// Month of year and day of month, independent of any year.
///
/// Only the ranges are checked (month 1-12, day 1-31). Whether the day exists
/// in that month is left to the remote page, so `February 30` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Result<Self, InvalidMonthDay> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(InvalidMonthDay { month, day });
        }
        Ok(Self { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Full English month name, e.g. `"March"`.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Wikipedia page title, e.g. `"March_14"`.
    pub fn page_title(&self) -> String {
        format!("{}_{}", self.month_name(), self.day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.day)
    }
}

/// Month number for a full English month name, ignoring case.
pub fn month_from_name(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name.trim()))
        .map(|idx| idx as u32 + 1)
}
