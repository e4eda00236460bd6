//! Turns one Events line, e.g. `"44 BC – Julius Caesar is assassinated"`, into an
//! [`Event`] dated on the requested month/day.
//!
//! Year tokens are a numeral with an optional era on either side: `1969`,
//! `AD 1066`, `450 BC`. Eras are a closed set ([`Era`]), matched case-sensitively.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::MalformedEntryError;
use crate::model::{Event, MonthDay};

/// Space, en dash (U+2013), space.
pub const SEPARATOR: &str = " \u{2013} ";

static RE_YEAR_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<pre>[A-Za-z]+)\s+)?(?P<year>[0-9]{1,9})(?:\s+(?P<post>[A-Za-z]+))?$")
        .expect("invalid regex: year token")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Era {
    /// BC / BCE
    BeforeCommon,
    /// AD / CE, also implied by a bare numeral
    Common,
}

impl Era {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "BC" | "BCE" => Some(Era::BeforeCommon),
            "AD" | "CE" => Some(Era::Common),
            _ => None,
        }
    }

    /// Proleptic (astronomical) year for a year-of-era: 1 BC is 0, 44 BC is -43.
    pub fn proleptic_year(self, year_of_era: i32) -> i32 {
        match self {
            Era::Common => year_of_era,
            Era::BeforeCommon => 1 - year_of_era,
        }
    }
}

/// Parse a year token into a proleptic year.
///
/// ```
/// use wikiday_events::parser::parse_year;
///
/// assert_eq!(parse_year("1969"), Ok(1969));
/// assert_eq!(parse_year("AD 1066"), Ok(1066));
/// assert_eq!(parse_year("44 BC"), Ok(-43));
/// assert!(parse_year("c. 1000").is_err());
/// ```
pub fn parse_year(token: &str) -> Result<i32, MalformedEntryError> {
    let invalid = || MalformedEntryError::InvalidYear(token.to_string());

    let caps = RE_YEAR_TOKEN.captures(token).ok_or_else(invalid)?;
    let era = match (caps.name("pre"), caps.name("post")) {
        (None, None) => Era::Common,
        (Some(tok), None) | (None, Some(tok)) => Era::from_token(tok.as_str()).ok_or_else(invalid)?,
        (Some(_), Some(_)) => return Err(invalid()),
    };
    let year_of_era: i32 = caps["year"].parse().map_err(|_| invalid())?;
    if year_of_era < 1 {
        return Err(invalid());
    }
    Ok(era.proleptic_year(year_of_era))
}

/// Parse one line item into an [`Event`] on `month_day` of the line's year.
///
/// The line is split at the first [`SEPARATOR`]; both halves are trimmed. The
/// year must exist with that month/day (so `29 February` needs a leap year) and
/// the description must not be empty.
pub fn parse_event_line(line: &str, month_day: MonthDay) -> Result<Event, MalformedEntryError> {
    tracing::debug!(text = %line, "parsing event line");

    let (year_part, description) = line
        .split_once(SEPARATOR)
        .ok_or(MalformedEntryError::MissingSeparator)?;
    let year = parse_year(year_part.trim())?;

    let date = NaiveDate::from_ymd_opt(year, month_day.month(), month_day.day()).ok_or(
        MalformedEntryError::InvalidDate {
            year,
            month: month_day.month(),
            day: month_day.day(),
        },
    )?;

    let description = description.trim();
    if description.is_empty() {
        return Err(MalformedEntryError::EmptyDescription);
    }
    Ok(Event::new(date, description))
}
