use thiserror::Error;
use wikiday_http::HttpError;

/// The day page could not be retrieved. Fatal to an extraction call.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("invalid page URL: {0}")]
    InvalidUrl(String),

    #[error("timed out after {timeout_ms} ms fetching {url}")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("network error fetching page: {0}")]
    Network(String),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl From<HttpError> for RetrievalError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Url(msg) => RetrievalError::InvalidUrl(msg),
            HttpError::Timeout { url, timeout_ms } => RetrievalError::Timeout { url, timeout_ms },
            HttpError::Build(msg) | HttpError::Network(msg) => RetrievalError::Network(msg),
            HttpError::Status { status, url, .. } => RetrievalError::Status {
                url,
                status: status.as_u16(),
            },
        }
    }
}

/// One Events line item could not be turned into an [`Event`](crate::Event).
///
/// Only ever observed by callers of [`parse_event_line`](crate::parser::parse_event_line);
/// the extractor logs and skips the item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedEntryError {
    #[error("no ` – ` separator between year and description")]
    MissingSeparator,

    #[error("unrecognised year token `{0}`")]
    InvalidYear(String),

    #[error("{month:02}-{day:02} does not exist in year {year}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("description is empty")]
    EmptyDescription,
}

/// Month outside 1-12 or day outside 1-31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid month/day {month}/{day}: month must be 1-12 and day 1-31")]
pub struct InvalidMonthDay {
    pub month: u32,
    pub day: u32,
}

/// Failure of a whole [`EventExtractor`](crate::EventExtractor) call.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    InvalidMonthDay(#[from] InvalidMonthDay),
}
