use std::time::Duration;

use async_trait::async_trait;
use wikiday_http::{HttpClient, RequestOpts, Url};

use crate::error::RetrievalError;
use crate::model::MonthDay;

pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/wiki/";

/// Source of raw day-page HTML.
///
/// Implementations make exactly one attempt per call and report any failure,
/// including a non-success response, as a [`RetrievalError`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, month_day: MonthDay, timeout: Duration)
    -> Result<String, RetrievalError>;
}

/// Fetches `<base>/<Month>_<Day>` from English Wikipedia.
#[derive(Clone, Debug)]
pub struct WikipediaFetcher {
    http: HttpClient,
}

impl WikipediaFetcher {
    pub fn new() -> Result<Self, RetrievalError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the fetcher somewhere other than en.wikipedia.org (mirrors, tests).
    /// A missing trailing `/` is added so page titles append to the path.
    pub fn with_base_url(base_url: &str) -> Result<Self, RetrievalError> {
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Ok(Self {
            http: HttpClient::new(&base)?,
        })
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, RetrievalError> {
        self.http = self.http.with_user_agent(user_agent)?;
        Ok(self)
    }

    /// Address of the day page, e.g. `https://en.wikipedia.org/wiki/March_14`.
    pub fn page_url(&self, month_day: MonthDay) -> Result<Url, RetrievalError> {
        Ok(self.http.resolve(&month_day.page_title(), false)?)
    }
}

#[async_trait]
impl PageFetcher for WikipediaFetcher {
    async fn fetch(
        &self,
        month_day: MonthDay,
        timeout: Duration,
    ) -> Result<String, RetrievalError> {
        let url = self.page_url(month_day)?;
        tracing::info!(%url, "Retrieving web page");

        let html = self
            .http
            .get_text(
                url.as_str(),
                RequestOpts {
                    timeout: Some(timeout),
                    allow_absolute: true,
                    ..Default::default()
                },
            )
            .await?;
        Ok(html)
    }
}
