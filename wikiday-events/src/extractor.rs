use std::time::Duration;

use scraper::Html;

use crate::error::{ExtractError, RetrievalError};
use crate::fetcher::{PageFetcher, WikipediaFetcher};
use crate::locator::locate_event_items;
use crate::model::{Event, MonthDay};
use crate::parser::parse_event_line;

/// Wait applied to page retrieval unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Queries the events that happened on a given day of the year.
///
/// Every call fetches and parses the page from scratch; nothing is cached and
/// nothing is retried. Lines that do not parse are logged and skipped.
#[derive(Clone, Debug)]
pub struct EventExtractor<F = WikipediaFetcher> {
    fetcher: F,
    timeout: Duration,
}

impl EventExtractor<WikipediaFetcher> {
    /// Extractor for en.wikipedia.org with the default 5 s timeout.
    pub fn new() -> Result<Self, RetrievalError> {
        Ok(Self::with_fetcher(WikipediaFetcher::new()?))
    }
}

impl<F: PageFetcher> EventExtractor<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Events for `month` (1-12) / `day` (1-31), in page order.
    pub async fn get_events(&self, month: u32, day: u32) -> Result<Vec<Event>, ExtractError> {
        let month_day = MonthDay::new(month, day)?;
        Ok(self.get_events_for(month_day).await?)
    }

    /// Events for `month_day`, in page order.
    ///
    /// Fails only when the page cannot be retrieved; a page without usable
    /// events gives an empty vector.
    pub async fn get_events_for(&self, month_day: MonthDay) -> Result<Vec<Event>, RetrievalError> {
        let html = self.fetcher.fetch(month_day, self.timeout).await?;
        Ok(extract_events(&html, month_day))
    }
}

/// Locate and parse the Events items of an already retrieved day page.
pub fn extract_events(html: &str, month_day: MonthDay) -> Vec<Event> {
    let document = Html::parse_document(html);
    locate_event_items(&document)
        .into_iter()
        .filter_map(|item| match parse_event_line(&item, month_day) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::warn!(%item, reason = %err, "Skipped malformed element");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_bad_lines_and_keeps_order() {
        let html = r#"
            <h2 id="Events">Events</h2>
            <ul>
              <li>1969 – Apollo 11 lands on the Moon</li>
              <li>some text with no dash</li>
              <li>Year Unknown – something happened</li>
              <li>44 BC – Julius Caesar is assassinated</li>
            </ul>"#;
        let md = MonthDay::new(3, 15).unwrap();
        let events = extract_events(html, md);
        let rendered: Vec<String> = events.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "1969-03-15 - Apollo 11 lands on the Moon",
                "-0043-03-15 - Julius Caesar is assassinated",
            ]
        );
    }

    #[test]
    fn default_timeout_is_five_seconds() {
        let extractor = EventExtractor::new().unwrap();
        assert_eq!(extractor.timeout(), Duration::from_millis(5000));
        let extractor = extractor.with_timeout(Duration::from_millis(250));
        assert_eq!(extractor.timeout(), Duration::from_millis(250));
    }
}
