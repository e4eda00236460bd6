//! Historical events from English Wikipedia "day" pages.
//!
//! The pipeline is fetch -> locate -> parse:
//!
//! - [`fetcher`]: builds `https://en.wikipedia.org/wiki/<Month>_<Day>` and
//!   retrieves the raw HTML through the [`PageFetcher`] seam
//! - [`locator`]: finds the list items under the level-2 `Events` heading
//! - [`parser`]: splits `"<year> – <description>"` lines and resolves BC/AD years
//! - [`extractor`]: [`EventExtractor`] runs the three, skipping malformed lines
//!
//! ```no_run
//! use wikiday_events::EventExtractor;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = EventExtractor::new()?;
//! for event in extractor.get_events(7, 20).await? {
//!     println!("{event}");
//! }
//! # Ok(()) }
//! ```
//!
//! Parsing works offline too:
//!
//! ```
//! use wikiday_events::{MonthDay, parser::parse_event_line};
//!
//! let ides = MonthDay::new(3, 15).unwrap();
//! let event = parse_event_line("44 BC – Julius Caesar is assassinated", ides).unwrap();
//! assert_eq!(event.to_string(), "-0043-03-15 - Julius Caesar is assassinated");
//! ```

pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod locator;
pub mod model;
pub mod parser;

pub use error::{ExtractError, InvalidMonthDay, MalformedEntryError, RetrievalError};
pub use extractor::{DEFAULT_TIMEOUT, EventExtractor, extract_events};
pub use fetcher::{DEFAULT_BASE_URL, PageFetcher, WikipediaFetcher};
pub use model::{Event, MonthDay};
