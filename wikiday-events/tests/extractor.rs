mod common;

use std::time::Duration;

use chrono::NaiveDate;
use common::{JULY_20, LEGACY_MARCH_15, NO_EVENTS, StaticFetcher, TimingOutFetcher};
use wikiday_events::{Event, EventExtractor, ExtractError, MonthDay, RetrievalError};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn extracts_well_formed_items_in_document_order() {
    common::init_test_tracing();
    let extractor = EventExtractor::with_fetcher(StaticFetcher::new(JULY_20));

    let events = extractor.get_events(7, 20).await.expect("events");

    let expected = vec![
        Event::new(
            ymd(70, 7, 20),
            "Siege of Jerusalem: Titus, son of emperor Vespasian, storms the Fortress of Antonia.",
        ),
        Event::new(ymd(-355, 7, 20), "A fictional fixture entry placed out of order."),
        Event::new(
            ymd(1402, 7, 20),
            "Ottoman–Timurid War: Battle of Ankara: Timur defeats forces of the Ottoman Empire sultan Bayezid I.",
        ),
        Event::new(
            ymd(1810, 7, 20),
            "Citizens of Bogotá, New Granada declare independence from Spain.",
        ),
        Event::new(
            ymd(1969, 7, 20),
            "Apollo program: Apollo 11's crew successfully makes the first human landing on the Moon.",
        ),
        Event::new(
            ymd(1976, 7, 20),
            "The Viking 1 lander successfully lands on Mars.",
        ),
    ];
    assert_eq!(events, expected);
}

#[tokio::test]
async fn births_and_deaths_are_not_events() {
    common::init_test_tracing();
    let extractor = EventExtractor::with_fetcher(StaticFetcher::new(JULY_20));
    let events = extractor.get_events(7, 20).await.unwrap();
    assert!(events.iter().all(|e| !e.description().contains("Petrarch")));
    assert!(events.iter().all(|e| !e.description().contains("Marconi")));
}

#[tokio::test]
async fn legacy_markup_and_era_tokens() {
    common::init_test_tracing();
    let extractor = EventExtractor::with_fetcher(StaticFetcher::new(LEGACY_MARCH_15));
    let events = extractor
        .get_events_for(MonthDay::new(3, 15).unwrap())
        .await
        .unwrap();

    let rendered: Vec<String> = events.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "-0043-03-15 - Julius Caesar is assassinated",
            "1066-03-15 - A fixture entry with a leading era",
            "1493-03-15 - Christopher Columbus returns to Spain after his first trip to the Americas.",
        ]
    );
}

#[tokio::test]
async fn page_without_events_section_is_empty_not_error() {
    common::init_test_tracing();
    let extractor = EventExtractor::with_fetcher(StaticFetcher::new(NO_EVENTS));
    let events = extractor.get_events(12, 25).await.unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn retrieval_failure_propagates_without_partial_output() {
    common::init_test_tracing();
    let extractor = EventExtractor::with_fetcher(TimingOutFetcher)
        .with_timeout(Duration::from_millis(10));

    let err = extractor.get_events(7, 20).await.unwrap_err();
    match err {
        ExtractError::Retrieval(RetrievalError::Timeout { url, timeout_ms }) => {
            assert_eq!(url, "https://en.wikipedia.org/wiki/July_20");
            assert_eq!(timeout_ms, 10);
        }
        other => panic!("expected retrieval timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn out_of_range_input_fails_before_fetching() {
    let fetcher = StaticFetcher::new(JULY_20);
    let extractor = EventExtractor::with_fetcher(fetcher);

    let err = extractor.get_events(13, 1).await.unwrap_err();
    assert!(matches!(err, ExtractError::InvalidMonthDay(_)));
    assert!(extractor.fetcher().calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn nonexistent_calendar_day_is_passed_through() {
    let extractor = EventExtractor::with_fetcher(StaticFetcher::new(JULY_20));
    // The fixture's lines cannot form February 30 in any year, so all are skipped.
    let events = extractor.get_events(2, 30).await.unwrap();
    assert!(events.is_empty());

    let calls = extractor.fetcher().calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.page_title(), "February_30");
}

#[tokio::test]
async fn passes_configured_timeout_to_fetcher() {
    let extractor = EventExtractor::with_fetcher(StaticFetcher::new(NO_EVENTS))
        .with_timeout(Duration::from_millis(1234));
    extractor.get_events(1, 1).await.unwrap();
    extractor.get_events(1, 1).await.unwrap();

    let calls = extractor.fetcher().calls.lock().unwrap();
    assert_eq!(calls.len(), 2, "no caching between calls");
    assert!(calls.iter().all(|(_, t)| *t == Duration::from_millis(1234)));
}

#[tokio::test]
async fn repeated_calls_are_idempotent() {
    let extractor = EventExtractor::with_fetcher(StaticFetcher::new(JULY_20));
    let first = extractor.get_events(7, 20).await.unwrap();
    let second = extractor.get_events(7, 20).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 6);
}
