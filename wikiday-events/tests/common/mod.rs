#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use wikiday_common::observability::{LogConfig, LogFormat};
use wikiday_events::{MonthDay, PageFetcher, RetrievalError};

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "wikiday-tests",
            log_dir: Some(std::env::temp_dir().join("wikiday-tests")),
            emit_stderr: true,
            format: if std::env::var("WIKIDAY_LOG_FORMAT")
                .map(|raw| raw.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false)
            {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            default_filter: "debug".to_string(),
        };

        wikiday_common::observability::init_logging(config).unwrap_or_default()
    });
}

/// In-memory log sink for asserting on emitted events.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Route this thread's events (debug and up) here until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub const JULY_20: &str = include_str!("../fixtures/july_20.html");
pub const LEGACY_MARCH_15: &str = include_str!("../fixtures/legacy_march_15.html");
pub const NO_EVENTS: &str = include_str!("../fixtures/no_events.html");

/// Serves a fixed page and remembers what it was asked for.
pub struct StaticFetcher {
    html: &'static str,
    pub calls: Mutex<Vec<(MonthDay, Duration)>>,
}

impl StaticFetcher {
    pub fn new(html: &'static str) -> Self {
        Self {
            html,
            calls: Default::default(),
        }
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(
        &self,
        month_day: MonthDay,
        timeout: Duration,
    ) -> Result<String, RetrievalError> {
        self.calls.lock().unwrap().push((month_day, timeout));
        Ok(self.html.to_string())
    }
}

/// Always fails as if the request timed out.
pub struct TimingOutFetcher;

#[async_trait]
impl PageFetcher for TimingOutFetcher {
    async fn fetch(
        &self,
        month_day: MonthDay,
        timeout: Duration,
    ) -> Result<String, RetrievalError> {
        Err(RetrievalError::Timeout {
            url: format!("https://en.wikipedia.org/wiki/{}", month_day.page_title()),
            timeout_ms: timeout.as_millis() as u64,
        })
    }
}
