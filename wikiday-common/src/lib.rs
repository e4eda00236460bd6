//! Shared plumbing for the wikiday crates.
//!
//! Right now this is only the logging setup in [`observability`]; the extraction
//! library itself never installs a subscriber and only emits `tracing` events.
//! Binaries and test harnesses call [`observability::init_logging`] once.
//!
//! ```rust
//! use wikiday_common::observability::{LogConfig, LogFormat};
//!
//! let cfg = LogConfig {
//!     format: LogFormat::Json,
//!     ..LogConfig::default()
//! };
//! assert_eq!(cfg.app_name, "wikiday");
//! assert_eq!(cfg.default_filter, "info");
//! ```

pub mod observability;
