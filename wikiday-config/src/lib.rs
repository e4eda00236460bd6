//! Loader for `wikiday` configuration with YAML + environment overlays.
//!
//! Sources merge in increasing precedence: built-in defaults, files (YAML, TOML or
//! JSON by suffix), inline YAML snippets, then `WIKIDAY_`-prefixed environment
//! variables using `__` for nesting (`WIKIDAY_FETCH__TIMEOUT_MS=3000`). String
//! values may reference other variables as `${VAR}`.
//!
//! ```yaml
//! fetch:
//!   base_url: "https://en.wikipedia.org/wiki/"
//!   timeout_ms: 5000
//!   user_agent: "my-bot/1.0 (ops@example.org)"
//! logging:
//!   dir: "~/.local/share/wikiday"
//!   format: json
//!   stderr: true
//!   filter: "info,wikiday_http=debug"
//! ```
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use wikiday_common::observability::{LogConfig, LogFormat};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const ENV_PREFIX: &str = "WIKIDAY";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WikidayConfig {
    pub fetch: FetchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    /// Replaces the built-in `User-Agent` when set.
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: wikiday_events::DEFAULT_BASE_URL.to_string(),
            timeout_ms: wikiday_events::DEFAULT_TIMEOUT.as_millis() as u64,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: Option<PathBuf>,
    pub format: LogFormat,
    pub stderr: bool,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogFormat::Text,
            stderr: false,
            filter: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn to_log_config(&self, app_name: &'static str) -> LogConfig {
        LogConfig {
            app_name,
            log_dir: self.dir.clone(),
            emit_stderr: self.stderr,
            format: self.format,
            default_filter: self.filter.clone(),
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (files + env overrides).
pub struct WikidayConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for WikidayConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl WikidayConfigLoader {
    /// Start from built-in defaults; environment overrides are applied at [`load`](Self::load).
    ///
    /// ```
    /// use wikiday_config::WikidayConfigLoader;
    ///
    /// let cfg = WikidayConfigLoader::new().load().expect("defaults are valid");
    /// assert_eq!(cfg.fetch.timeout_ms, 5000);
    /// assert_eq!(cfg.fetch.base_url, "https://en.wikipedia.org/wiki/");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a config file that must exist; format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a config file that is skipped when missing.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use wikiday_config::WikidayConfigLoader;
    /// use wikiday_common::observability::LogFormat;
    ///
    /// let cfg = WikidayConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// fetch:
    ///   timeout_ms: 1500
    /// logging:
    ///   format: json
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.fetch.timeout_ms, 1500);
    /// assert_eq!(cfg.logging.format, LogFormat::Json);
    /// assert_eq!(cfg.logging.filter, "info");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge all sources, expand `${VAR}` placeholders and validate.
    pub fn load(self) -> Result<WikidayConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: WikidayConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        if typed.fetch.timeout_ms == 0 {
            return Err(ConfigError::Message(
                "fetch.timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(typed)
    }
}
