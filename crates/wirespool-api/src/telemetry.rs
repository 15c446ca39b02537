//! Tracing subscriber setup for the server binary.
//!
//! | Variable     | Meaning                                              |
//! |--------------|------------------------------------------------------|
//! | `LOG_FORMAT` | `json` or `text` (default `text`)                    |
//! | `LOG_FILE`   | write to a daily-rotated file instead of stdout      |
//! | `LOG_ANSI`   | `true`/`1` or anything else; unset means auto-detect |
//! | `RUST_LOG`   | standard env filter                                  |

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "wirespool_api=debug,wirespool_db=debug,tower_http=debug";

/// File name used when `LOG_FILE` names a directory-like path.
const FALLBACK_LOG_FILE_NAME: &str = "wirespool-api.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub file: Option<PathBuf>,
    /// `None` leaves color detection to the formatter.
    pub ansi: Option<bool>,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unknown formats fall back to text; logging must come up before
    /// configuration errors can be reported.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        let file = lookup("LOG_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        let ansi = lookup("LOG_ANSI").map(|v| v == "true" || v == "1");
        Self { format, file, ansi }
    }

    /// ANSI setting for the active writer. Files stay plain unless asked.
    pub fn effective_ansi(&self) -> Option<bool> {
        match (&self.file, self.ansi) {
            (Some(_), ansi) => Some(ansi.unwrap_or(false)),
            (None, ansi) => ansi,
        }
    }
}

/// Directory and file name for the rolling appender.
fn split_log_path(path: &Path) -> (PathBuf, String) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    let name = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(FALLBACK_LOG_FILE_NAME)
        .to_string();
    (dir, name)
}

/// Install the global subscriber.
///
/// Output goes through a non-blocking writer; the returned guard must live
/// until shutdown or buffered lines are lost.
pub fn init_tracing(config: &LogConfig) -> WorkerGuard {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(env_filter);
    let ansi = config.effective_ansi();

    let (writer, guard) = match &config.file {
        Some(path) => {
            let (dir, name) = split_log_path(path);
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name))
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    match config.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
                .init();
        }
        LogFormat::Text => {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(writer);
            if let Some(ansi) = ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
    }
    guard
}
