//! Rolling file logs for core.
//!
//! Events are single `key=value` lines (`event=... module=... status=...`)
//! carrying counts, codes and durations only. Quote text is never logged.
//!
//! The backend starts once per process. Repeating `init_logging` with the
//! same level and directory is a no-op; asking for different settings after
//! that is an error rather than a silent reconfiguration.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Once;

const LOG_FILE_BASENAME: &str = "quotebook";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 5;
const PANIC_PAYLOAD_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: Once = Once::new();

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogSettings {
    level: LevelFilter,
    dir: PathBuf,
}

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Logging bootstrap failure.
#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel(String),
    RelativeDirectory(PathBuf),
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    Backend(String),
    /// Logging already runs with different settings.
    Conflict { active: String, requested: String },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unknown log level `{level}` (use trace, debug, info, warn or error)"
            ),
            Self::RelativeDirectory(path) => {
                write!(f, "log directory must be absolute: `{}`", path.display())
            }
            Self::CreateDirectory { path, source } => {
                write!(f, "cannot create log directory `{}`: {source}", path.display())
            }
            Self::Backend(err) => write!(f, "log backend failed to start: {err}"),
            Self::Conflict { active, requested } => write!(
                f,
                "logging is already running with `{active}`, cannot switch to `{requested}`"
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDirectory { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parses a level name as accepted in configuration (`warning` is an alias).
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    let lowered = level.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        _ => Err(LoggingError::UnsupportedLevel(lowered)),
    }
}

impl LogSettings {
    fn parse(level: &str, dir: &Path) -> Result<Self, LoggingError> {
        if dir.as_os_str().is_empty() || !dir.is_absolute() {
            return Err(LoggingError::RelativeDirectory(dir.to_path_buf()));
        }
        Ok(Self {
            level: parse_level(level)?,
            dir: dir.to_path_buf(),
        })
    }

    fn level_name(&self) -> String {
        self.level.as_str().to_ascii_lowercase()
    }

    fn describe(&self) -> String {
        format!("{} in {}", self.level_name(), self.dir.display())
    }

    fn start(&self) -> Result<LoggerHandle, LoggingError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| LoggingError::CreateDirectory {
            path: self.dir.clone(),
            source,
        })?;

        Logger::try_with_str(self.level_name())
            .and_then(|logger| {
                logger
                    .log_to_file(
                        FileSpec::default()
                            .directory(&self.dir)
                            .basename(LOG_FILE_BASENAME),
                    )
                    .rotate(
                        Criterion::Size(ROTATE_AT_BYTES),
                        Naming::Numbers,
                        Cleanup::KeepLogFiles(KEEP_LOG_FILES),
                    )
                    .write_mode(WriteMode::BufferAndFlush)
                    .append()
                    .format_for_files(flexi_logger::detailed_format)
                    .start()
            })
            .map_err(|err| LoggingError::Backend(err.to_string()))
    }
}

/// Starts file logging at `level` under the absolute directory `log_dir`.
///
/// # Errors
/// - `UnsupportedLevel` / `RelativeDirectory` for bad input.
/// - `Conflict` when logging already runs with other settings.
/// - `CreateDirectory` / `Backend` when the file backend cannot start.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), LoggingError> {
    let requested = LogSettings::parse(level, log_dir)?;

    let active = ACTIVE.get_or_try_init(|| {
        let handle = requested.start()?;
        install_panic_hook();
        info!(
            "event=core_init module=core status=ok version={} os={} level={}",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            requested.level_name()
        );
        Ok::<_, LoggingError>(ActiveLogger {
            settings: requested.clone(),
            _handle: handle,
        })
    })?;

    if active.settings != requested {
        return Err(LoggingError::Conflict {
            active: active.settings.describe(),
            requested: requested.describe(),
        });
    }
    Ok(())
}

/// Level and directory of the running logger, if any.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.settings.level, active.settings.dir.clone()))
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map_or_else(
                    || "unknown".to_string(),
                    |loc| format!("{}:{}", loc.file(), loc.line()),
                );
            let payload = panic_info
                .payload()
                .downcast_ref::<&str>()
                .map(|message| (*message).to_string())
                .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            error!(
                "event=panic_captured module=core status=error location={} payload={}",
                location,
                single_line(&payload, PANIC_PAYLOAD_LIMIT)
            );
            previous(panic_info);
        }));
    });
}

/// Flattens line breaks and caps length; panic payloads may echo user input.
fn single_line(value: &str, limit: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    if flat.chars().count() <= limit {
        return flat;
    }
    let mut capped: String = flat.chars().take(limit).collect();
    capped.push_str("...");
    capped
}
