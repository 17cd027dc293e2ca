//! Subscriber setup for the `musicvibe` binary.
//!
//! Interactive sessions log to stderr and to a daily rotated file, keeping
//! stdout free for published player states. One-shot commands log to stderr
//! only.

use std::{env, error::Error, io};

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{Builder, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    filter::LevelFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::{ConfigPaths, LogLevel};

const LOG_FORMAT_VAR: &str = "MUSICVIBE_LOG_FORMAT";
const LOG_FILE_PREFIX: &str = "musicvibe";
const LOG_FILES_KEPT: usize = 7;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Output format selected through `MUSICVIBE_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match env::var(LOG_FORMAT_VAR) {
            Ok(value) if value.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Compact,
        }
    }
}

fn layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true);

    match format {
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
    }
}

/// `RUST_LOG` when set, otherwise the configured level for every target.
fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy()
}

/// Logs to stderr only.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init(level: LogLevel) -> Result<(), Box<dyn Error>> {
    let format = LogFormat::from_env();

    tracing_subscriber::registry()
        .with(vec![layer(format, io::stderr, true)])
        .with(env_filter(level))
        .try_init()?;

    Ok(())
}

/// Logs to stderr and to `musicvibe.<date>.log` in the log directory.
///
/// The returned guard flushes the file writer when dropped, so hold it for
/// the lifetime of the program.
///
/// # Errors
/// Returns error if the log directory or appender cannot be created, or a
/// global subscriber is already installed
pub fn init_with_file(level: LogLevel) -> Result<WorkerGuard, Box<dyn Error>> {
    let appender = Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(LOG_FILES_KEPT)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(ConfigPaths::log_dir()?)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let format = LogFormat::from_env();

    tracing_subscriber::registry()
        .with(vec![
            layer(format, io::stderr, true),
            layer(format, file_writer, false),
        ])
        .with(env_filter(level))
        .try_init()?;

    Ok(guard)
}
