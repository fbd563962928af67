//! # Logger
//!
//! Installs the global `tracing` subscriber for the drill console.
//!
//! Console output goes to **stderr** so command results printed on stdout stay machine
//! readable. A rolling [`FileSink`] can be added; its non-blocking worker is owned by the
//! returned [`Logger`] handle and flushed when the handle drops.
//!
//! Filtering starts from [`LoggerBuilder::level`], can be narrowed per target with
//! [`LoggerBuilder::env_filter`] (e.g. `"drill_integrations=debug"`), and `RUST_LOG` wins when
//! no explicit filter is supplied.
//!
//! ## Example
//!
//! ```rust
//! # use drill_logger::{FileSink, LevelFilter, Logger};
//! let dir = std::env::temp_dir().join("drill-doc-logs");
//!
//! let _logger = Logger::builder()
//!     .name("drill")
//!     .level(LevelFilter::DEBUG)
//!     .file(FileSink::new(dir).json())
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Maps a count of `-v` flags onto a level: 0 warn, 1 info, 2 debug, 3+ trace.
#[must_use]
pub const fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Rolling log files named `<logger name>.<period>.log`.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl FileSink {
    /// Daily files in `dir`, seven kept, plain text.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), rotation: Rotation::DAILY, max_files: 7, json: false }
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// One JSON object per line.
    #[must_use]
    pub const fn json(mut self) -> Self {
        self.json = true;
        self
    }

    fn layer(&self, name: &str) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
        fs::create_dir_all(&self.dir).map_err(|e| LoggerError::Internal {
            message: e.to_string().into(),
            context: Some(format!("Creating log directory {}", self.dir.display()).into()),
        })?;

        let appender = RollingFileAppender::builder()
            .rotation(self.rotation.clone())
            .filename_prefix(name)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(self.max_files)
            .build(&self.dir)
            .context(format!("Log directory: {}", self.dir.display()))?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let plain = layer().with_writer(writer).with_ansi(false);
        let layer = if self.json { plain.json().boxed() } else { plain.boxed() };
        Ok((layer, guard))
    }
}

/// Builder state before [`LoggerBuilder::name`] is called.
#[derive(Debug)]
pub struct Unnamed;

/// Builder state once a name is known; only this state can [`LoggerBuilder::init`].
#[derive(Debug)]
pub struct Named(String);

/// Builder for the global subscriber.
#[derive(Debug)]
#[must_use = "The builder does nothing until `init` is called."]
pub struct LoggerBuilder<N = Unnamed> {
    name: N,
    level: LevelFilter,
    directives: Option<String>,
    console: bool,
    ansi: bool,
    file: Option<FileSink>,
}

impl LoggerBuilder<Unnamed> {
    /// Sets the logger name, also used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        let Self { level, directives, console, ansi, file, .. } = self;
        LoggerBuilder { name: Named(name.into()), level, directives, console, ansi, file }
    }
}

impl<N> LoggerBuilder<N> {
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Adds an explicit filter directive such as `drill_integrations=debug`.
    ///
    /// Invalid directives make [`LoggerBuilder::init`] fail. Without one, `RUST_LOG` applies.
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    /// Compact output on stderr. On by default.
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Colored console output. On by default.
    pub const fn ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }

    pub fn file(mut self, sink: FileSink) -> Self {
        self.file = Some(sink);
        self
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.directives {
            None => Ok(builder.from_env_lossy()),
            Some(directives) => builder.parse(directives).map_err(|e| {
                LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{directives}': {e}").into(),
                    context: None,
                }
            }),
        }
    }
}

impl LoggerBuilder<Named> {
    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive until shutdown; dropping it stops the file worker.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, a file sink keeping zero
    ///   files, a bad filter directive, or when neither console nor file output is enabled.
    /// * [`LoggerError::Appender`] if the log directory cannot host a rolling appender.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let filter = self.filter()?;
        let Named(name) = &self.name;

        let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
        if self.console {
            layers.push(
                layer()
                    .compact()
                    .with_target(false)
                    .with_ansi(self.ansi)
                    .with_writer(std::io::stderr)
                    .boxed(),
            );
        }

        let guard = match &self.file {
            Some(sink) => {
                let (layer, guard) = sink.layer(name)?;
                layers.push(layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;
        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        let invalid = |message: &'static str| {
            Err(LoggerError::InvalidConfiguration { message: message.into(), context: None })
        };

        if self.name.0.trim().is_empty() {
            return invalid("Logger name cannot be empty");
        }
        if self.file.as_ref().is_some_and(|sink| sink.max_files == 0) {
            return invalid("A file sink must keep at least one file");
        }
        if !self.console && self.file.is_none() {
            return invalid("Neither console nor file output is enabled");
        }
        Ok(())
    }
}

/// Handle to the installed logging system.
#[derive(Debug)]
#[must_use = "Dropping this handle stops the background file writer."]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub const fn builder() -> LoggerBuilder {
        LoggerBuilder {
            name: Unnamed,
            level: LevelFilter::WARN,
            directives: None,
            console: true,
            ansi: true,
            file: None,
        }
    }

    /// The file worker guard, present only when a file sink was configured.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing log files");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_are_quiet_console() {
        let builder = Logger::builder().name("drill").env_filter("drill_scenarios=debug");
        assert!(builder.console);
        assert!(builder.ansi);
        assert_eq!(builder.level, LevelFilter::WARN);
        assert_eq!(builder.directives.as_deref(), Some("drill_scenarios=debug"));
        assert!(builder.file.is_none());
    }

    #[test]
    fn file_sink_settings_are_recorded() {
        let sink = FileSink::new("/tmp/drill-logs").max_files(3).rotation(Rotation::HOURLY).json();
        assert_eq!(sink.max_files, 3);
        assert!(sink.json);
        assert_eq!(sink.dir, PathBuf::from("/tmp/drill-logs"));
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(verbosity_level(0), LevelFilter::WARN);
        assert_eq!(verbosity_level(1), LevelFilter::INFO);
        assert_eq!(verbosity_level(2), LevelFilter::DEBUG);
        assert_eq!(verbosity_level(9), LevelFilter::TRACE);
    }

    #[test]
    fn invalid_settings_are_rejected_before_install() {
        let blank = Logger::builder().name("  ");
        assert!(matches!(blank.validate(), Err(LoggerError::InvalidConfiguration { .. })));

        let no_files = Logger::builder().name("drill").file(FileSink::new("logs").max_files(0));
        assert!(matches!(no_files.validate(), Err(LoggerError::InvalidConfiguration { .. })));

        let silent = Logger::builder().name("drill").console(false);
        assert!(matches!(silent.validate(), Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn bad_filter_is_rejected() {
        let builder = Logger::builder().name("drill").env_filter("drill_store=loud");
        assert!(builder.filter().is_err());
    }
}
