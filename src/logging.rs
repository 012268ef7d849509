//! Caller-owned log subscriber.
//!
//! The library only emits `tracing` events. Applications decide where they
//! go by constructing a [`LogHandle`] from their [`Settings`]: the handle
//! installs a `tracing-subscriber` formatter for the current thread and
//! removes it again when dropped. [`LogHandle::install_global`] is the
//! process-wide variant for binaries that set up logging once at startup.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::dispatcher::{self, DefaultGuard, Dispatch};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, Settings};

/// Active log subscriber built from [`Settings`].
#[derive(Debug)]
pub struct LogHandle {
    dispatch: Dispatch,
    level: Level,
    file: Option<PathBuf>,
    guard: Option<DefaultGuard>,
}

impl LogHandle {
    /// Installs a subscriber for the current thread until the handle is dropped.
    ///
    /// # Errors
    ///
    /// Fails for an unknown level name or when the log file cannot be opened.
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        let mut handle = Self::build(settings)?;
        handle.guard = Some(dispatcher::set_default(&handle.dispatch));
        tracing::debug!(level = %handle.level, environment = %settings.environment, "logging ready");
        Ok(handle)
    }

    /// Installs the subscriber for the whole process.
    ///
    /// # Errors
    ///
    /// Fails like [`LogHandle::new`], or with [`ConfigError::GlobalSubscriber`]
    /// when another global subscriber is already set.
    pub fn install_global(settings: &Settings) -> Result<Self, ConfigError> {
        let handle = Self::build(settings)?;
        dispatcher::set_global_default(handle.dispatch.clone())?;
        Ok(handle)
    }

    fn build(settings: &Settings) -> Result<Self, ConfigError> {
        let level = settings.log_level()?;
        let file = settings.logging.file.clone();
        let writer = match &file {
            Some(path) => BoxMakeWriter::new(Mutex::new(open_log_file(path)?)),
            None => BoxMakeWriter::new(std::io::stdout),
        };
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(level).into())
            .parse_lossy("");
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(file.is_none())
            .with_target(true)
            .finish();
        Ok(Self { dispatch: Dispatch::new(subscriber), level, file, guard: None })
    }

    /// Maximum level that is recorded.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Destination file, or `None` for stdout.
    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Underlying dispatcher, for use with [`tracing::dispatcher::with_default`].
    #[must_use]
    pub const fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }
}

fn open_log_file(path: &Path) -> Result<fs::File, ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
