//! Tracing setup.
//!
//! The interactive screen owns the terminal, so its logs go to a file or
//! nowhere; snapshot runs log to stderr.

use std::{fs::OpenOptions, io, path::PathBuf, sync::Mutex};

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error.
    Stderr,
    /// Appended to a file.
    File(PathBuf),
    /// No subscriber is installed.
    Disabled,
}

/// Maps `-v` repetitions to a level.
#[must_use]
pub const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity` when set.
///
/// # Errors
///
/// Fails when the log file cannot be opened or a subscriber is already set.
pub fn install(target: LogTarget, verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level_for(verbosity).into()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => builder.without_time().with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    result.map_err(|err| eyre!("failed to install tracing subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_for(0), LevelFilter::INFO);
        assert_eq!(level_for(1), LevelFilter::DEBUG);
        assert_eq!(level_for(2), LevelFilter::TRACE);
        assert_eq!(level_for(9), LevelFilter::TRACE);
    }

    #[test]
    fn disabled_target_installs_nothing() {
        assert!(install(LogTarget::Disabled, 0).is_ok());
    }
}
