//! Log output for the drill.
//!
//! [`init_logging`] sends `log` records through `env_logger` with chrono
//! timestamps, to stderr or to a file ([`default_log_path`] under the platform
//! cache dir for the full-screen interface, which owns the terminal).
//! `debug_log!` and `info_log!` are for per-answer and per-keystroke chatter:
//! they log in debug builds and compile to an unreachable branch in release,
//! so their arguments are still type-checked but never formatted.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// `log::debug!` in debug builds only.
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if false {
            log::debug!($($arg)*)
        }
    };
}

/// `log::info!` in debug builds only.
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if false {
            log::info!($($arg)*)
        }
    };
}

const LOG_DIR_NAME: &str = "power-drill";
const LOG_FILE_NAME: &str = "power-drill.log";

/// Log file used by the full-screen interface when none is given.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

/// Installs `env_logger`, filtered by `RUST_LOG` (default `warn`).
///
/// With `log_file` set, records are appended to that file; otherwise they go
/// to stderr. Calling this twice leaves the first logger in place.
pub fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    if builder.try_init().is_err() {
        debug_log!("Logger already initialized");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_names_the_app() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("power-drill/power-drill.log"));
        }
    }

    #[test]
    fn test_macros_work_as_statements() {
        let tag = "3^2";
        debug_log!("{} answered {:?}", tag, Some(9));
        info_log!("plain message");
    }

    #[test]
    fn test_init_logging_creates_log_file() {
        let dir = std::env::temp_dir().join(format!("power-drill-log-{}", std::process::id()));
        let path = dir.join("nested").join("drill.log");
        let _ = fs::remove_dir_all(&dir);

        init_logging(Some(&path)).unwrap();
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
