/// Logging setup for the binary
///
/// Installs a `tracing` subscriber with an env filter, a console layer and a
/// plain-text copy in {log_dir}/integration_{YYYYmmdd_HHMMSS}.log. Library
/// code only emits events; this is the one place global state is configured.

use anyhow::Result;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence; otherwise this crate logs at `debug` when requested
/// and `info` by default. Returns the log file path, or `None` when the log
/// directory could not be prepared (console logging still works).
pub fn init(debug: bool, log_dir: &Path) -> Result<Option<PathBuf>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    let (file_layer, log_path, file_error) = match open_log_file(log_dir) {
        Ok((file, path)) => (
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            ),
            Some(path),
            None,
        ),
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match (&log_path, file_error) {
        (Some(path), _) => tracing::debug!("📝 Logging to {}", path.display()),
        (None, Some(e)) => tracing::warn!("⚠️ File logging disabled: {}", e),
        (None, None) => {}
    }

    Ok(log_path)
}

/// `--debug` raises this crate only; HTTP internals stay at info
fn default_directives(debug: bool) -> &'static str {
    if debug {
        "site_builder=debug,info"
    } else {
        "info"
    }
}

fn open_log_file(log_dir: &Path) -> std::io::Result<(File, PathBuf)> {
    fs::create_dir_all(log_dir)?;
    let name = format!("integration_{}.log", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let path = log_dir.join(name);
    let file = File::create(&path)?;
    Ok((file, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_scoped_to_this_crate() {
        assert_eq!(default_directives(false), "info");
        assert_eq!(default_directives(true), "site_builder=debug,info");
        assert!(EnvFilter::try_new(default_directives(true)).is_ok());
    }

    #[test]
    fn log_file_is_timestamped_in_the_log_dir() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let dir = temp.path().join("logs");
        let (_, path) = open_log_file(&dir).expect("log file");
        assert_eq!(path.parent(), Some(dir.as_path()));
        let name = path.file_name().and_then(|n| n.to_str()).expect("file name");
        assert!(name.starts_with("integration_") && name.ends_with(".log"), "{name}");
    }
}
