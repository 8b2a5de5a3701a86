use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "plant-quiz.log";

pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("plant-quiz")
        .join(LOG_FILE_NAME)
}

/// Sends `tracing` output to `path`; the terminal belongs to the UI.
///
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init(path: &Path) -> std::io::Result<WorkerGuard> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_init_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("quiz.log");
        let guard = init(&path).unwrap();
        tracing::info!("test log message");
        drop(guard);
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_default_log_path_file_name() {
        assert!(default_log_path().ends_with("plant-quiz/plant-quiz.log"));
    }
}
