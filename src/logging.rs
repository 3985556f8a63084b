use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use thiserror::Error;

const LOG_APP_DIR: &str = "arcade-snake";
const LOG_FILE_NAME: &str = "arcade-snake.log";

/// Errors raised while setting up the file logger.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("logger already initialised: {0}")]
    Install(#[from] log::SetLoggerError),
}

/// Platform-correct default log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(LOG_APP_DIR);
    base.push(LOG_FILE_NAME);
    base
}

/// Routes `log` output to `path`; the terminal itself belongs to the UI.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<(), LoggingError> {
    let file = open_log_file(path).map_err(|source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, config, file)?;
    Ok(())
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    File::create(path)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{default_log_path, open_log_file};

    #[test]
    fn default_path_ends_with_log_file_name() {
        assert!(default_log_path().ends_with("arcade-snake/arcade-snake.log"));
    }

    #[test]
    fn log_file_parent_directories_are_created() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("arcade-snake-log-tests-{nanos}"));
        let path = dir.join("nested").join("game.log");

        open_log_file(&path).expect("log file should be creatable");
        assert!(path.is_file());

        let _ = fs::remove_dir_all(&dir);
    }
}
