use crate::config::AppConfig;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to the configured log file; the terminal UI owns
/// stdout. `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &AppConfig) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_init_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            log_file: dir.path().join("lessons.log"),
            ..AppConfig::default()
        };

        init(&config).unwrap();
        tracing::info!("logger test message");
        assert!(config.log_file.exists());

        // A second global subscriber is refused.
        assert!(init(&config).is_err());
    }

    #[test]
    fn test_logger_init_fails_on_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            log_file: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        assert!(init(&config).is_err());
    }
}
