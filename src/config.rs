use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "LINGO_CONFIG";
pub const LOG_FILE_ENV: &str = "LINGO_LOG_FILE";
pub const LOG_LEVEL_ENV: &str = "LINGO_LOG_LEVEL";
pub const COMPLETION_DELAY_ENV: &str = "LINGO_COMPLETION_DELAY_MS";
pub const SUPPRESS_ON_CLOSE_ENV: &str = "LINGO_SUPPRESS_ON_CLOSE";

pub const MAX_HEARTS: u8 = 3;
pub const DEFAULT_STARTING_HEARTS: u8 = MAX_HEARTS;
pub const DEFAULT_POINTS_PER_CORRECT: u32 = 10;
pub const DEFAULT_HEART_BONUS: u32 = 5;
pub const DEFAULT_COMPLETION_DELAY_MS: u64 = 3000;
pub const DEFAULT_LOG_FILE: &str = "lingo_lessons.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Scoring rules and completion handoff for a single lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonConfig {
    pub starting_hearts: u8,
    pub points_per_correct: u32,
    pub heart_bonus: u32,
    pub completion_delay_ms: u64,
    /// Cancel a pending completion callback when the lesson is closed during
    /// the summary delay.
    pub suppress_completion_on_close: bool,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            starting_hearts: DEFAULT_STARTING_HEARTS,
            points_per_correct: DEFAULT_POINTS_PER_CORRECT,
            heart_bonus: DEFAULT_HEART_BONUS,
            completion_delay_ms: DEFAULT_COMPLETION_DELAY_MS,
            suppress_completion_on_close: true,
        }
    }
}

impl LessonConfig {
    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    /// Hearts stay within `1..=MAX_HEARTS` and points are a non-zero
    /// multiple of ten.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_HEARTS).contains(&self.starting_hearts) {
            return Err(ConfigError::InvalidValue {
                key: "lesson.starting_hearts",
                value: self.starting_hearts.to_string(),
            });
        }
        if self.points_per_correct == 0 || self.points_per_correct % 10 != 0 {
            return Err(ConfigError::InvalidValue {
                key: "lesson.points_per_correct",
                value: self.points_per_correct.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub lesson: LessonConfig,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lesson: LessonConfig::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the JSON file named by `LINGO_CONFIG`, then env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.lesson.validate()?;
        Ok(config)
    }

    /// Applies overrides from a key lookup so tests don't touch the process env.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(LOG_FILE_ENV)
            && !path.trim().is_empty()
        {
            self.log_file = PathBuf::from(path);
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV)
            && !level.trim().is_empty()
        {
            self.log_level = level.trim().to_string();
        }
        if let Some(value) = lookup(COMPLETION_DELAY_ENV) {
            self.lesson.completion_delay_ms =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: COMPLETION_DELAY_ENV,
                        value: value.clone(),
                    })?;
        }
        if let Some(value) = lookup(SUPPRESS_ON_CLOSE_ENV) {
            self.lesson.suppress_completion_on_close = parse_bool(&value).ok_or_else(|| {
                ConfigError::InvalidValue {
                    key: SUPPRESS_ON_CLOSE_ENV,
                    value: value.clone(),
                }
            })?;
        }
        self.lesson.validate()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_lesson_rules() {
        let config = AppConfig::default();
        assert_eq!(config.lesson.starting_hearts, 3);
        assert_eq!(config.lesson.points_per_correct, 10);
        assert_eq!(config.lesson.heart_bonus, 5);
        assert_eq!(config.lesson.completion_delay(), Duration::from_secs(3));
        assert!(config.lesson.suppress_completion_on_close);
        assert_eq!(config.log_file, PathBuf::from("lingo_lessons.log"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            AppConfig::from_json_str(r#"{"lesson":{"completion_delay_ms":500},"log_level":"debug"}"#)
                .unwrap();
        assert_eq!(config.lesson.completion_delay_ms, 500);
        assert_eq!(config.lesson.starting_hearts, 3);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = AppConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file_reads_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"lesson":{{"suppress_completion_on_close":false}}}}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert!(!config.lesson.suppress_completion_on_close);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_env_overrides_apply() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup_from(&[
                (LOG_FILE_ENV, "/tmp/lessons.log"),
                (LOG_LEVEL_ENV, " trace "),
                (COMPLETION_DELAY_ENV, "1200"),
                (SUPPRESS_ON_CLOSE_ENV, "no"),
            ]))
            .unwrap();

        assert_eq!(config.log_file, PathBuf::from("/tmp/lessons.log"));
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.lesson.completion_delay_ms, 1200);
        assert!(!config.lesson.suppress_completion_on_close);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[(COMPLETION_DELAY_ENV, "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: COMPLETION_DELAY_ENV,
                ..
            }
        ));

        let err = config
            .apply_overrides(lookup_from(&[(SUPPRESS_ON_CLOSE_ENV, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_out_of_range_lesson_rules_are_rejected() {
        let err = AppConfig::from_json_str(r#"{"lesson":{"starting_hearts":9}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "lesson.starting_hearts",
                ..
            }
        ));

        let err = AppConfig::from_json_str(r#"{"lesson":{"starting_hearts":0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        for points in ["7", "0"] {
            let json = format!(r#"{{"lesson":{{"points_per_correct":{}}}}}"#, points);
            let err = AppConfig::from_json_str(&json).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue {
                    key: "lesson.points_per_correct",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_in_range_lesson_rules_are_accepted() {
        let config = AppConfig::from_json_str(
            r#"{"lesson":{"starting_hearts":1,"points_per_correct":20,"heart_bonus":0}}"#,
        )
        .unwrap();
        assert_eq!(config.lesson.starting_hearts, 1);
        assert_eq!(config.lesson.points_per_correct, 20);
        assert!(LessonConfig::default().validate().is_ok());
    }

    #[test]
    fn test_overrides_revalidate_lesson_rules() {
        let mut config = AppConfig::default();
        config.lesson.starting_hearts = 5;
        assert!(config.apply_overrides(lookup_from(&[])).is_err());
    }

    #[test]
    fn test_empty_overrides_are_ignored() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup_from(&[(LOG_FILE_ENV, ""), (LOG_LEVEL_ENV, "  ")]))
            .unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
