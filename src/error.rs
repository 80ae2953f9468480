//! Error types for lessons, course content and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected lesson operations. None of these change session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson has no questions")]
    EmptyLesson,
    #[error("no answer selected")]
    NoSelection,
    #[error("answer already checked for this question")]
    FeedbackAlreadyVisible,
    #[error("answer must be checked before advancing")]
    FeedbackNotVisible,
    #[error("lesson already completed")]
    Completed,
    #[error("lesson already closed")]
    Closed,
    #[error("no async runtime available to schedule the completion handoff")]
    NoRuntime,
}

/// Errors raised while loading or validating the course catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
    #[error("course {course_id} has an empty question list")]
    EmptyLesson { course_id: u32 },
    #[error("placeholder question list is empty")]
    EmptyPlaceholder,
    #[error("question id {question_id} appears twice in course {course_id}")]
    DuplicateQuestionId { course_id: u32, question_id: u32 },
    #[error("question {question_id} in course {course_id} has a correct answer outside its options")]
    AnswerNotInOptions { course_id: u32, question_id: u32 },
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}
