pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod input;
pub mod logger;
pub mod models;
pub mod scheduler;
pub mod session;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use app::{ActiveLesson, App, LessonEvent, LessonResult, RunProgress};
pub use config::{AppConfig, LessonConfig};
pub use content::Catalog;
pub use error::{ConfigError, ContentError, LessonError};
pub use models::{AppState, CourseInfo, Question, QuestionKind};
pub use session::{Advance, LessonCallbacks, LessonSession};
pub use ui::{draw_dashboard, draw_lesson, draw_quit_confirmation};
pub use utils::calculate_wrapped_cursor_position;
