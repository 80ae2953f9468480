pub mod layout;
mod completion;
mod dashboard;
mod lesson;
mod sessions;

use crate::app::App;
use crate::models::AppState;
use ratatui::Frame;

pub use completion::{draw_completion, hearts_display};
pub use dashboard::draw_dashboard;
pub use layout::{calculate_dashboard_chunks, calculate_lesson_chunks, centered_rect};
pub use lesson::{draw_lesson, draw_quit_confirmation};
pub use sessions::format_result_date;

pub fn draw(f: &mut Frame, app: &App) {
    match (app.state, app.lesson.as_ref()) {
        (AppState::Lesson, Some(lesson)) => draw_lesson(f, lesson),
        (AppState::LessonQuitConfirm, Some(_)) => draw_quit_confirmation(f),
        _ => draw_dashboard(f, app),
    }
}
