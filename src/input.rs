use crate::app::ActiveLesson;
use crate::error::LessonError;
use crate::models::AppState;
use crate::session::Advance;
use crate::utils::byte_index;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    None,
    Start(usize),
    Quit,
}

pub fn handle_dashboard_input(
    selected: &mut usize,
    course_count: usize,
    key: KeyEvent,
) -> DashboardAction {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            *selected = selected.saturating_sub(1);
            DashboardAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if *selected < course_count.saturating_sub(1) {
                *selected += 1;
            }
            DashboardAction::None
        }
        KeyCode::Enter if course_count > 0 => DashboardAction::Start(*selected),
        KeyCode::Char('q') | KeyCode::Esc => DashboardAction::Quit,
        _ => DashboardAction::None,
    }
}

pub fn handle_lesson_input(
    lesson: &mut ActiveLesson,
    key: KeyEvent,
    app_state: &mut AppState,
) -> Result<(), LessonError> {
    if lesson.session.is_completed() {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => lesson.session.close(),
            _ => Ok(()),
        };
    }

    if lesson.session.feedback_visible() {
        return match key.code {
            KeyCode::Esc => {
                *app_state = AppState::LessonQuitConfirm;
                Ok(())
            }
            KeyCode::Enter => {
                if let Advance::NextQuestion(_) = lesson.session.advance()? {
                    lesson.reset_question_view();
                }
                Ok(())
            }
            _ => Ok(()),
        };
    }

    match key.code {
        KeyCode::Esc => {
            *app_state = AppState::LessonQuitConfirm;
            Ok(())
        }
        KeyCode::Enter => {
            // Check stays disabled until something is selected.
            if lesson.session.can_check() {
                lesson.session.check_answer()?;
            }
            Ok(())
        }
        _ if lesson.has_options() => handle_option_keys(lesson, key),
        _ => handle_text_keys(lesson, key),
    }
}

fn handle_option_keys(lesson: &mut ActiveLesson, key: KeyEvent) -> Result<(), LessonError> {
    let count = lesson.option_count();
    let target = match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if lesson.session.selected_answer().is_none() {
                Some(lesson.highlighted)
            } else {
                Some(lesson.highlighted.saturating_sub(1))
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if lesson.session.selected_answer().is_none() {
                Some(lesson.highlighted)
            } else {
                Some((lesson.highlighted + 1).min(count.saturating_sub(1)))
            }
        }
        KeyCode::Char(c) => c
            .to_digit(10)
            .map(|d| d as usize)
            .filter(|d| (1..=count).contains(d))
            .map(|d| d - 1),
        _ => None,
    };

    match target {
        Some(index) => lesson.select_option(index),
        None => Ok(()),
    }
}

fn handle_text_keys(lesson: &mut ActiveLesson, key: KeyEvent) -> Result<(), LessonError> {
    match key.code {
        KeyCode::Left => {
            lesson.cursor_position = lesson.cursor_position.saturating_sub(1);
            Ok(())
        }
        KeyCode::Right => {
            if lesson.cursor_position < lesson.input_buffer.chars().count() {
                lesson.cursor_position += 1;
            }
            Ok(())
        }
        KeyCode::Backspace => {
            if lesson.cursor_position > 0 {
                let at = byte_index(&lesson.input_buffer, lesson.cursor_position - 1);
                lesson.input_buffer.remove(at);
                lesson.cursor_position -= 1;
                lesson.sync_typed_answer()?;
            }
            Ok(())
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let at = byte_index(&lesson.input_buffer, lesson.cursor_position);
            lesson.input_buffer.insert(at, c);
            lesson.cursor_position += 1;
            lesson.sync_typed_answer()
        }
        _ => Ok(()),
    }
}

pub fn handle_quit_confirm_input(
    lesson: &mut ActiveLesson,
    key: KeyEvent,
    app_state: &mut AppState,
) -> Result<(), LessonError> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => lesson.session.close(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            *app_state = AppState::Lesson;
            Ok(())
        }
        _ => Ok(()),
    }
}
