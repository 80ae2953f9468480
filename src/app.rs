use crate::config::AppConfig;
use crate::content::Catalog;
use crate::error::LessonError;
use crate::input::{
    handle_dashboard_input, handle_lesson_input, handle_quit_confirm_input, DashboardAction,
};
use crate::models::{AppState, CourseInfo};
use crate::session::{LessonCallbacks, LessonSession};
use chrono::{DateTime, Local};
use std::collections::HashMap;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

const RECENT_RESULTS: usize = 5;

/// Messages posted by lesson callbacks for the UI thread to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonEvent {
    Completed { lesson_id: u64, earned_xp: u32 },
    Closed { lesson_id: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonResult {
    pub course_id: u32,
    pub course_title: String,
    pub course_icon: String,
    pub earned_xp: u32,
    pub correct_answers: u32,
    pub total_questions: usize,
    pub hearts_left: u8,
    pub finished_at: DateTime<Local>,
}

impl LessonResult {
    fn from_session(session: &LessonSession, earned_xp: u32) -> Self {
        Self {
            course_id: session.course().id,
            course_title: session.course().title.clone(),
            course_icon: session.course().icon.clone(),
            earned_xp,
            correct_answers: session.correct_answers(),
            total_questions: session.question_count(),
            hearts_left: session.hearts(),
            finished_at: Local::now(),
        }
    }
}

/// XP and history for this run of the app. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct RunProgress {
    pub total_xp: u32,
    pub lessons_completed: u32,
    /// Most recent first.
    pub history: Vec<LessonResult>,
}

impl RunProgress {
    fn record(&mut self, earned_xp: u32, result: Option<LessonResult>) {
        self.total_xp = self.total_xp.saturating_add(earned_xp);
        self.lessons_completed += 1;
        if let Some(result) = result {
            self.history.insert(0, result);
            self.history.truncate(RECENT_RESULTS);
        }
    }
}

/// A running lesson plus the view state the session does not track.
#[derive(Debug)]
pub struct ActiveLesson {
    /// Unique per started lesson, even when a course is retaken.
    pub id: u64,
    pub session: LessonSession,
    pub highlighted: usize,
    pub input_buffer: String,
    /// In characters, not bytes.
    pub cursor_position: usize,
}

impl ActiveLesson {
    pub fn new(id: u64, session: LessonSession) -> Self {
        Self {
            id,
            session,
            highlighted: 0,
            input_buffer: String::new(),
            cursor_position: 0,
        }
    }

    pub fn has_options(&self) -> bool {
        self.session
            .current_question()
            .is_some_and(|q| q.has_options())
    }

    pub fn option_count(&self) -> usize {
        self.session
            .current_question()
            .map(|q| q.options().len())
            .unwrap_or(0)
    }

    pub fn select_option(&mut self, index: usize) -> Result<(), LessonError> {
        let Some(option) = self
            .session
            .current_question()
            .and_then(|q| q.options().get(index))
            .cloned()
        else {
            return Ok(());
        };
        self.highlighted = index;
        self.session.select_answer(option)
    }

    pub fn sync_typed_answer(&mut self) -> Result<(), LessonError> {
        self.session.select_answer(self.input_buffer.clone())
    }

    pub fn reset_question_view(&mut self) {
        self.highlighted = 0;
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
}

pub struct App {
    pub state: AppState,
    pub catalog: Catalog,
    pub config: AppConfig,
    pub selected_course: usize,
    pub lesson: Option<ActiveLesson>,
    pub progress: RunProgress,
    pub should_quit: bool,
    /// Results of completed lessons awaiting their deferred completion event.
    finished: HashMap<u64, LessonResult>,
    next_lesson_id: u64,
    events_tx: UnboundedSender<LessonEvent>,
    events_rx: UnboundedReceiver<LessonEvent>,
}

impl App {
    pub fn new(catalog: Catalog, config: AppConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::Dashboard,
            catalog,
            config,
            selected_course: 0,
            lesson: None,
            progress: RunProgress::default(),
            should_quit: false,
            finished: HashMap::new(),
            next_lesson_id: 1,
            events_tx,
            events_rx,
        }
    }

    pub fn courses(&self) -> &[CourseInfo] {
        self.catalog.courses()
    }

    pub fn start_lesson(&mut self, course_id: u32) -> Result<(), LessonError> {
        let lesson_id = self.next_lesson_id;
        let complete_tx = self.events_tx.clone();
        let close_tx = self.events_tx.clone();
        let callbacks = LessonCallbacks::new(
            move |earned_xp| {
                let _ = complete_tx.send(LessonEvent::Completed {
                    lesson_id,
                    earned_xp,
                });
            },
            move || {
                let _ = close_tx.send(LessonEvent::Closed { lesson_id });
            },
        );

        let session = LessonSession::start(
            course_id,
            &self.catalog,
            self.config.lesson.clone(),
            callbacks,
        )?;
        self.next_lesson_id += 1;
        self.lesson = Some(ActiveLesson::new(lesson_id, session));
        self.state = AppState::Lesson;
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let state = self.state;
        let result = match state {
            AppState::Dashboard => self.handle_dashboard_key(key),
            AppState::Lesson => match self.lesson.as_mut() {
                Some(lesson) => handle_lesson_input(lesson, key, &mut self.state),
                None => {
                    self.state = AppState::Dashboard;
                    Ok(())
                }
            },
            AppState::LessonQuitConfirm => match self.lesson.as_mut() {
                Some(lesson) => handle_quit_confirm_input(lesson, key, &mut self.state),
                None => {
                    self.state = AppState::Dashboard;
                    Ok(())
                }
            },
        };

        if let Err(err) = result {
            warn!(error = %err, state = ?self.state, "key ignored");
        }
        self.snapshot_completion();
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> Result<(), LessonError> {
        let count = self.courses().len();
        match handle_dashboard_input(&mut self.selected_course, count, key) {
            DashboardAction::Start(index) => {
                let course_id = self.courses()[index].id;
                self.start_lesson(course_id)
            }
            DashboardAction::Quit => {
                self.should_quit = true;
                Ok(())
            }
            DashboardAction::None => Ok(()),
        }
    }

    fn snapshot_completion(&mut self) {
        let Some(lesson) = self.lesson.as_ref() else {
            return;
        };
        let Some(earned_xp) = lesson.session.earned_xp() else {
            return;
        };
        self.finished
            .entry(lesson.id)
            .or_insert_with(|| LessonResult::from_session(&lesson.session, earned_xp));
    }

    /// Applies every event the lesson callbacks have posted so far.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: LessonEvent) {
        match event {
            LessonEvent::Completed {
                lesson_id,
                earned_xp,
            } => {
                let result = self.finished.remove(&lesson_id);
                self.progress.record(earned_xp, result);
                info!(
                    lesson_id,
                    earned_xp,
                    total_xp = self.progress.total_xp,
                    "lesson XP awarded"
                );

                if self.lesson.as_ref().is_some_and(|l| l.id == lesson_id) {
                    self.leave_lesson();
                }
            }
            LessonEvent::Closed { lesson_id } => {
                let Some(lesson) = self.lesson.as_ref().filter(|l| l.id == lesson_id) else {
                    return;
                };
                // A completion still pending after close will arrive later.
                if !lesson.session.completion_pending() {
                    self.finished.remove(&lesson_id);
                }
                self.leave_lesson();
            }
        }
    }

    fn leave_lesson(&mut self) {
        self.lesson = None;
        self.state = AppState::Dashboard;
    }
}
