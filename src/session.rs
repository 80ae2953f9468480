use crate::config::LessonConfig;
use crate::content::Catalog;
use crate::error::LessonError;
use crate::models::{CourseInfo, Question};
use crate::scheduler::{current_runtime, DeferredTask};
use tracing::{debug, info, warn};

pub type CompleteCallback = Box<dyn FnOnce(u32) + Send + 'static>;
pub type CloseCallback = Box<dyn FnOnce() + Send + 'static>;

/// Handoff points to whoever hosts the lesson.
pub struct LessonCallbacks {
    pub on_complete: CompleteCallback,
    pub on_close: CloseCallback,
}

impl LessonCallbacks {
    pub fn new<C, X>(on_complete: C, on_close: X) -> Self
    where
        C: FnOnce(u32) + Send + 'static,
        X: FnOnce() + Send + 'static,
    {
        Self {
            on_complete: Box::new(on_complete),
            on_close: Box::new(on_close),
        }
    }
}

impl std::fmt::Debug for LessonCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LessonCallbacks").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Answering,
    Feedback { correct: bool },
    Completed { earned_xp: u32 },
}

/// Outcome of a successful `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextQuestion(usize),
    Completed { earned_xp: u32 },
}

/// One attempt at a course's fixed question sequence.
pub struct LessonSession {
    course: CourseInfo,
    questions: Vec<Question>,
    config: LessonConfig,
    question_index: usize,
    selected_answer: Option<String>,
    phase: Phase,
    score: u32,
    hearts: u8,
    closed: bool,
    on_complete: Option<CompleteCallback>,
    on_close: Option<CloseCallback>,
    completion_task: Option<DeferredTask>,
}

impl std::fmt::Debug for LessonSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LessonSession")
            .field("course_id", &self.course.id)
            .field("question_index", &self.question_index)
            .field("selected_answer", &self.selected_answer)
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("hearts", &self.hearts)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl LessonSession {
    pub fn new(
        course: CourseInfo,
        questions: Vec<Question>,
        config: LessonConfig,
        callbacks: LessonCallbacks,
    ) -> Result<Self, LessonError> {
        if questions.is_empty() {
            return Err(LessonError::EmptyLesson);
        }
        info!(
            course_id = course.id,
            questions = questions.len(),
            "lesson started"
        );
        let hearts = config.starting_hearts;
        Ok(Self {
            course,
            questions,
            config,
            question_index: 0,
            selected_answer: None,
            phase: Phase::Answering,
            score: 0,
            hearts,
            closed: false,
            on_complete: Some(callbacks.on_complete),
            on_close: Some(callbacks.on_close),
            completion_task: None,
        })
    }

    /// Starts a lesson for `course_id`, using the placeholder questions when
    /// the catalog has no set for it.
    pub fn start(
        course_id: u32,
        catalog: &Catalog,
        config: LessonConfig,
        callbacks: LessonCallbacks,
    ) -> Result<Self, LessonError> {
        Self::new(
            catalog.course(course_id),
            catalog.questions_for(course_id).to_vec(),
            config,
            callbacks,
        )
    }

    /// Records a candidate for the active question. Ignored once the answer
    /// has been checked.
    pub fn select_answer(&mut self, candidate: impl Into<String>) -> Result<(), LessonError> {
        self.ensure_open()?;
        match self.phase {
            Phase::Completed { .. } => Err(LessonError::Completed),
            Phase::Feedback { .. } => {
                debug!(
                    question_index = self.question_index,
                    "selection ignored, answer already checked"
                );
                Ok(())
            }
            Phase::Answering => {
                let candidate = candidate.into();
                self.selected_answer = if candidate.is_empty() {
                    None
                } else {
                    Some(candidate)
                };
                Ok(())
            }
        }
    }

    /// Evaluates the selection against the active question and returns
    /// whether it was correct.
    pub fn check_answer(&mut self) -> Result<bool, LessonError> {
        self.ensure_open()?;
        match self.phase {
            Phase::Completed { .. } => return Err(LessonError::Completed),
            Phase::Feedback { .. } => return Err(LessonError::FeedbackAlreadyVisible),
            Phase::Answering => {}
        }
        let Some(selected) = self.selected_answer.as_deref() else {
            warn!(
                question_index = self.question_index,
                "check rejected, nothing selected"
            );
            return Err(LessonError::NoSelection);
        };

        let correct = self.questions[self.question_index].is_correct(selected);
        if correct {
            self.score = self.score.saturating_add(self.config.points_per_correct);
        } else {
            self.hearts = self.hearts.saturating_sub(1);
        }
        self.phase = Phase::Feedback { correct };
        debug!(
            question_index = self.question_index,
            correct,
            score = self.score,
            hearts = self.hearts,
            "answer checked"
        );
        Ok(correct)
    }

    /// Moves past a checked question. On the last question this completes the
    /// lesson and schedules `on_complete` after the configured delay.
    pub fn advance(&mut self) -> Result<Advance, LessonError> {
        self.ensure_open()?;
        match self.phase {
            Phase::Completed { .. } => return Err(LessonError::Completed),
            Phase::Answering => {
                warn!(
                    question_index = self.question_index,
                    "advance rejected, answer not checked"
                );
                return Err(LessonError::FeedbackNotVisible);
            }
            Phase::Feedback { .. } => {}
        }

        if !self.is_last_question() {
            self.question_index += 1;
            self.selected_answer = None;
            self.phase = Phase::Answering;
            debug!(question_index = self.question_index, "next question");
            return Ok(Advance::NextQuestion(self.question_index));
        }

        let earned_xp = self
            .score
            .saturating_add(u32::from(self.hearts).saturating_mul(self.config.heart_bonus));

        let runtime = current_runtime().inspect_err(|err| {
            warn!(error = %err, "could not schedule completion handoff");
        })?;
        if let Some(on_complete) = self.on_complete.take() {
            self.completion_task = Some(DeferredTask::schedule_on(
                &runtime,
                self.config.completion_delay(),
                move || on_complete(earned_xp),
            ));
        }

        self.phase = Phase::Completed { earned_xp };
        info!(
            course_id = self.course.id,
            earned_xp,
            score = self.score,
            hearts = self.hearts,
            "lesson completed"
        );
        Ok(Advance::Completed { earned_xp })
    }

    /// Leaves the lesson. Before completion this forfeits all XP.
    pub fn close(&mut self) -> Result<(), LessonError> {
        self.ensure_open()?;
        self.closed = true;

        if self.config.suppress_completion_on_close
            && let Some(task) = self.completion_task.as_mut()
            && task.cancel()
        {
            info!(
                course_id = self.course.id,
                "pending completion suppressed by close"
            );
        }

        info!(
            course_id = self.course.id,
            question_index = self.question_index,
            completed = self.is_completed(),
            "lesson closed"
        );
        if let Some(on_close) = self.on_close.take() {
            on_close();
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), LessonError> {
        if self.closed {
            Err(LessonError::Closed)
        } else {
            Ok(())
        }
    }

    pub fn course(&self) -> &CourseInfo {
        &self.course
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// The active question, or `None` once the lesson is completed.
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_completed() {
            None
        } else {
            self.questions.get(self.question_index)
        }
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    pub fn can_check(&self) -> bool {
        !self.closed && self.phase == Phase::Answering && self.selected_answer.is_some()
    }

    pub fn feedback_visible(&self) -> bool {
        matches!(self.phase, Phase::Feedback { .. })
    }

    /// Correctness of the last check, only while feedback is visible.
    pub fn last_answer_correct(&self) -> Option<bool> {
        match self.phase {
            Phase::Feedback { correct } => Some(correct),
            _ => None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hearts(&self) -> u8 {
        self.hearts
    }

    pub fn max_hearts(&self) -> u8 {
        self.config.starting_hearts
    }

    pub fn correct_answers(&self) -> u32 {
        match self.config.points_per_correct {
            0 => 0,
            points => self.score / points,
        }
    }

    pub fn points_per_correct(&self) -> u32 {
        self.config.points_per_correct
    }

    pub fn earned_xp(&self) -> Option<u32> {
        match self.phase {
            Phase::Completed { earned_xp } => Some(earned_xp),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.phase, Phase::Completed { .. })
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_last_question(&self) -> bool {
        self.question_index + 1 >= self.questions.len()
    }

    pub fn completion_pending(&self) -> bool {
        self.completion_task
            .as_ref()
            .map(DeferredTask::is_pending)
            .unwrap_or(false)
    }

    /// Position-based progress, counting the active question as reached.
    pub fn progress_percent(&self) -> u16 {
        let reached = (self.question_index + 1).min(self.questions.len());
        ((reached * 100) / self.questions.len()) as u16
    }
}
