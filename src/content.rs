use crate::error::ContentError;
use crate::models::{CourseInfo, Question};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

const BUILTIN_CATALOG: &str = include_str!("../assets/courses.json");

const PRACTICE_TITLE: &str = "Practice";
const PRACTICE_ICON: &str = "📘";

#[derive(Debug, Deserialize)]
struct CatalogFile {
    courses: Vec<CourseInfo>,
    #[serde(default)]
    lessons: Vec<LessonEntry>,
    placeholder: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct LessonEntry {
    course_id: u32,
    questions: Vec<Question>,
}

/// Course metadata and question sets keyed by course id.
///
/// Courses without a question set, and ids that are not in the catalog at
/// all, get the placeholder lesson.
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<CourseInfo>,
    lessons: HashMap<u32, Vec<Question>>,
    placeholder: Vec<Question>,
}

impl Catalog {
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ContentError> {
        let file: CatalogFile = serde_json::from_str(content)?;

        if file.placeholder.is_empty() {
            return Err(ContentError::EmptyPlaceholder);
        }
        validate_questions(0, &file.placeholder)?;

        let mut lessons = HashMap::new();
        for entry in file.lessons {
            if entry.questions.is_empty() {
                return Err(ContentError::EmptyLesson {
                    course_id: entry.course_id,
                });
            }
            validate_questions(entry.course_id, &entry.questions)?;
            lessons.insert(entry.course_id, entry.questions);
        }

        Ok(Self {
            courses: file.courses,
            lessons,
            placeholder: file.placeholder,
        })
    }

    pub fn courses(&self) -> &[CourseInfo] {
        &self.courses
    }

    pub fn course(&self, course_id: u32) -> CourseInfo {
        self.courses
            .iter()
            .find(|c| c.id == course_id)
            .cloned()
            .unwrap_or_else(|| CourseInfo {
                id: course_id,
                title: PRACTICE_TITLE.to_string(),
                description: String::new(),
                icon: PRACTICE_ICON.to_string(),
            })
    }

    pub fn has_lesson(&self, course_id: u32) -> bool {
        self.lessons.contains_key(&course_id)
    }

    pub fn questions_for(&self, course_id: u32) -> &[Question] {
        self.lessons
            .get(&course_id)
            .map(Vec::as_slice)
            .unwrap_or(self.placeholder.as_slice())
    }

    pub fn placeholder(&self) -> &[Question] {
        &self.placeholder
    }
}

fn validate_questions(course_id: u32, questions: &[Question]) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for question in questions {
        if !seen.insert(question.id) {
            return Err(ContentError::DuplicateQuestionId {
                course_id,
                question_id: question.id,
            });
        }
        if question.has_options() && !question.options().contains(&question.correct_answer) {
            return Err(ContentError::AnswerNotInOptions {
                course_id,
                question_id: question.id,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionKind;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        let ids: Vec<u32> = catalog.courses().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        for id in 1..=3 {
            assert!(catalog.has_lesson(id));
            assert_eq!(catalog.questions_for(id).len(), 5);
        }
        assert_eq!(catalog.placeholder().len(), 5);
    }

    #[test]
    fn test_courses_without_lessons_use_placeholder() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.has_lesson(4));
        assert_eq!(catalog.questions_for(4), catalog.placeholder());
        assert_eq!(catalog.questions_for(5), catalog.placeholder());
    }

    #[test]
    fn test_unknown_course_falls_back() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.questions_for(999), catalog.placeholder());
        assert_eq!(catalog.placeholder()[0].correct_answer, "Option A");

        let course = catalog.course(999);
        assert_eq!(course.id, 999);
        assert_eq!(course.title, "Practice");
    }

    #[test]
    fn test_first_english_question() {
        let catalog = Catalog::builtin().unwrap();
        let q = &catalog.questions_for(1)[0];
        assert_eq!(q.kind, QuestionKind::MultipleChoice);
        assert_eq!(q.correct_answer, "Привет");
        assert_eq!(q.options().len(), 4);
        assert_eq!(catalog.questions_for(1)[1].kind, QuestionKind::Translation);
    }

    #[test]
    fn test_empty_placeholder_rejected() {
        let err = Catalog::from_json_str(r#"{"courses":[],"placeholder":[]}"#).unwrap_err();
        assert!(matches!(err, ContentError::EmptyPlaceholder));
    }

    #[test]
    fn test_empty_lesson_rejected() {
        let json = r#"{
            "courses": [],
            "lessons": [{"course_id": 7, "questions": []}],
            "placeholder": [{"id":1,"kind":"translation","prompt":"p","correct_answer":"a"}]
        }"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, ContentError::EmptyLesson { course_id: 7 }));
    }

    #[test]
    fn test_duplicate_question_ids_rejected() {
        let json = r#"{
            "courses": [],
            "lessons": [{"course_id": 2, "questions": [
                {"id":1,"kind":"translation","prompt":"p","correct_answer":"a"},
                {"id":1,"kind":"translation","prompt":"q","correct_answer":"b"}
            ]}],
            "placeholder": [{"id":1,"kind":"translation","prompt":"p","correct_answer":"a"}]
        }"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            ContentError::DuplicateQuestionId {
                course_id: 2,
                question_id: 1
            }
        ));
    }

    #[test]
    fn test_correct_answer_must_be_an_option() {
        let json = r#"{
            "courses": [],
            "placeholder": [
                {"id":3,"kind":"multiple-choice","prompt":"p","options":["x","y"],"correct_answer":"z"}
            ]
        }"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            ContentError::AnswerNotInOptions { question_id: 3, .. }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Catalog::from_json_str("[").unwrap_err();
        assert!(matches!(err, ContentError::Parse(_)));
    }
}
