use crate::app::App;
use crate::config::AppConfig;
use crate::content::Catalog;
use crate::models::AppState;
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn app() -> App {
    App::new(Catalog::builtin().unwrap(), AppConfig::default())
}

fn render(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn buffer_text(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_dashboard_lists_courses_and_totals() {
    let screen = render(&app(), 100, 30);

    assert!(screen.contains("Lingo Lessons"));
    assert!(screen.contains("0 XP"));
    assert!(screen.contains("Lessons completed: 0"));
    for title in ["English", "Mathematics", "Physics", "Spanish", "French"] {
        assert!(screen.contains(title), "missing course {}", title);
    }
    assert!(screen.contains("(practice set)"));
    assert!(screen.contains("No lessons completed yet"));
}

#[test]
fn test_lesson_screen_shows_question_and_position() {
    let mut app = app();
    app.handle_key(key(KeyCode::Enter));
    let screen = render(&app, 100, 30);

    assert!(screen.contains("Question 1 of 5"));
    assert!(screen.contains("Multiple choice"));
    assert!(screen.contains("Hello"));
    assert!(screen.contains("1. Привет"));
    assert!(screen.contains("4. Пожалуйста"));
    assert!(screen.contains("♥♥♥"));
}

#[test]
fn test_check_is_offered_only_after_selection() {
    let mut app = app();
    app.handle_key(key(KeyCode::Enter));
    assert!(!render(&app, 100, 30).contains("Check"));

    app.handle_key(key(KeyCode::Char('2')));
    assert!(render(&app, 100, 30).contains("Check"));
}

#[test]
fn test_wrong_answer_reveals_correct_one() {
    let mut app = app();
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Char('2')));
    app.handle_key(key(KeyCode::Enter));
    let screen = render(&app, 100, 30);

    assert!(screen.contains("Correct answer: Привет"));
    assert!(screen.contains("♥♥♡"));
    assert!(screen.contains("Continue"));
}

#[test]
fn test_correct_answer_shows_points() {
    let mut app = app();
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Char('1')));
    app.handle_key(key(KeyCode::Enter));
    let screen = render(&app, 100, 30);

    assert!(screen.contains("Correct!"));
    assert!(screen.contains("+10 XP"));
}

#[tokio::test(start_paused = true)]
async fn test_completion_summary_then_dashboard() {
    let mut app = app();
    app.handle_key(key(KeyCode::Enter));
    for pick in ['1', '2', '1', '1', '1'] {
        app.handle_key(key(KeyCode::Char(pick)));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
    }

    // Four correct and one heart lost: 40 + 2 * 5.
    let screen = render(&app, 100, 30);
    assert!(screen.contains("Lesson Complete!"));
    assert!(screen.contains("+50 XP"));
    assert!(screen.contains("Correct answers: 4 of 5"));

    tokio::time::sleep(std::time::Duration::from_millis(3001)).await;
    app.process_events();
    assert_eq!(app.state, AppState::Dashboard);

    let screen = render(&app, 120, 30);
    assert!(screen.contains("50 XP"));
    assert!(screen.contains("Lessons completed: 1"));
    assert!(screen.contains("4/5 correct"));
}

#[test]
fn test_quit_confirmation_screen() {
    let mut app = app();
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Esc));
    let screen = render(&app, 100, 30);

    assert!(screen.contains("Quit Lesson"));
    assert!(screen.contains("Continue Lesson"));
}

#[test]
fn test_free_text_question_renders_input() {
    let catalog = Catalog::from_json_str(
        r#"{
            "courses": [{"id": 9, "title": "Typing", "icon": "T"}],
            "lessons": [{"course_id": 9, "questions": [
                {"id": 1, "kind": "translation", "prompt": "Translate \"Yes\"", "correct_answer": "Да"}
            ]}],
            "placeholder": [{"id": 1, "kind": "translation", "prompt": "p", "correct_answer": "a"}]
        }"#,
    )
    .unwrap();
    let mut app = App::new(catalog, AppConfig::default());
    app.handle_key(key(KeyCode::Enter));
    assert!(render(&app, 80, 30).contains("[Type your answer here...]"));

    app.handle_key(key(KeyCode::Char('Д')));
    app.handle_key(key(KeyCode::Char('а')));
    let screen = render(&app, 80, 30);
    assert!(screen.contains("Да"));
    assert!(screen.contains("Check"));
}

#[test]
fn test_small_terminal_does_not_panic() {
    let mut app = app();
    render(&app, 20, 8);
    app.handle_key(key(KeyCode::Enter));
    render(&app, 20, 8);
    app.handle_key(key(KeyCode::Esc));
    render(&app, 20, 8);
}
