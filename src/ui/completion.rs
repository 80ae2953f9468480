use crate::session::LessonSession;
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Summary shown between the last answer and the completion handoff.
pub fn draw_completion(f: &mut Frame, session: &LessonSession) {
    let area = centered_rect(60, 12, f.area());
    f.render_widget(Clear, area);

    let earned_xp = session.earned_xp().unwrap_or(0);

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        "Lesson Complete!",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(format!(
        "{} {}",
        session.course().icon,
        session.course().title
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        format!("+{} XP", earned_xp),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(format!(
        "Correct answers: {} of {}",
        session.correct_answers(),
        session.question_count()
    )));
    text.push_line(Line::from(format!(
        "Hearts left: {}",
        hearts_display(session.hearts(), session.max_hearts())
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(vec![
        Span::styled(
            "Enter/Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Back to Courses"),
    ]));

    let summary = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
    f.render_widget(summary, area);
}

pub fn hearts_display(hearts: u8, max_hearts: u8) -> String {
    let lost = max_hearts.saturating_sub(hearts);
    format!(
        "{}{}",
        "♥".repeat(usize::from(hearts)),
        "♡".repeat(usize::from(lost))
    )
}
