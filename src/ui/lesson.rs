use crate::app::ActiveLesson;
use crate::models::Question;
use crate::session::LessonSession;
use crate::ui::completion::{draw_completion, hearts_display};
use crate::ui::layout::{calculate_lesson_chunks, LessonLayout};
use crate::utils::calculate_wrapped_cursor_position;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn draw_lesson(f: &mut Frame, lesson: &ActiveLesson) {
    let layout = calculate_lesson_chunks(f.area());
    let session = &lesson.session;

    draw_header(f, &layout, session);
    draw_progress(f, &layout, session);

    if session.is_completed() {
        draw_completion(f, session);
        return;
    }

    let Some(question) = session.current_question() else {
        return;
    };

    let mut prompt = Text::default();
    prompt.push_line(Line::from(Span::styled(
        question.kind.label(),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )));
    prompt.push_line(Line::from(question.prompt.as_str()));
    let prompt = Paragraph::new(prompt)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(prompt, layout.question_area);

    if question.has_options() {
        draw_options(f, &layout, session, question);
    } else {
        draw_text_answer(f, &layout, lesson);
    }

    draw_feedback(f, &layout, session, question);
    draw_help(f, &layout, lesson);
}

fn draw_header(f: &mut Frame, layout: &LessonLayout, session: &LessonSession) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(layout.header_area);

    let title = Paragraph::new(format!(
        "{} {}",
        session.course().icon,
        session.course().title
    ))
    .style(key_style())
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, header_chunks[0]);

    let hearts = Paragraph::new(hearts_display(session.hearts(), session.max_hearts()))
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Hearts"));
    f.render_widget(hearts, header_chunks[1]);
}

fn draw_progress(f: &mut Frame, layout: &LessonLayout, session: &LessonSession) {
    let progress_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22),
            Constraint::Min(10),
            Constraint::Length(14),
        ])
        .split(layout.progress_area);

    let position = Paragraph::new(format!(
        "Question {} of {}",
        session.question_index() + 1,
        session.question_count()
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(position, progress_chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(session.progress_percent().min(100));
    f.render_widget(gauge, progress_chunks[1]);

    let xp = session.earned_xp().unwrap_or(session.score());
    let badge = Paragraph::new(format!("⚡ {} XP", xp))
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(badge, progress_chunks[2]);
}

fn draw_options(f: &mut Frame, layout: &LessonLayout, session: &LessonSession, question: &Question) {
    let selected = session.selected_answer();
    let checked = session.feedback_visible();

    let items: Vec<ListItem> = question
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let is_selected = selected == Some(option.as_str());
            let is_correct = *option == question.correct_answer;

            let (marker, style) = if checked && is_correct {
                (
                    "✓",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
            } else if checked && is_selected {
                (
                    "✗",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )
            } else if checked {
                (" ", Style::default().fg(Color::DarkGray))
            } else if is_selected {
                (
                    "▶",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default())
            };

            ListItem::new(format!("{} {}. {}", marker, i + 1, option)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Choose an answer"),
    );
    f.render_widget(list, layout.answer_area);
}

fn draw_text_answer(f: &mut Frame, layout: &LessonLayout, lesson: &ActiveLesson) {
    let session = &lesson.session;
    let answering = !session.feedback_visible();

    let content = if lesson.input_buffer.is_empty() && answering {
        Text::from(Span::styled(
            "[Type your answer here...]",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(lesson.input_buffer.as_str())
    };

    let style = match session.last_answer_correct() {
        Some(true) => Style::default().fg(Color::Green),
        Some(false) => Style::default().fg(Color::Red),
        None => Style::default(),
    };

    let answer = Paragraph::new(content)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Your Answer"));
    f.render_widget(answer, layout.answer_area);

    if answering {
        let text_width = layout.answer_area.width.saturating_sub(2) as usize;
        let (cursor_line, cursor_col) = calculate_wrapped_cursor_position(
            &lesson.input_buffer,
            lesson.cursor_position,
            text_width,
        );
        let cursor_x = layout.answer_area.x + 1 + cursor_col as u16;
        let cursor_y = layout.answer_area.y + 1 + cursor_line as u16;
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

fn draw_feedback(f: &mut Frame, layout: &LessonLayout, session: &LessonSession, question: &Question) {
    let text = match session.last_answer_correct() {
        Some(true) => Text::from(vec![
            Line::from(Span::styled(
                "Correct!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("+{} XP", session.points_per_correct()),
                Style::default().fg(Color::Yellow),
            )),
        ]),
        Some(false) => Text::from(vec![
            Line::from(Span::styled(
                "Not quite.",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Correct answer: {}", question.correct_answer)),
        ]),
        None => Text::default(),
    };

    let feedback = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(feedback, layout.feedback_area);
}

fn draw_help(f: &mut Frame, layout: &LessonLayout, lesson: &ActiveLesson) {
    let session = &lesson.session;
    let mut spans = Vec::new();

    if session.feedback_visible() {
        let next = if session.is_last_question() {
            " Finish  "
        } else {
            " Continue  "
        };
        spans.extend([Span::styled("Enter", key_style()), Span::from(next)]);
    } else {
        if lesson.has_options() {
            spans.extend([
                Span::styled("↑/↓ 1-9", key_style()),
                Span::from(" Select  "),
            ]);
        } else {
            spans.extend([
                Span::styled("←/→", key_style()),
                Span::from(" Move Cursor  "),
            ]);
        }
        if session.can_check() {
            spans.extend([Span::styled("Enter", key_style()), Span::from(" Check  ")]);
        }
    }
    spans.extend([
        Span::styled("Esc", key_style()),
        Span::from(" Quit Lesson  "),
        Span::styled("Ctrl+C", key_style()),
        Span::from(" Exit App"),
    ]);

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit Lesson")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new(vec![
        Line::from("Leave this lesson?"),
        Line::from("XP from an unfinished lesson is not kept."),
    ])
    .style(Style::default().fg(Color::White))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Back to Courses)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Lesson)  "),
        Span::styled("Ctrl+C", key_style()),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
