use crate::app::{App, LessonResult};
use crate::ui::layout::calculate_dashboard_chunks;
use crate::ui::sessions::format_result_date;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn format_result_item(result: &LessonResult) -> String {
    format!(
        "{} - {} {} (+{} XP, {}/{} correct)",
        format_result_date(&result.finished_at),
        result.course_icon,
        result.course_title,
        result.earned_xp,
        result.correct_answers,
        result.total_questions
    )
}

pub fn draw_dashboard(f: &mut Frame, app: &App) {
    let layout = calculate_dashboard_chunks(f.area());

    let header_text = vec![
        Line::from(Span::styled(
            "Lingo Lessons",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("⚡ {} XP", app.progress.total_xp),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from("   "),
            Span::from(format!(
                "Lessons completed: {}",
                app.progress.lessons_completed
            )),
        ]),
    ];
    let header = Paragraph::new(header_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let course_items: Vec<ListItem> = if app.courses().is_empty() {
        vec![ListItem::new("No courses available").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        app.courses()
            .iter()
            .enumerate()
            .map(|(i, course)| {
                let mut spans = vec![Span::from(format!("{} {}", course.icon, course.title))];
                if !app.catalog.has_lesson(course.id) {
                    spans.push(Span::styled(
                        "  (practice set)",
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                if !course.description.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", truncate_string(&course.description, 50)),
                        Style::default().fg(Color::Gray),
                    ));
                }

                let style = if i == app.selected_course {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(spans)).style(style)
            })
            .collect()
    };

    let course_list = List::new(course_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Courses"),
    );
    f.render_widget(course_list, layout.courses_area);

    let history_items: Vec<ListItem> = if app.progress.history.is_empty() {
        vec![ListItem::new("No lessons completed yet").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        app.progress
            .history
            .iter()
            .map(|result| ListItem::new(format_result_item(result)))
            .collect()
    };

    let history = List::new(history_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Recent Lessons"),
    );
    f.render_widget(history, layout.history_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "↑/↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Choose Course  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Start Lesson  "),
        Span::styled(
            "q/Esc/Ctrl+C",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
