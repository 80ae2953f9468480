use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct DashboardLayout {
    pub header_area: Rect,
    pub courses_area: Rect,
    pub history_area: Rect,
    pub help_area: Rect,
}

pub struct LessonLayout {
    pub header_area: Rect,
    pub progress_area: Rect,
    pub question_area: Rect,
    pub answer_area: Rect,
    pub feedback_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_dashboard_chunks(area: Rect) -> DashboardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(7),
            Constraint::Length(3),
        ])
        .split(area);

    DashboardLayout {
        header_area: chunks[0],
        courses_area: chunks[1],
        history_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_lesson_chunks(area: Rect) -> LessonLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(4),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(area);

    LessonLayout {
        header_area: chunks[0],
        progress_area: chunks[1],
        question_area: chunks[2],
        answer_area: chunks[3],
        feedback_area: chunks[4],
        help_area: chunks[5],
    }
}

/// A box `percent_x` wide and `height` rows tall, centred in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
