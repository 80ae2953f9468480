use unicode_width::UnicodeWidthChar;

/// Truncates to `max_len` characters, ending with "..." when shortened.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Byte offset of the `char_pos`-th character, clamped to the end of `text`.
pub fn byte_index(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Simulate how text wraps with trimming (matching ratatui Wrap { trim: true } behavior)
/// Handles both explicit newlines (\n) and automatic wrapping at max_width
/// Returns (line_text, start, end) for each visual line, in character positions
fn simulate_wrapped_lines(text: &str, max_width: usize) -> Vec<(String, usize, usize)> {
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;
    let mut line_start = 0;
    let mut char_count = 0;

    for (pos, ch) in text.chars().enumerate() {
        char_count = pos + 1;
        if ch == '\n' {
            let trimmed = current_line.trim_end().to_string();
            lines.push((trimmed, line_start, pos));

            current_line = String::new();
            current_width = 0;
            line_start = pos + 1;
        } else {
            let char_width = ch.width().unwrap_or(1);

            if current_width + char_width > max_width && current_width > 0 {
                let trimmed = current_line.trim_end().to_string();
                lines.push((trimmed, line_start, pos));

                current_line = ch.to_string();
                current_width = char_width;
                line_start = pos;
            } else {
                current_line.push(ch);
                current_width += char_width;
            }
        }
    }

    if !current_line.is_empty() || text.ends_with('\n') {
        let trimmed = current_line.trim_end().to_string();
        lines.push((trimmed, line_start, char_count));
    }

    lines
}

/// Line and column of a cursor (a character position) within wrapped text.
pub fn calculate_wrapped_cursor_position(
    text: &str,
    cursor_pos: usize,
    max_width: usize,
) -> (usize, usize) {
    if text.is_empty() || cursor_pos == 0 {
        return (0, 0);
    }

    let wrapped_lines = simulate_wrapped_lines(text, max_width);

    for (line_idx, (_, start, end)) in wrapped_lines.iter().enumerate() {
        if cursor_pos >= *start && cursor_pos <= *end {
            return (line_idx, cursor_pos.saturating_sub(*start));
        }
    }

    // Cursor is beyond the last line or in trimmed space
    if let Some((last_text, _, last_end)) = wrapped_lines.last()
        && cursor_pos >= *last_end
    {
        return (
            wrapped_lines.len().saturating_sub(1),
            last_text.chars().count(),
        );
    }

    (0, 0)
}
