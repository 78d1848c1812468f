use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
};

// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn display_width(text: &str) -> usize {
    Span::raw(text).width()
}

/// Shorten `text` to `max` terminal columns, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let budget = max - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let width = display_width(ch.encode_utf8(&mut [0; 4]));
        if used + width > budget {
            break;
        }
        used += width;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_sits_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, parent);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 20);
        assert_eq!(inner.y, 15);
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("useState counter", 20), "useState counter");
        assert_eq!(truncate("useState counter", 6), "useSt…");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abc", 1), "…");
    }

    #[test]
    fn truncate_measures_wide_characters_by_column() {
        assert_eq!(truncate("日本語", 6), "日本語");
        // Two double-width glyphs plus the ellipsis fill five columns
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
        assert_eq!(truncate("日本語テキスト", 4), "日…");
        assert!(display_width(&truncate("日本語テキスト", 4)) <= 4);
    }
}
