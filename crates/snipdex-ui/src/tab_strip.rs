use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use snipdex_core::{Catalog, ScrollViewport};

const SEPARATOR: &str = "│";

/// Horizontally scrollable row of category tabs.
///
/// Offsets are measured in terminal columns from the start of the tab
/// content. `area` is the inner row the labels are drawn on, updated every
/// frame from the layout.
pub struct TabStrip {
    labels: Vec<String>,
    area: Rect,
    scroll: f64,
    // Tab to reveal once the strip has been laid out
    pending_reveal: Option<usize>,
}

impl TabStrip {
    pub fn new(catalog: &Catalog) -> Self {
        TabStrip {
            labels: catalog
                .iter()
                .map(|category| format!(" {} ", category.name))
                .collect(),
            area: Rect::default(),
            scroll: 0.0,
            pending_reveal: None,
        }
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        // Re-clamp after a resize
        let scroll = self.scroll;
        self.set_scroll_offset(scroll);
        if area.width > 0 {
            if let Some(index) = self.pending_reveal.take() {
                self.ensure_visible(index);
            }
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x.saturating_add(self.area.width)
            && row >= self.area.y
            && row < self.area.y.saturating_add(self.area.height)
    }

    fn label_width(label: &str) -> usize {
        Span::raw(label).width()
    }

    /// Start and end column of each tab within the content
    fn spans(&self) -> Vec<(usize, usize)> {
        let separator = Self::label_width(SEPARATOR);
        let mut start = 0;
        self.labels
            .iter()
            .map(|label| {
                let end = start + Self::label_width(label);
                let span = (start, end);
                start = end + separator;
                span
            })
            .collect()
    }

    pub fn content_width(&self) -> usize {
        self.spans().last().map(|&(_, end)| end).unwrap_or(0)
    }

    pub fn max_scroll(&self) -> f64 {
        self.content_width()
            .saturating_sub(self.area.width as usize) as f64
    }

    /// Whole-column scroll used for rendering
    pub fn column_offset(&self) -> u16 {
        self.scroll.round() as u16
    }

    /// Tab under the given screen column, if any
    pub fn tab_at(&self, column: u16) -> Option<usize> {
        if column < self.area.x || column >= self.area.x.saturating_add(self.area.width) {
            return None;
        }
        let content_x = (column - self.area.x) as usize + self.column_offset() as usize;
        self.spans()
            .iter()
            .position(|&(start, end)| content_x >= start && content_x < end)
    }

    /// Scroll just far enough that tab `index` is fully visible
    pub fn ensure_visible(&mut self, index: usize) {
        if self.area.width == 0 {
            self.pending_reveal = Some(index);
            return;
        }
        let Some(&(start, end)) = self.spans().get(index) else {
            return;
        };
        let width = self.area.width as f64;
        let (start, end) = (start as f64, end as f64);
        if start < self.scroll {
            self.set_scroll_offset(start);
        } else if end > self.scroll + width {
            self.set_scroll_offset(end - width);
        }
    }

    /// Shift the strip by `columns`, as a wheel does
    pub fn nudge(&mut self, columns: f64) {
        let scroll = self.scroll + columns;
        self.set_scroll_offset(scroll);
    }

    pub fn widget(&self, active: usize, dragging: bool) -> Paragraph<'static> {
        let mut spans = Vec::with_capacity(self.labels.len() * 2);
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
            }
            let style = if i == active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(label.clone(), style));
        }

        let title = if dragging { " Categories (dragging) " } else { " Categories " };
        Paragraph::new(Line::from(spans))
            .scroll((0, self.column_offset()))
            .block(Block::default().borders(Borders::ALL).title(title))
    }
}

impl ScrollViewport for TabStrip {
    fn left_offset(&self) -> f64 {
        self.area.x as f64
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll = offset.clamp(0.0, self.max_scroll());
    }
}
