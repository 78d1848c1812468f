use crate::common::{centered_rect, truncate};
use crate::session::{CrosstermTerminal, TerminalSession};
use crate::tab_strip::TabStrip;
use chrono::Local;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use snipdex_core::{
    copy_snippet, open_url, Catalog, Category, Config, DragScrollController,
    EndReason, GestureEvent, GestureListeners, PointerKind, Result, ScrollViewport, Snippet,
    Subscription, SystemClipboard,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const RENDER_INTERVAL: Duration = Duration::from_millis(33);
const STATUS_TTL: Duration = Duration::from_secs(3);
const WHEEL_STEP: f64 = 4.0;

struct Status {
    text: String,
    color: Color,
    shown_at: Instant,
}

/// Pointer press on the tab strip that has not been released yet
struct Press {
    column: u16,
    moved: bool,
}

struct BrowserState<'a> {
    catalog: &'a Catalog,
    active: usize,
    selected: usize,
    tabs: TabStrip,
    snippet_list_area: Rect,
    listeners: GestureListeners,
    drag: Rc<RefCell<DragScrollController>>,
    press: Option<Press>,
    pointer_in_strip: bool,
    clipboard: Option<SystemClipboard>,
    status: Option<Status>,
    show_help: bool,
    exiting: bool,
}

impl<'a> BrowserState<'a> {
    fn new(catalog: &'a Catalog, config: &Config, initial: usize) -> Self {
        let mut state = BrowserState {
            catalog,
            active: 0,
            selected: 0,
            tabs: TabStrip::new(catalog),
            snippet_list_area: Rect::default(),
            listeners: GestureListeners::new(),
            drag: Rc::new(RefCell::new(DragScrollController::from_config(config))),
            press: None,
            pointer_in_strip: false,
            clipboard: None,
            status: None,
            show_help: false,
            exiting: false,
        };
        state.select_category(initial.min(catalog.len().saturating_sub(1)));
        state
    }

    /// Attach the drag controller to the window-level gesture events
    fn mount(&self) -> Subscription {
        self.listeners.subscribe(Rc::clone(&self.drag))
    }

    fn category(&self) -> Option<&'a Category> {
        self.catalog.category_at(self.active)
    }

    fn snippet(&self) -> Option<&'a Snippet> {
        self.category()
            .and_then(|category| category.snippets.get(self.selected))
    }

    fn select_category(&mut self, index: usize) {
        if index >= self.catalog.len() {
            return;
        }
        if index != self.active {
            tracing::debug!(category = index, "switched category");
        }
        self.active = index;
        self.selected = 0;
        self.tabs.ensure_visible(index);
    }

    fn next_category(&mut self) {
        let next = (self.active + 1) % self.catalog.len();
        self.select_category(next);
    }

    fn previous_category(&mut self) {
        let previous = if self.active == 0 {
            self.catalog.len() - 1
        } else {
            self.active - 1
        };
        self.select_category(previous);
    }

    fn select_snippet(&mut self, up: bool) {
        let count = self.category().map(|c| c.snippets.len()).unwrap_or(0);
        if count == 0 {
            return;
        }
        if up {
            self.selected = self.selected.saturating_sub(1);
        } else if self.selected + 1 < count {
            self.selected += 1;
        }
    }

    fn set_status(&mut self, text: String, color: Color) {
        self.status = Some(Status {
            text,
            color,
            shown_at: Instant::now(),
        });
    }

    fn copy_selected(&mut self) {
        let Some(snippet) = self.snippet() else {
            return;
        };
        if self.clipboard.is_none() {
            match SystemClipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    tracing::warn!("Clipboard unavailable: {}", e);
                    self.set_status(format!("{}", e), Color::Red);
                    return;
                }
            }
        }
        let result = match self.clipboard.as_mut() {
            Some(clipboard) => copy_snippet(clipboard, snippet),
            None => return,
        };
        match result {
            Ok(()) => self.set_status(
                format!(
                    "Copied \"{}\" at {}",
                    snippet.title,
                    Local::now().format("%H:%M:%S")
                ),
                Color::Green,
            ),
            Err(e) => {
                tracing::warn!("Copy failed: {}", e);
                self.set_status(format!("{}", e), Color::Red);
            }
        }
    }

    fn open_docs(&mut self) {
        let Some(category) = self.category() else {
            return;
        };
        match open_url(&category.docs_url) {
            Ok(()) => self.set_status(format!("Opened {}", category.docs_url), Color::Cyan),
            Err(e) => {
                tracing::warn!("Failed to open docs: {}", e);
                self.set_status(format!("{}", e), Color::Red);
            }
        }
    }

    fn dispatch(&mut self, event: GestureEvent) {
        if let Some(&offset) = self.listeners.dispatch(&event).last() {
            self.tabs.set_scroll_offset(offset);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.show_help {
            self.show_help = false;
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.exiting = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.exiting = true,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.next_category(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.previous_category(),
            KeyCode::Up | KeyCode::Char('k') => self.select_snippet(true),
            KeyCode::Down | KeyCode::Char('j') => self.select_snippet(false),
            KeyCode::Enter | KeyCode::Char('c') => self.copy_selected(),
            KeyCode::Char('o') => self.open_docs(),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    /// Translate terminal mouse reports into gesture notifications.
    ///
    /// Press on the strip starts a gesture. Drag reports are observed
    /// everywhere, release anywhere ends the gesture, and so does the pointer
    /// leaving the strip. While the help popup is open a press only closes it.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help {
            if let MouseEventKind::Down(_) = mouse.kind {
                self.show_help = false;
            }
            return;
        }
        let inside = self.tabs.contains(mouse.column, mouse.row);
        let left_strip = self.pointer_in_strip && !inside;
        self.pointer_in_strip = inside;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.press = Some(Press {
                    column: mouse.column,
                    moved: false,
                });
                self.dispatch(GestureEvent::Start {
                    kind: PointerKind::Mouse,
                    pointer_x: mouse.column as f64,
                    container_left: self.tabs.left_offset(),
                    scroll_offset: self.tabs.scroll_offset(),
                });
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.click_snippet_list(mouse.column, mouse.row);
            }
            MouseEventKind::Drag(MouseButton::Left) if left_strip => {
                self.press = None;
                self.dispatch(GestureEvent::End(EndReason::PointerLeave));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(press) = self.press.as_mut() {
                    press.moved |= press.column != mouse.column;
                }
                self.dispatch(GestureEvent::Move {
                    kind: PointerKind::Mouse,
                    pointer_x: mouse.column as f64,
                    container_left: self.tabs.left_offset(),
                });
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(press) = self.press.take() {
                    if !press.moved {
                        if let Some(index) = self.tabs.tab_at(mouse.column) {
                            self.select_category(index);
                        }
                    }
                }
                self.dispatch(GestureEvent::End(EndReason::PointerUp));
            }
            MouseEventKind::Moved if left_strip => {
                self.press = None;
                self.dispatch(GestureEvent::End(EndReason::PointerLeave));
            }
            MouseEventKind::ScrollLeft | MouseEventKind::ScrollUp if inside => {
                self.tabs.nudge(-WHEEL_STEP);
            }
            MouseEventKind::ScrollRight | MouseEventKind::ScrollDown if inside => {
                self.tabs.nudge(WHEEL_STEP);
            }
            MouseEventKind::ScrollUp => self.select_snippet(true),
            MouseEventKind::ScrollDown => self.select_snippet(false),
            _ => {}
        }
    }

    fn click_snippet_list(&mut self, column: u16, row: u16) {
        let area = self.snippet_list_area;
        let inner_top = area.y + 1;
        if column <= area.x
            || column >= area.x + area.width.saturating_sub(1)
            || row < inner_top
            || row >= area.y + area.height.saturating_sub(1)
        {
            return;
        }
        let index = (row - inner_top) as usize;
        let count = self.category().map(|c| c.snippets.len()).unwrap_or(0);
        if index < count {
            self.selected = index;
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::FocusLost => {
                self.press = None;
                self.pointer_in_strip = false;
                self.dispatch(GestureEvent::End(EndReason::FocusLost));
            }
            _ => {}
        }
    }

    fn expire_status(&mut self) -> bool {
        match &self.status {
            Some(status) if status.shown_at.elapsed() >= STATUS_TTL => {
                self.status = None;
                true
            }
            _ => false,
        }
    }
}

/// Display the catalog browser, starting on `initial_category` when given
pub fn display_catalog_browser(
    catalog: &Catalog,
    config: &Config,
    initial_category: Option<&str>,
) -> Result<()> {
    let initial = match initial_category {
        Some(id) => catalog
            .position(id)
            .ok_or_else(|| snipdex_core::SnipdexError::category_not_found(id))?,
        None => 0,
    };

    let mut session = TerminalSession::enter()?;
    let mut state = BrowserState::new(catalog, config, initial);
    let _subscription = state.mount();

    let result = run_browser(session.terminal(), &mut state);
    if let Err(e) = &result {
        tracing::error!("Browser exited with error: {}", e);
    }
    result
}

fn run_browser(terminal: &mut CrosstermTerminal, state: &mut BrowserState<'_>) -> Result<()> {
    let mut last_render = Instant::now();
    let mut force_render = true;

    while !state.exiting {
        let now = Instant::now();
        if state.expire_status() {
            force_render = true;
        }
        if force_render || now.duration_since(last_render) >= RENDER_INTERVAL {
            draw(terminal, state)?;
            last_render = now;
            force_render = false;
        }

        // Handle input with a timeout to prevent excessive CPU usage
        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            state.handle_event(event);
            force_render = true;
        }
    }

    Ok(())
}

fn draw(terminal: &mut CrosstermTerminal, state: &mut BrowserState<'_>) -> Result<()> {
    terminal.draw(|f| {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Tab strip
                Constraint::Length(5), // Category header
                Constraint::Min(6),    // Snippets
                Constraint::Length(1), // Status / help
            ])
            .split(size);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("snipdex v{}", env!("CARGO_PKG_VERSION")),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  code snippets at hand",
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let strip_block = Block::default().borders(Borders::ALL);
        state.tabs.set_area(strip_block.inner(chunks[1]));
        let dragging = state.drag.borrow().is_dragging();
        f.render_widget(state.tabs.widget(state.active, dragging), chunks[1]);

        if let Some(category) = state.category() {
            f.render_widget(category_header(category), chunks[2]);

            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(chunks[3]);
            state.snippet_list_area = body[0];

            let title_width = body[0].width.saturating_sub(4) as usize;
            let items: Vec<ListItem> = category
                .snippets
                .iter()
                .enumerate()
                .map(|(i, snippet)| {
                    let is_selected = i == state.selected;
                    let marker = if is_selected { "> " } else { "  " };
                    let style = if is_selected {
                        Style::default()
                            .fg(Color::Yellow)
                            .bg(Color::DarkGray)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(marker, style),
                        Span::styled(truncate(&snippet.title, title_width), style),
                    ]))
                })
                .collect();
            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} snippets ", category.snippets.len())),
            );
            f.render_widget(list, body[0]);

            if let Some(snippet) = state.snippet() {
                f.render_widget(snippet_view(snippet), body[1]);
            }
        }

        let footer = match &state.status {
            Some(status) => Paragraph::new(status.text.clone())
                .style(Style::default().fg(status.color))
                .alignment(Alignment::Center),
            None => Paragraph::new(
                "←/→: Category | ↑/↓: Snippet | Enter/c: Copy | o: Docs | drag tabs to scroll | ?: Help | q: Quit",
            )
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        };
        f.render_widget(footer, chunks[4]);

        if state.show_help {
            let area = centered_rect(60, 50, size);
            f.render_widget(Clear, area);
            f.render_widget(help_popup(), area);
        }
    })?;
    Ok(())
}

fn category_header(category: &Category) -> Paragraph<'static> {
    let mut lines = vec![
        Line::from(Span::raw(category.description.clone())),
        Line::from(vec![
            Span::styled("Docs: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                category.docs_url.clone(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
    ];
    if !category.tutorials.is_empty() {
        let mut spans = vec![Span::styled("Tutorials: ", Style::default().fg(Color::Yellow))];
        for (i, tutorial) in category.tutorials.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" · "));
            }
            spans.push(Span::styled(
                format!("{} <{}>", tutorial.title, tutorial.url),
                Style::default().fg(Color::Gray),
            ));
        }
        lines.push(Line::from(spans));
    }

    Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", category.name)),
    )
}

fn snippet_view(snippet: &Snippet) -> Paragraph<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            snippet.description.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];
    lines.extend(snippet.code.lines().map(|line| {
        Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::Green),
        ))
    }));

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} [{}] ", snippet.title, snippet.language)),
    )
}

fn help_popup() -> Paragraph<'static> {
    let entry = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:<14}", keys), Style::default().fg(Color::Yellow)),
            Span::raw(action),
        ])
    };
    Paragraph::new(vec![
        entry("←/→ h/l Tab", "Previous / next category"),
        entry("↑/↓ k/j", "Previous / next snippet"),
        entry("Enter c", "Copy snippet to clipboard"),
        entry("o", "Open category documentation"),
        entry("drag tabs", "Scroll the category strip"),
        entry("click tab", "Switch category"),
        entry("q Esc", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Help "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn state(catalog: &Catalog) -> BrowserState<'_> {
        let mut state = BrowserState::new(catalog, &Config::default(), 0);
        state.tabs.set_area(Rect::new(1, 2, 20, 1));
        state
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn drag_on_strip_scrolls_and_release_stops() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = state(&catalog);
        let _subscription = state.mount();

        state.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 15, 2));
        state.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 10, 2));
        assert_eq!(state.tabs.scroll_offset(), 10.0);
        assert_eq!(state.active, 0);

        state.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 10, 2));
        assert!(!state.drag.borrow().is_dragging());
        assert_eq!(state.active, 0);

        state.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 2, 2));
        assert_eq!(state.tabs.scroll_offset(), 10.0);
    }

    #[test]
    fn leaving_strip_ends_drag() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = state(&catalog);
        let _subscription = state.mount();

        state.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 15, 2));
        state.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 2));
        assert_eq!(state.tabs.scroll_offset(), 6.0);

        state.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 9));
        assert!(!state.drag.borrow().is_dragging());

        state.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 2, 2));
        assert_eq!(state.tabs.scroll_offset(), 6.0);
    }

    #[test]
    fn click_without_drag_selects_tab() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = state(&catalog);
        let _subscription = state.mount();

        // " React " occupies columns 1..8, " TypeScript " starts at 9
        state.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 12, 2));
        state.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 12, 2));
        assert_eq!(state.active, 1);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn focus_loss_ends_drag() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = state(&catalog);
        let _subscription = state.mount();

        state.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 15, 2));
        state.handle_event(Event::FocusLost);
        assert!(!state.drag.borrow().is_dragging());
    }

    #[test]
    fn unmounted_browser_ignores_gestures() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = state(&catalog);
        drop(state.mount());

        state.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 15, 2));
        state.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 2));
        assert_eq!(state.tabs.scroll_offset(), 0.0);
    }

    #[test]
    fn keys_move_between_categories_and_snippets() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = state(&catalog);

        state.handle_event(key(KeyCode::Left));
        assert_eq!(state.active, catalog.len() - 1);
        assert_eq!(state.tabs.scroll_offset(), state.tabs.max_scroll());

        state.handle_event(key(KeyCode::Right));
        assert_eq!(state.active, 0);
        assert_eq!(state.tabs.scroll_offset(), 0.0);

        state.handle_event(key(KeyCode::Down));
        state.handle_event(key(KeyCode::Down));
        assert_eq!(state.selected, 2);
        state.handle_event(key(KeyCode::Up));
        assert_eq!(state.selected, 1);

        state.handle_event(key(KeyCode::Char('q')));
        assert!(state.exiting);
    }

    #[test]
    fn help_popup_swallows_mouse_press() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = state(&catalog);
        let _subscription = state.mount();

        state.handle_event(key(KeyCode::Char('?')));
        assert!(state.show_help);

        state.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 12, 2));
        assert!(!state.show_help);
        assert!(!state.drag.borrow().is_dragging());
        state.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 12, 2));
        assert_eq!(state.active, 0);

        state.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 12, 2));
        state.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 12, 2));
        assert_eq!(state.active, 1);
    }

    #[test]
    fn initial_category_is_clamped() {
        let catalog = Catalog::builtin().unwrap();
        let state = BrowserState::new(&catalog, &Config::default(), 999);
        assert_eq!(state.active, catalog.len() - 1);
    }
}
