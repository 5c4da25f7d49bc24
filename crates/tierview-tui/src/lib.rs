// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use std::io;
use std::time::Duration;
use tierview_app::{ListPane, NavCommand, Navigator, PaneRect};
use unicode_width::UnicodeWidthChar;

const KEY_HINTS: &str = "Tab/\u{2190}/\u{2192}: Switch  \u{2191}/\u{2193}: Move  PgUp/PgDn  g/G  q: Quit";
const BREADCRUMB_SEPARATOR: &str = " > ";

/// Colors for pane headers, selected rows and the function bar. Focused and
/// unfocused panes differ only in these styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub header_focus: Style,
    pub header_unfocus: Style,
    pub selection_focus: Style,
    pub selection_unfocus: Style,
    pub function_bar: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_focus: Style::default().fg(Color::Black).bg(Color::Green),
            header_unfocus: Style::default().fg(Color::White).bg(Color::Green),
            selection_focus: Style::default().fg(Color::Black).bg(Color::Cyan),
            selection_unfocus: Style::default().fg(Color::Black).bg(Color::White),
            function_bar: Style::default().fg(Color::Yellow),
        }
    }
}

impl Theme {
    fn header(&self, focused: bool) -> Style {
        if focused {
            self.header_focus
        } else {
            self.header_unfocus
        }
    }

    fn selection(&self, focused: bool) -> Style {
        if focused {
            self.selection_focus
        } else {
            self.selection_unfocus
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Nav(NavCommand),
}

pub fn run_app(navigator: &mut Navigator, theme: &Theme) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    undo_on_error(execute!(stdout, terminal::EnterAlternateScreen), || {
        let _ = disable_raw_mode();
    })
    .context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = undo_on_error(Terminal::new(backend), || {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen);
    })
    .context("create terminal")?;

    let result = event_loop(&mut terminal, navigator, theme);

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    tracing::info!("session ended");
    result
}

/// Runs `undo` when a setup step failed, then hands the result back.
fn undo_on_error<T, E>(step: Result<T, E>, undo: impl FnOnce()) -> Result<T, E> {
    if step.is_err() {
        undo();
    }
    step
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    navigator: &mut Navigator,
    theme: &Theme,
) -> Result<()> {
    let size = terminal.size().context("read terminal size")?;
    navigator.dispatch(NavCommand::Resize(screen_rect(size.width, size.height)));
    tracing::info!(
        categories = navigator.tree().category_count(),
        width = size.width,
        height = size.height,
        "session started"
    );

    loop {
        terminal
            .draw(|frame| render(frame, navigator, theme))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(250)).context("poll event")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key_event(navigator, key) {
                    return Ok(());
                }
            }
            Event::Resize(width, height) => {
                navigator.dispatch(NavCommand::Resize(screen_rect(width, height)));
            }
            _ => {}
        }
    }
}

fn screen_rect(width: u16, height: u16) -> PaneRect {
    PaneRect::new(0, 0, width, height)
}

/// Returns true when the session should end.
fn handle_key_event(navigator: &mut Navigator, key: KeyEvent) -> bool {
    match command_for_key(key) {
        Some(KeyAction::Quit) => true,
        Some(KeyAction::Nav(command)) => {
            let events = navigator.dispatch(command);
            tracing::trace!(?command, ?events, "key dispatched");
            false
        }
        None => false,
    }
}

pub fn command_for_key(key: KeyEvent) -> Option<KeyAction> {
    let nav = |command| Some(KeyAction::Nav(command));
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }
        (KeyCode::Char('q'), _) | (KeyCode::Char('Q'), _) | (KeyCode::Esc, _) => {
            Some(KeyAction::Quit)
        }
        (KeyCode::Tab, _) | (KeyCode::Right, _) | (KeyCode::Char('l'), _) => {
            nav(NavCommand::FocusNext)
        }
        (KeyCode::BackTab, _) | (KeyCode::Left, _) | (KeyCode::Char('h'), _) => {
            nav(NavCommand::FocusPrev)
        }
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => nav(NavCommand::MoveUp),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => nav(NavCommand::MoveDown),
        (KeyCode::PageUp, _) => nav(NavCommand::PageUp),
        (KeyCode::PageDown, _) => nav(NavCommand::PageDown),
        (KeyCode::Home, _) | (KeyCode::Char('g'), _) => nav(NavCommand::Home),
        (KeyCode::End, _) | (KeyCode::Char('G'), _) => nav(NavCommand::End),
        _ => None,
    }
}

pub fn render(frame: &mut ratatui::Frame<'_>, navigator: &Navigator, theme: &Theme) {
    let area = frame.area();
    let focused = navigator.focused();
    for (kind, pane) in navigator.panes() {
        if pane.is_visible() {
            render_pane(frame, area, pane, focused == Some(kind), theme);
        }
    }

    let screen = screen_rect(area.width, area.height);
    if let Some(bar) = navigator.layout().function_bar(screen) {
        let bar = to_rect(bar).intersection(area);
        let text = padded(&function_bar_text(navigator), bar.width);
        frame.render_widget(Paragraph::new(text).style(theme.function_bar), bar);
    }
}

fn render_pane(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    pane: &ListPane,
    focused: bool,
    theme: &Theme,
) {
    let rect = to_rect(pane.rect()).intersection(area);
    if rect.width == 0 || rect.height == 0 {
        return;
    }

    let header = Rect::new(rect.x, rect.y, rect.width, 1);
    frame.render_widget(
        Paragraph::new(padded(pane.title(), rect.width)).style(theme.header(focused)),
        header,
    );

    for (row, (index, item)) in pane.window().enumerate() {
        let y = rect.y + 1 + row as u16;
        if y >= rect.bottom() {
            break;
        }
        let mut line = Paragraph::new(padded(item, rect.width));
        if index == pane.selected() {
            line = line.style(theme.selection(focused));
        }
        frame.render_widget(line, Rect::new(rect.x, y, rect.width, 1));
    }
}

fn to_rect(rect: PaneRect) -> Rect {
    Rect::new(rect.x, rect.y, rect.width, rect.height)
}

/// One column of left padding, and the text clipped so one column stays free
/// on the right.
fn padded(text: &str, width: u16) -> String {
    format!(" {}", clip_to_width(text, usize::from(width.saturating_sub(2))))
}

fn function_bar_text(navigator: &Navigator) -> String {
    let breadcrumb = navigator.breadcrumb().join(BREADCRUMB_SEPARATOR);
    if breadcrumb.is_empty() {
        return KEY_HINTS.to_owned();
    }
    format!("{KEY_HINTS}  |  {breadcrumb}")
}

/// Clips `text` to at most `width` display columns without splitting a
/// double-width glyph. Control characters display as a single space.
pub fn clip_to_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch = if ch.is_control() { ' ' } else { ch };
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out
}
