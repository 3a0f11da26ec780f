//! 终端输入框视图：显示树 → ratatui 行，提及候选列表，状态栏

use crate::core::event::{InputEvent, Key, KeyCode, KeyModifiers};
use crate::models::{DisplayTree, LineSegment, MentionDirectory, MentionEntry};
use crate::services::ComposerConfig;
use crate::session::{EditSession, SessionAction, SessionEffect, SessionState};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use std::sync::Arc;
use std::time::Instant;
use unicode_width::UnicodeWidthChar;

const STATUS_HEIGHT: u16 = 1;
const PICKER_MAX_HEIGHT: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
    Quit,
}

impl EventResult {
    pub fn is_quit(&self) -> bool {
        matches!(self, EventResult::Quit)
    }
}

/// Selected row of the mention picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Picker {
    selected: usize,
}

impl Picker {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    pub fn move_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
    }

    pub fn move_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % len;
    }
}

pub struct ComposerView {
    session: EditSession,
    directory: Arc<MentionDirectory>,
    picker: Picker,
    status: Option<String>,
    submitted: Vec<String>,
    scroll: u16,
    input_area: Option<Rect>,
}

impl ComposerView {
    pub fn new(initial: &str, directory: Arc<MentionDirectory>, config: ComposerConfig) -> Self {
        let session = EditSession::new(initial, directory.clone(), config);
        Self {
            session,
            directory,
            picker: Picker::default(),
            status: None,
            submitted: Vec::new(),
            scroll: 0,
            input_area: None,
        }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn picker(&self) -> Picker {
        self.picker
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn take_submitted(&mut self) -> Vec<String> {
        std::mem::take(&mut self.submitted)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.next_deadline()
    }

    pub fn needs_frame(&self) -> bool {
        self.session.needs_frame()
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.session.tick(now).state_changed
    }

    pub fn on_frame(&mut self) -> bool {
        self.session.on_frame()
    }

    pub fn handle_input(&mut self, event: &InputEvent, now: Instant) -> EventResult {
        match event {
            InputEvent::Key(key) => self.handle_key(*key, now),
            InputEvent::Paste(text) => {
                let result = self
                    .session
                    .dispatch(SessionAction::Paste(Ok(text.clone())), now);
                self.apply_effects(result.effects, now);
                EventResult::Consumed
            }
            InputEvent::Resize(..) => EventResult::Consumed,
        }
    }

    fn handle_key(&mut self, key: Key, now: Instant) -> EventResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return EventResult::Quit,
            KeyCode::Char('s') if ctrl => {
                match self.session.submit() {
                    Ok(result) => self.apply_effects(result.effects, now),
                    Err(error) => self.status = Some(error.to_string()),
                }
                return EventResult::Consumed;
            }
            _ => {}
        }

        let candidates = self.session.candidates().len();
        let picking = self.session.state() == SessionState::MentionSearch && candidates > 0;
        if picking {
            match key.code {
                KeyCode::Up => {
                    self.picker.move_up(candidates);
                    return EventResult::Consumed;
                }
                KeyCode::Down => {
                    self.picker.move_down(candidates);
                    return EventResult::Consumed;
                }
                KeyCode::Enter | KeyCode::Tab if !key.is_shift() => {
                    let selected = self.picker.selected.min(candidates - 1);
                    let entry = self.session.candidates()[selected].clone();
                    let result = self
                        .session
                        .dispatch(SessionAction::SelectMention(entry), now);
                    self.apply_effects(result.effects, now);
                    return EventResult::Consumed;
                }
                _ => {}
            }
        }

        let result = self.session.dispatch(SessionAction::Key(key), now);
        let consumed = result.state_changed;
        self.apply_effects(result.effects, now);
        if consumed {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    fn apply_effects(&mut self, effects: Vec<SessionEffect>, now: Instant) {
        for effect in effects {
            match effect {
                SessionEffect::Changed(_) => self.status = None,
                SessionEffect::MentionTrigger(trigger) => {
                    let limit = self.session.config().candidate_limit;
                    let candidates = self.directory.search(&trigger.search, limit);
                    self.picker.reset();
                    self.session
                        .dispatch(SessionAction::SetCandidates(candidates), now);
                }
                SessionEffect::MentionClosed => self.picker.reset(),
                SessionEffect::Submitted(text) => {
                    tracing::info!(chars = text.chars().count(), "message submitted");
                    self.status = Some("sent".to_string());
                    self.submitted.push(text);
                }
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let picker_height = self.picker_height();
        let chunks = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(picker_height),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

        let block = Block::bordered().title(" message ");
        let inner = block.inner(chunks[0]);
        self.input_area = Some(inner);

        let (row, _) = cursor_cell(self.session.tree(), self.session.display_cursor());
        let row = row as u16;
        if row < self.scroll {
            self.scroll = row;
        } else if inner.height > 0 && row >= self.scroll + inner.height {
            self.scroll = row + 1 - inner.height;
        }

        let input = Paragraph::new(display_lines(self.session.tree()))
            .block(block)
            .scroll((self.scroll, 0));
        frame.render_widget(input, chunks[0]);

        if picker_height > 0 {
            self.render_picker(frame, chunks[1]);
        }
        frame.render_widget(Paragraph::new(self.status_line()), chunks[2]);
    }

    pub fn cursor_position(&self) -> Option<(u16, u16)> {
        let area = self.input_area?;
        let (row, col) = cursor_cell(self.session.tree(), self.session.display_cursor());
        let row = (row as u16).checked_sub(self.scroll)?;
        if row >= area.height {
            return None;
        }
        let col = (col as u16).min(area.width.saturating_sub(1));
        Some((area.x + col, area.y + row))
    }

    fn picker_height(&self) -> u16 {
        if self.session.state() != SessionState::MentionSearch {
            return 0;
        }
        let rows = self.session.candidates().len().max(1) as u16;
        (rows + 2).min(PICKER_MAX_HEIGHT)
    }

    fn render_picker(&self, frame: &mut Frame, area: Rect) {
        let search = self
            .session
            .mention_trigger()
            .map(|t| format!(" {}{} ", t.trigger, t.search))
            .unwrap_or_default();
        let block = Block::bordered().title(search);

        let candidates = self.session.candidates();
        if candidates.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "no matches",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = candidates.iter().map(candidate_item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default().with_selected(Some(self.picker.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn status_line(&self) -> Line<'static> {
        if let Some(status) = &self.status {
            return Line::from(Span::styled(
                status.clone(),
                Style::default().fg(Color::Yellow),
            ));
        }
        let remaining = self.session.remaining();
        let style = if remaining < 0 {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Line::from(vec![
            Span::styled(format!("{remaining} left"), style),
            Span::styled(
                "  ctrl-s send  ctrl-q quit",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }
}

fn candidate_item(entry: &MentionEntry) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::raw(entry.label.clone()),
        Span::styled(
            format!("  {}", entry.id),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

fn chip_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::UNDERLINED)
}

/// One ratatui line per display line. Chips and links are styled, text is raw.
pub fn display_lines(tree: &DisplayTree) -> Vec<Line<'_>> {
    tree.lines()
        .into_iter()
        .map(|segments| {
            let spans: Vec<Span> = segments
                .into_iter()
                .map(|segment| match segment {
                    LineSegment::Text(text) => Span::raw(text),
                    LineSegment::Link(text) => Span::styled(text, link_style()),
                    LineSegment::Chip(chip) => {
                        Span::styled(chip.display_text.as_str(), chip_style())
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// (row, column) cell of a display offset; columns count terminal cells.
pub fn cursor_cell(tree: &DisplayTree, display_offset: usize) -> (usize, usize) {
    let mut row = 0;
    let mut col = 0;
    for ch in tree.display_text().chars().take(display_offset) {
        if ch == '\n' {
            row += 1;
            col = 0;
        } else {
            col += ch.width().unwrap_or(0);
        }
    }
    (row, col)
}

#[cfg(test)]
#[path = "../../tests/unit/tui/view.rs"]
mod tests;
