use crate::storage::Note;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;

pub const EMPTY_NOTE_WARNING: &str = "Please type down your notes before saving...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Compose,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A note was appended; carries its ID
    Added(String),
    /// The text was blank and a warning is now showing
    Rejected,
}

/// Working set of notes for one terminal session. Nothing here is persisted.
pub struct App {
    pub notes: Vec<Note>,
    pub selected_index: usize,
    pub mode: AppMode,
    pub input_buffer: String,
    pub warning: Option<String>,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        App {
            notes: Vec::new(),
            selected_index: 0,
            mode: AppMode::Compose,
            input_buffer: String::new(),
            warning: None,
            should_quit: false,
        }
    }

    /// Append a note with `text` as its body, or raise the warning if `text` is blank
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            self.warning = Some(EMPTY_NOTE_WARNING.to_string());
            self.mode = AppMode::Warning;
            return SubmitOutcome::Rejected;
        }

        let note = Note::from_body(text.to_string());
        let id = note.id.clone();
        self.notes.push(note);
        self.selected_index = self.notes.len() - 1;
        SubmitOutcome::Added(id)
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Raw mode swallows SIGINT, so Ctrl+C is ours to honour
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.mode {
            AppMode::Compose => self.handle_compose_key(key, modifiers),
            AppMode::Warning => self.handle_warning_key(key),
        }
    }

    fn handle_compose_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                let text = std::mem::take(&mut self.input_buffer);
                if self.submit(&text) == SubmitOutcome::Rejected {
                    self.input_buffer = text;
                }
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.input_buffer.push(c);
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Enter => {
                self.input_buffer.push('\n');
            }
            KeyCode::Down => {
                if self.selected_index + 1 < self.notes.len() {
                    self.selected_index += 1;
                }
            }
            KeyCode::Up => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            _ => {}
        }
    }

    // Blocking: only an acknowledgement gets through
    fn handle_warning_key(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Esc) {
            self.warning = None;
            self.mode = AppMode::Compose;
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(8),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        // Title bar
        let title = Paragraph::new("notepad - My Notes")
            .block(Block::default().borders(Borders::ALL).title("notepad"))
            .style(Style::default().fg(Color::Cyan));
        frame.render_widget(title, chunks[0]);

        self.render_editor(frame, chunks[1]);
        self.render_list(frame, chunks[2]);

        // Help bar
        let help = Paragraph::new("type to write | Enter: new line | Ctrl+S: save | ↑/↓: select | Esc/Ctrl+C: quit")
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);

        if self.mode == AppMode::Warning {
            self.render_warning(frame);
        }
    }

    fn render_editor(&self, frame: &mut Frame, area: Rect) {
        let char_count = self.input_buffer.chars().count();
        let editor_title = format!("New Note ({} chars)", char_count);
        let editor = Paragraph::new(self.input_buffer.as_str())
            .block(Block::default().borders(Borders::ALL).title(editor_title))
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(Color::White));
        frame.render_widget(editor, area);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .notes
            .iter()
            .map(|note| {
                let date_str = chrono::DateTime::from_timestamp_millis(note.time_created)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();

                // First line of the body, truncated
                let preview = note.body.lines().next().unwrap_or("").trim();
                let preview: String = if preview.chars().count() > 60 {
                    format!("{}...", preview.chars().take(60).collect::<String>())
                } else {
                    preview.to_string()
                };

                ListItem::new(vec![
                    Line::from(Span::styled(preview, Style::default().fg(Color::White))),
                    Line::from(Span::styled(
                        format!("📅 {}", date_str),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let mut state = ListState::default();
        if !self.notes.is_empty() {
            state.select(Some(self.selected_index));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Notes ({})", self.notes.len())),
            )
            .highlight_style(Style::default().fg(Color::Yellow).bg(Color::DarkGray))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_warning(&self, frame: &mut Frame) {
        let area = centered_rect(50, 7, frame.area());
        let message = self.warning.as_deref().unwrap_or(EMPTY_NOTE_WARNING);

        let popup = Paragraph::new(format!("{}\n\n[ OK ]", message))
            .block(Block::default().borders(Borders::ALL).title("Warning"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

/// A rectangle `percent_x` wide and `height` rows tall, centred in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
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
