//! TextInput: wraps tui-input for the search field.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_INPUT_BG, C_INPUT_FG, C_MUTED};

#[derive(Debug, PartialEq, Eq)]
pub enum InputEvent {
    Changed(String),
    Submitted(String),
    /// Esc on an already-empty field.
    Left,
    None,
}

pub struct TextInput {
    input: Input,
    active: bool,
    placeholder: String,
}

impl TextInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            placeholder: placeholder.into(),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn set_value(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
    }

    /// Esc clears a non-empty field (like the native clear button on a
    /// search input); a second Esc leaves the field.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputEvent {
        match key.code {
            KeyCode::Esc => {
                if self.input.value().is_empty() {
                    self.deactivate();
                    InputEvent::Left
                } else {
                    self.input = Input::default();
                    InputEvent::Changed(String::new())
                }
            }
            KeyCode::Enter => InputEvent::Submitted(self.input.value().to_string()),
            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.input.value() == before {
                    InputEvent::None
                } else {
                    InputEvent::Changed(self.input.value().to_string())
                }
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(4) as usize);
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled(
                format!("⌕ {}", self.placeholder),
                Style::default().fg(C_MUTED),
            )
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(format!("⌕ {}", visible), Style::default().fg(C_INPUT_FG))
        };

        let paragraph =
            Paragraph::new(Line::from(vec![display])).style(Style::default().bg(C_INPUT_BG));
        frame.render_widget(paragraph, area);

        if self.active && area.width > 0 {
            let cursor_x = area.x + 2 + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new("search...")
    }
}
