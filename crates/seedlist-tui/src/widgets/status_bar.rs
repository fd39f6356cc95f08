//! Status bar: bottom line with mode, session state, and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::bootstrap::Session;
use crate::theme::{C_ACCENT, C_ERROR, C_MODE_INSERT, C_MODE_NORMAL, C_MUTED, C_SEPARATOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the search field.
    Insert,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "SEARCH",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Insert => C_MODE_INSERT,
        }
    }

    pub fn keys(self) -> &'static str {
        match self {
            Self::Normal => {
                " / search  t type  Enter add/remove  g get playlist  s save  x clear  ←→ targets  o open  y copy  l login  Tab panes  L logs  ? help  q quit"
            }
            Self::Insert => " type to search  Enter search  Esc clear/leave  Tab next pane",
        }
    }
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, session: Session) {
    let bulb = match session {
        Session::Authenticated => Span::styled("●", Style::default().fg(C_ACCENT)),
        Session::Failed => Span::styled("●", Style::default().fg(C_ERROR)),
        Session::Checking | Session::Anonymous => {
            Span::styled("○", Style::default().fg(C_MUTED))
        }
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
        bulb,
        Span::raw(" "),
        Span::styled(mode.keys(), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
