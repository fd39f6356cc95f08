//! Button: a clickable label with enabled/hidden flags.

use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::theme::{C_ACCENT, C_MUTED, C_PANEL_BORDER_FOCUSED};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    label: &'static str,
    hotkey: char,
}

impl Button {
    pub const fn new(label: &'static str, hotkey: char) -> Self {
        Self { label, hotkey }
    }

    pub fn width(&self) -> u16 {
        // "[ label (k) ]"
        (self.label.chars().count() + 8) as u16
    }

    pub fn span(&self, enabled: bool, focused: bool) -> Span<'static> {
        let style = if !enabled {
            Style::default().fg(C_MUTED)
        } else if focused {
            Style::default()
                .fg(C_PANEL_BORDER_FOCUSED)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)
        };
        Span::styled(format!("[ {} ({}) ]", self.label, self.hotkey), style)
    }
}
