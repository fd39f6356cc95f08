//! RadioButton: a labelled radio control, grouped so at most one is checked.
//!
//! The group does not enforce that exactly one button starts checked; the
//! caller passes the default.

use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::theme::{C_ACCENT, C_MUTED, C_PRIMARY, C_SECONDARY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioButton {
    label: String,
    pub checked: bool,
}

impl RadioButton {
    pub fn new(label: impl Into<String>, checked: bool) -> Self {
        Self {
            label: label.into(),
            checked,
        }
    }

    /// The control id is its label text.
    pub fn id(&self) -> &str {
        &self.label
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn spans(&self, focused: bool) -> Vec<Span<'_>> {
        let (mark, mark_style) = if self.checked {
            ("(•)", Style::default().fg(C_ACCENT))
        } else {
            ("( )", Style::default().fg(C_MUTED))
        };
        let label_style = match (self.checked, focused) {
            (true, true) => Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(C_PRIMARY),
            (false, _) => Style::default().fg(C_SECONDARY),
        };
        vec![
            Span::styled(mark, mark_style),
            Span::raw(" "),
            Span::styled(self.label.as_str(), label_style),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct RadioGroup {
    name: String,
    buttons: Vec<RadioButton>,
}

impl RadioGroup {
    pub fn new(name: impl Into<String>, buttons: Vec<RadioButton>) -> Self {
        Self {
            name: name.into(),
            buttons,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn buttons(&self) -> &[RadioButton] {
        &self.buttons
    }

    /// Label of the checked button, if any.
    pub fn selected(&self) -> Option<&str> {
        self.buttons.iter().find(|b| b.checked).map(|b| b.label())
    }

    /// Check the button with `id` and uncheck the rest.  Returns `true` if
    /// the selection changed.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.buttons.iter().any(|b| b.id() == id) {
            return false;
        }
        let changed = self.selected() != Some(id);
        for b in &mut self.buttons {
            b.checked = b.id() == id;
        }
        changed
    }

    /// Move the check to the next button (wrapping).  Returns the new label.
    pub fn select_next(&mut self) -> Option<String> {
        if self.buttons.is_empty() {
            return None;
        }
        let next = match self.buttons.iter().position(|b| b.checked) {
            Some(i) => (i + 1) % self.buttons.len(),
            None => 0,
        };
        let id = self.buttons[next].id().to_string();
        self.select(&id);
        Some(id)
    }

    /// Button whose rendered span covers column `col` (relative to the start
    /// of the group as laid out by `spans`).
    pub fn hit(&self, col: u16) -> Option<&str> {
        let mut x = 0u16;
        for b in &self.buttons {
            let w = (4 + b.label().chars().count()) as u16;
            if col >= x && col < x + w {
                return Some(b.id());
            }
            x += w + GAP;
        }
        None
    }

    pub fn spans(&self, focused: bool) -> Vec<Span<'_>> {
        let mut spans = Vec::new();
        for (i, b) in self.buttons.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" ".repeat(GAP as usize)));
            }
            spans.extend(b.spans(focused));
        }
        spans
    }
}

const GAP: u16 = 3;
