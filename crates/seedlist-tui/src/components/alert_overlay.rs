//! AlertOverlay component: blocking modal for the container's alert.
//!
//! While an alert is up every key and click goes here; Enter, Esc, Space or
//! a click dismisses it.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_BG, C_PRIMARY, C_TOAST_WARNING},
    widgets::button::Button,
};

use super::centered_rect;

const OK: Button = Button::new("OK", '⏎');

pub struct AlertOverlay;

impl AlertOverlay {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AlertOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for AlertOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::AlertOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => vec![Action::DismissAlert],
            _ => vec![Action::Noop],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind == MouseEventKind::Down(MouseButton::Left) {
            vec![Action::DismissAlert]
        } else {
            vec![Action::Noop]
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let Some(message) = state.alert() else {
            return;
        };
        let popup = centered_rect(40, 6, area);
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                message,
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(""),
            Line::from(OK.span(true, true)).centered(),
        ];
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(C_TOAST_WARNING))
                        .style(Style::default().bg(C_BG)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}
