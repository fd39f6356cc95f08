//! SearchPanel component: search field plus the artist/track radio group.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use seedlist_core::request::RequestKind;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::C_BADGE_PENDING,
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        text_input::{InputEvent, TextInput},
    },
};

pub struct SearchPanel {
    pub input: TextInput,
}

impl SearchPanel {
    pub fn new() -> Self {
        Self {
            input: TextInput::new("artist or track name…"),
        }
    }
}

impl Default for SearchPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchPanel {
    fn id(&self) -> ComponentId {
        ComponentId::SearchPanel
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if self.input.is_active() {
            return match self.input.handle_key(key) {
                InputEvent::Changed(q) => vec![Action::QueryChanged(q)],
                InputEvent::Submitted(q) if q.is_empty() => vec![],
                InputEvent::Submitted(_) => vec![
                    Action::SubmitSearch,
                    Action::StopEditing,
                    Action::FocusPane(ComponentId::ResultsList),
                ],
                InputEvent::Left => vec![Action::StopEditing],
                InputEvent::None => vec![],
            };
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char('i') => vec![Action::StartEditing],
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                vec![Action::ToggleSearchType]
            }
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        // Inner rows: 0 = input, 1 = radio group.
        let row = event.row.saturating_sub(area.y + 1);
        match row {
            0 => vec![Action::StartEditing],
            1 => {
                let col = event.column.saturating_sub(area.x + 2);
                state
                    .container()
                    .and_then(|c| c.search_type().hit(col))
                    .map(|id| vec![Action::SelectSearchType(id.to_string())])
                    .unwrap_or_default()
            }
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::StartEditing => self.input.activate(),
            Action::StopEditing => self.input.deactivate(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let pending = state
            .container()
            .is_some_and(|c| c.is_pending(RequestKind::Search));
        let badge = pending.then_some(Badge {
            text: "searching",
            color: C_BADGE_PENDING,
        });
        let block = pane_chrome("search", Some('1'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        self.input.draw(frame, Rect { height: 1, ..inner });

        if inner.height > 1 {
            if let Some(container) = state.container() {
                let mut spans = vec![ratatui::text::Span::raw(" ")];
                spans.extend(container.search_type().spans(focused && !self.input.is_active()));
                frame.render_widget(
                    Paragraph::new(Line::from(spans)),
                    Rect {
                        y: inner.y + 1,
                        height: 1,
                        ..inner
                    },
                );
            }
        }
    }
}
