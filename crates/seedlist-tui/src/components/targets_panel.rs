//! TargetsPanel component: one slider per recommendation target.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

use seedlist_core::recommend::TargetKind;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    widgets::{pane_chrome::pane_chrome, slider::slider_line},
};

pub const TARGETS_PANEL_HEIGHT: u16 = TargetKind::ALL.len() as u16 + 2;

pub struct TargetsPanel {
    selected: usize,
}

impl TargetsPanel {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn selected_kind(&self) -> TargetKind {
        TargetKind::ALL[self.selected.min(TargetKind::ALL.len() - 1)]
    }
}

impl Default for TargetsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TargetsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::TargetsPanel
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(TargetKind::ALL.len() - 1)
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => {
                return vec![Action::NudgeTarget(self.selected_kind(), false)];
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => {
                return vec![Action::NudgeTarget(self.selected_kind(), true)];
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if event.row > area.y => {
                let row = (event.row - area.y - 1) as usize;
                if row < TargetKind::ALL.len() {
                    self.selected = row;
                }
                vec![]
            }
            MouseEventKind::ScrollUp => vec![Action::NudgeTarget(self.selected_kind(), true)],
            MouseEventKind::ScrollDown => vec![Action::NudgeTarget(self.selected_kind(), false)],
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("targets", Some('4'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let Some(container) = state.container() else {
            return;
        };
        let targets = container.targets();
        let lines: Vec<Line> = TargetKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                slider_line(
                    kind.label(),
                    targets.format(*kind),
                    targets.get(*kind),
                    inner.width,
                    focused && i == self.selected,
                )
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use seedlist_core::config::Config;

    fn state() -> AppState {
        AppState::new(Config::resolve(false).unwrap(), "/tmp/seedlist.log".into())
    }

    #[test]
    fn test_arrows_nudge_selected_target() {
        let mut panel = TargetsPanel::new();
        let s = state();
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        panel.handle_key(down, &s);
        assert_eq!(
            panel.handle_key(right, &s),
            vec![Action::NudgeTarget(TargetKind::Energy, true)]
        );
        for _ in 0..10 {
            panel.handle_key(down, &s);
        }
        assert_eq!(panel.selected_kind(), TargetKind::Valence);
    }
}
