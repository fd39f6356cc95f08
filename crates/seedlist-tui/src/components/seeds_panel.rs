//! SeedsPanel component: artist and track seed lists side by side, plus the
//! get-playlist button.
//!
//! The cursor walks artists first, then tracks.  Enter, `d` or a click on a
//! seed removes it.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use seedlist_core::models::ItemKind;
use seedlist_core::seeds::{SeedItem, MAX_SEEDS_PER_KIND};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{kind_color, style_selected, C_MUTED, C_PRIMARY},
    widgets::{button::Button, pane_chrome::pane_chrome},
};

const GET_PLAYLIST: Button = Button::new("Get playlist", 'g');

/// Rows inside the border: heading, one per seed slot, button.
pub const SEEDS_PANEL_HEIGHT: u16 = MAX_SEEDS_PER_KIND as u16 + 4;

pub struct SeedsPanel {
    selected: usize,
    columns: [Rect; 2],
    button_area: Rect,
}

impl SeedsPanel {
    pub fn new() -> Self {
        Self {
            selected: 0,
            columns: [Rect::default(); 2],
            button_area: Rect::default(),
        }
    }

    fn flat(state: &AppState) -> Vec<SeedItem> {
        let Some(container) = state.container() else {
            return Vec::new();
        };
        ItemKind::ALL
            .iter()
            .flat_map(|k| container.seeds().list(*k).items().iter().cloned())
            .collect()
    }

    fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

impl Default for SeedsPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0 && col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

impl Component for SeedsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::SeedsPanel
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let seeds = Self::flat(state);
        self.clamp(seeds.len());
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < seeds.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => {
                if let Some(seed) = seeds.get(self.selected) {
                    return vec![Action::RemoveSeed(seed.kind, seed.id.clone())];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let (col, row) = (event.column, event.row);
        if hit(self.button_area, col, row) {
            return vec![Action::GetPlaylist];
        }
        let Some(container) = state.container() else {
            return vec![];
        };
        for (i, kind) in ItemKind::ALL.iter().enumerate() {
            let column = self.columns[i];
            // First row of the column is its heading.
            if hit(column, col, row) && row > column.y {
                let idx = (row - column.y - 1) as usize;
                if let Some(seed) = container.seeds().list(*kind).get(idx) {
                    return vec![Action::RemoveSeed(*kind, seed.id.clone())];
                }
            }
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("seeds", Some('3'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let Some(container) = state.container() else {
            return;
        };
        if inner.height < 2 {
            return;
        }

        let list_h = inner.height - 1;
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(Rect {
                height: list_h,
                ..inner
            });

        let flat_len = container.seeds().len();
        self.clamp(flat_len);
        let mut offset = 0;
        for (i, kind) in ItemKind::ALL.iter().enumerate() {
            let list = container.seeds().list(*kind);
            self.columns[i] = halves[i];
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    format!(" {}s ", kind),
                    Style::default()
                        .fg(kind_color(*kind))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{}/{}", list.len(), MAX_SEEDS_PER_KIND),
                    Style::default().fg(C_MUTED),
                ),
            ])];
            if list.is_empty() {
                lines.push(Line::from(Span::styled(
                    "  (none)",
                    Style::default().fg(C_MUTED),
                )));
            }
            for (j, seed) in list.items().iter().enumerate() {
                let style = if focused && offset + j == self.selected {
                    style_selected(true)
                } else {
                    Style::default().fg(C_PRIMARY)
                };
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(seed.label.as_str(), style),
                ]));
            }
            offset += list.len();
            frame.render_widget(Paragraph::new(lines), halves[i]);
        }

        let enabled = container.get_playlist_enabled();
        let button_row = Rect {
            y: inner.y + list_h,
            height: 1,
            ..inner
        };
        self.button_area = Rect {
            x: button_row.x + 1,
            width: GET_PLAYLIST.width().min(button_row.width),
            ..button_row
        };
        frame.render_widget(
            Paragraph::new(Line::from(GET_PLAYLIST.span(enabled, false))),
            self.button_area,
        );
    }
}
