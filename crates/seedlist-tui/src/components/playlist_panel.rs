//! PlaylistPanel component: the recommended tracks, Save/Clear buttons, and
//! the link to the last saved playlist.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use seedlist_core::request::RequestKind;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_BADGE_PENDING, C_MUTED, C_NUMBER_HINT, C_PRIMARY, C_SECONDARY},
    widgets::{
        button::Button,
        pane_chrome::{pane_chrome, Badge},
    },
};

const SAVE: Button = Button::new("Save playlist", 's');
const CLEAR: Button = Button::new("Clear", 'x');

pub struct PlaylistPanel {
    scroll: usize,
    save_area: Rect,
    clear_area: Rect,
    link_area: Rect,
    badge: String,
}

impl PlaylistPanel {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            save_area: Rect::default(),
            clear_area: Rect::default(),
            link_area: Rect::default(),
            badge: String::new(),
        }
    }
}

impl Default for PlaylistPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0 && col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

impl Component for PlaylistPanel {
    fn id(&self) -> ComponentId {
        ComponentId::PlaylistPanel
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll += 1,
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll += 10,
            KeyCode::Home => self.scroll = 0,
            KeyCode::Enter => return vec![Action::OpenSavedPlaylist],
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        let (col, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            MouseEventKind::ScrollDown => self.scroll += 1,
            MouseEventKind::Down(MouseButton::Left) => {
                if hit(self.save_area, col, row) {
                    return vec![Action::SavePlaylist];
                }
                if hit(self.clear_area, col, row) {
                    return vec![Action::ClearPlaylist];
                }
                if hit(self.link_area, col, row) {
                    return vec![Action::OpenSavedPlaylist];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if matches!(action, Action::GetPlaylist | Action::ClearPlaylist) {
            self.scroll = 0;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.save_area = Rect::default();
        self.clear_area = Rect::default();
        self.link_area = Rect::default();

        let container = state.container();
        let playlist = container.map(|c| c.playlist());
        let (badge_text, badge_color) = match container {
            Some(c) if c.is_pending(RequestKind::Save) => ("saving".to_string(), C_BADGE_PENDING),
            Some(c) if c.is_pending(RequestKind::Recommend) => {
                ("loading".to_string(), C_BADGE_PENDING)
            }
            _ => match playlist {
                Some(p) if p.is_visible() => (format!("{} tracks", p.len()), C_MUTED),
                _ => (String::new(), C_MUTED),
            },
        };
        self.badge = badge_text;
        let badge = (!self.badge.is_empty()).then(|| Badge {
            text: self.badge.as_str(),
            color: badge_color,
        });
        let block = pane_chrome("playlist", Some('5'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let Some(container) = container else {
            return;
        };
        if inner.height == 0 {
            return;
        }

        let mut body = inner;

        // Saved link on the first row.
        if let Some(saved) = container.saved() {
            let prefix = format!(" saved {} ", saved.saved_at.format("%H:%M"));
            let prefix_w = prefix.chars().count() as u16;
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(prefix, Style::default().fg(C_SECONDARY)),
                    saved.link.span(focused),
                    Span::styled("  o open  y copy", Style::default().fg(C_MUTED)),
                ])),
                Rect { height: 1, ..body },
            );
            self.link_area = Rect {
                x: body.x + prefix_w,
                y: body.y,
                width: saved.link.width().min(body.width.saturating_sub(prefix_w)),
                height: 1,
            };
            body.y += 1;
            body.height -= 1;
        }

        let playlist = container.playlist();
        if !playlist.is_visible() {
            if container.saved().is_none() && body.height > 0 {
                let hint = if container.get_playlist_enabled() {
                    "  press g to get a playlist"
                } else {
                    "  add seeds from the results, then press g"
                };
                frame.render_widget(
                    Paragraph::new(Span::styled(hint, Style::default().fg(C_MUTED))),
                    body,
                );
            }
            return;
        }
        if body.height == 0 {
            return;
        }

        // Buttons on the last row, tracks above.
        let button_row = Rect {
            y: body.y + body.height - 1,
            height: 1,
            ..body
        };
        self.save_area = Rect {
            x: button_row.x + 1,
            width: SAVE.width().min(button_row.width),
            ..button_row
        };
        self.clear_area = Rect {
            x: self.save_area.x + self.save_area.width + 2,
            width: CLEAR
                .width()
                .min(button_row.width.saturating_sub(SAVE.width() + 3)),
            ..button_row
        };
        frame.render_widget(
            Paragraph::new(Line::from(SAVE.span(true, false))),
            self.save_area,
        );
        frame.render_widget(
            Paragraph::new(Line::from(CLEAR.span(true, false))),
            self.clear_area,
        );

        let list_h = body.height.saturating_sub(1) as usize;
        let total = playlist.len();
        self.scroll = self.scroll.min(total.saturating_sub(list_h));
        let num_w = total.to_string().len();
        let lines: Vec<Line> = playlist
            .tracks()
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(list_h)
            .map(|(i, t)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:>w$}. ", i + 1, w = num_w),
                        Style::default().fg(C_NUMBER_HINT),
                    ),
                    Span::styled(t.display_name.as_str(), Style::default().fg(C_PRIMARY)),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines),
            Rect {
                height: list_h as u16,
                ..body
            },
        );
    }
}
