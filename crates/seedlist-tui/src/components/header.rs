//! Header component: one-row top bar: title, session state, login/logout link.
//!
//! Not focusable.  The link is activated with `l` or a click.

use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    bootstrap::Session,
    theme::{C_ACCENT, C_ERROR, C_MUTED, C_PRIMARY, C_SECONDARY},
};

pub struct Header {
    /// Where the session link was last drawn (for click hit-testing).
    link_area: Rect,
}

impl Header {
    pub fn new() -> Self {
        Self {
            link_area: Rect::default(),
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let a = self.link_area;
        let hit = a.width > 0
            && event.column >= a.x
            && event.column < a.x + a.width
            && event.row >= a.y
            && event.row < a.y + a.height;
        match &state.session_link {
            Some(link) if hit => vec![link.activate()],
            _ => vec![],
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if area.height == 0 {
            return;
        }
        let (status, status_style) = match state.session {
            Session::Checking => ("checking session…", Style::default().fg(C_MUTED)),
            Session::Authenticated => ("logged in", Style::default().fg(C_ACCENT)),
            Session::Anonymous => ("not logged in", Style::default().fg(C_SECONDARY)),
            Session::Failed => ("offline", Style::default().fg(C_ERROR)),
        };
        let left = Line::from(vec![
            Span::styled(
                " seedlist ",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::styled("· ", Style::default().fg(C_MUTED)),
            Span::styled(status, status_style),
        ]);
        frame.render_widget(Paragraph::new(left), area);

        self.link_area = Rect::default();
        if let Some(link) = &state.session_link {
            let w = link.width().min(area.width);
            let x = area.x + area.width.saturating_sub(w + 1);
            self.link_area = Rect {
                x,
                y: area.y,
                width: w,
                height: 1,
            };
            frame.render_widget(Paragraph::new(Line::from(link.span(false))), self.link_area);
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
