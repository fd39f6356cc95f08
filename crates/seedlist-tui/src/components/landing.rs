//! Body shown while no AppContainer is mounted.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use seedlist_core::config::Settings;

use crate::{
    app_state::AppState,
    bootstrap::Session,
    theme::{C_MUTED, C_SECONDARY},
    widgets::pane_chrome::pane_chrome,
};

pub fn draw_landing(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = pane_chrome("seedlist", None, false, None);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = |s: String| Line::from(Span::styled(s, Style::default().fg(C_SECONDARY)));
    let hint = |s: &'static str| Line::from(Span::styled(s, Style::default().fg(C_MUTED)));

    let lines = match state.session {
        Session::Checking => vec![text(format!("  contacting {}…", state.config.api_url))],
        Session::Anonymous => vec![
            text("  Log in with Spotify to search and build playlists.".into()),
            Line::from(""),
            hint("  l      open the login page in your browser"),
            text(format!(
                "  then   copy the session cookie into {} under [session] cookie",
                Settings::config_path().display()
            )),
            hint("  r      check the session again"),
        ],
        Session::Failed => vec![
            text(format!("  could not check the session at {}", state.config.api_url)),
            Line::from(""),
            hint("  L      show the log"),
            hint("  r      retry"),
        ],
        Session::Authenticated => Vec::new(),
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
