pub mod alert_overlay;
pub mod header;
pub mod help_overlay;
pub mod landing;
pub mod log_panel;
pub mod playlist_panel;
pub mod results_list;
pub mod search_panel;
pub mod seeds_panel;
pub mod targets_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// `percent_x` wide, `height` rows tall, centered in `r`.
pub(crate) fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
