//! Color palette and style constants for the seedlist TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_ACCENT: Color = Color::Rgb(30, 215, 96); // spotify green
pub const C_ERROR: Color = Color::Rgb(255, 80, 80);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SEPARATOR: Color = Color::Rgb(40, 40, 52);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SELECTION_BG: Color = Color::Rgb(28, 28, 40);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200);
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 115);
pub const C_INPUT_BG: Color = Color::Rgb(20, 20, 32);
pub const C_INPUT_FG: Color = Color::Rgb(255, 200, 80);
pub const C_ARTIST: Color = Color::Rgb(180, 120, 220);
pub const C_TRACK: Color = Color::Rgb(80, 140, 200);
pub const C_LINK: Color = Color::Rgb(100, 160, 230);
pub const C_SLIDER_FILL: Color = Color::Rgb(30, 215, 96);
pub const C_SLIDER_EMPTY: Color = Color::Rgb(40, 40, 52);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_BADGE_PENDING: Color = Color::Rgb(255, 184, 80);
pub const C_MODE_NORMAL: Color = Color::Rgb(115, 115, 138);
pub const C_MODE_INSERT: Color = Color::Rgb(255, 200, 80);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_selected(focused: bool) -> Style {
    let base = Style::default().bg(C_SELECTION_BG).fg(C_PRIMARY);
    if focused {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    }
}

pub fn kind_color(kind: seedlist_core::models::ItemKind) -> Color {
    match kind {
        seedlist_core::models::ItemKind::Artist => C_ARTIST,
        seedlist_core::models::ItemKind::Track => C_TRACK,
    }
}
