//! Slider: one horizontal bar per recommendation target.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::theme::{C_PRIMARY, C_SECONDARY, C_SLIDER_EMPTY, C_SLIDER_FILL};

/// Render `label ▕███░░░▏ value` into a line `width` columns wide.
/// `percent` is clamped to `0..=100`.
pub fn slider_line<'a>(
    label: &'a str,
    value: String,
    percent: u8,
    width: u16,
    selected: bool,
) -> Line<'a> {
    const LABEL_W: usize = 13;
    const VALUE_W: usize = 6;
    let bar_w = (width as usize).saturating_sub(LABEL_W + VALUE_W + 2).max(4);
    let filled = (bar_w * percent.min(100) as usize + 50) / 100;

    let label_style = if selected {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_SECONDARY)
    };
    Line::from(vec![
        Span::styled(format!("{:<w$}", label, w = LABEL_W), label_style),
        Span::styled("▕", Style::default().fg(C_SLIDER_EMPTY)),
        Span::styled("█".repeat(filled), Style::default().fg(C_SLIDER_FILL)),
        Span::styled("░".repeat(bar_w - filled), Style::default().fg(C_SLIDER_EMPTY)),
        Span::styled("▏", Style::default().fg(C_SLIDER_EMPTY)),
        Span::styled(format!("{:>w$}", value, w = VALUE_W), label_style),
    ])
}
