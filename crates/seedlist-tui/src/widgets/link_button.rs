//! LinkButton: a button that navigates to a URL when activated.
//!
//! Activation only produces `Action::Navigate`; the App opens the browser.

use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::action::Action;
use crate::theme::{C_LINK, C_PANEL_BORDER_FOCUSED};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkButton {
    label: String,
    href: String,
}

impl LinkButton {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn activate(&self) -> Action {
        Action::Navigate(self.href.clone())
    }

    pub fn width(&self) -> u16 {
        (self.label.chars().count() + 4) as u16
    }

    pub fn span(&self, focused: bool) -> Span<'_> {
        let style = if focused {
            Style::default()
                .fg(C_PANEL_BORDER_FOCUSED)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(C_LINK).add_modifier(Modifier::UNDERLINED)
        };
        Span::styled(format!("[ {} ]", self.label), style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_navigates_to_href() {
        let link = LinkButton::new("Login with Spotify", "http://localhost:3000/auth/login");
        match link.activate() {
            Action::Navigate(url) => assert_eq!(url, "http://localhost:3000/auth/login"),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_width_matches_rendered_text() {
        let link = LinkButton::new("Logout", "x");
        assert_eq!(link.width() as usize, link.span(false).content.chars().count());
    }
}
