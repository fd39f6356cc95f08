//! ResultsList component: search results; Enter or click adds a seed.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use seedlist_core::models::SearchResultItem;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{kind_color, style_selected, C_ACCENT, C_MUTED, C_PRIMARY},
    widgets::{pane_chrome::pane_chrome, scrollable_list::ScrollableList},
};

pub struct ResultsList {
    pub list: ScrollableList<SearchResultItem>,
    list_state: ListState,
    count_label: String,
}

impl ResultsList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(),
            list_state: ListState::default(),
            count_label: String::new(),
        }
    }

    /// Pull the current results out of the container.
    pub fn sync(&mut self, state: &AppState) {
        let items = state
            .container()
            .map(|c| c.results().to_vec())
            .unwrap_or_default();
        if items.as_slice() != self.list.items() {
            if items.first() != self.list.items().first() {
                self.list.select_first();
            }
            self.list.set_items(items);
        }
    }
}

impl Default for ResultsList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ResultsList {
    fn id(&self) -> ComponentId {
        ComponentId::ResultsList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        self.sync(state);
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter | KeyCode::Char('a') => {
                if let Some(idx) = self.list.selected_index() {
                    return vec![Action::AddSeed(idx)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        self.sync(state);
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let row = event.row.saturating_sub(area.y + 1) as usize;
                if event.row > area.y && self.list.handle_click(row) {
                    return vec![Action::AddSeed(self.list.selected)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.sync(state);
        self.count_label = self.list.len().to_string();
        let badge = (!self.list.is_empty()).then(|| crate::widgets::pane_chrome::Badge {
            text: self.count_label.as_str(),
            color: C_MUTED,
        });
        let block = pane_chrome("results", Some('2'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.list.is_empty() {
            let msg = if state.container().is_some_and(|c| c.query().is_empty()) {
                "  type a query and press Enter"
            } else {
                "  no results"
            };
            frame.render_widget(
                Paragraph::new(Span::styled(msg, Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        self.list.ensure_visible(height);
        let sel_in_view = self.list.selected_in_view(height);
        let seeds = state.container().map(|c| c.seeds());

        let items: Vec<ListItem> = self
            .list
            .visible_items(height)
            .into_iter()
            .enumerate()
            .map(|(row, (_, item))| {
                let seeded = seeds.is_some_and(|s| s.list(item.kind).contains(&item.id));
                let marker = if seeded {
                    Span::styled(" ✓ ", Style::default().fg(C_ACCENT))
                } else {
                    Span::styled(" · ", Style::default().fg(kind_color(item.kind)))
                };
                let style = if row == sel_in_view {
                    style_selected(focused)
                } else {
                    Style::default().fg(C_PRIMARY)
                };
                ListItem::new(Line::from(vec![marker, Span::styled(item.label(), style)]))
            })
            .collect();

        self.list_state.select(Some(sel_in_view));
        frame.render_stateful_widget(List::new(items), inner, &mut self.list_state);
    }
}
