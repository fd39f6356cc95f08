//! Generic scrollable list with a single selection cursor.

pub struct ScrollableList<T> {
    items: Vec<T>,
    pub selected: usize,
    pub scroll_offset: usize,
}

impl<T> ScrollableList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            scroll_offset: 0,
        }
    }

    /// Replace the contents.  The cursor is clamped, not reset, so a list
    /// that only lost its last item keeps its position.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
        if self.scroll_offset > self.selected {
            self.scroll_offset = self.selected;
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + n).min(self.items.len() - 1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn selected_index(&self) -> Option<usize> {
        (self.selected < self.items.len()).then_some(self.selected)
    }

    /// Returns (index, &item) pairs visible in `height` rows.
    /// Call ensure_visible first to update scroll_offset.
    pub fn visible_items(&self, height: usize) -> Vec<(usize, &T)> {
        if height == 0 || self.items.is_empty() {
            return Vec::new();
        }
        let start = self.scroll_offset.min(self.items.len());
        let end = (start + height).min(self.items.len());
        (start..end).map(|i| (i, &self.items[i])).collect()
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected.saturating_sub(height - 1);
        }
    }

    /// Handle a click at `row` within the rendered area.
    /// Returns true if the row holds an item.
    pub fn handle_click(&mut self, row: usize) -> bool {
        let target = self.scroll_offset + row;
        if target < self.items.len() {
            self.selected = target;
            return true;
        }
        false
    }

    pub fn selected_in_view(&self, height: usize) -> usize {
        self.selected
            .saturating_sub(self.scroll_offset)
            .min(height.saturating_sub(1))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for ScrollableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> ScrollableList<usize> {
        let mut l = ScrollableList::new();
        l.set_items((0..n).collect());
        l
    }

    #[test]
    fn test_navigation_clamps() {
        let mut l = list(3);
        l.select_up(1);
        assert_eq!(l.selected, 0);
        l.select_down(10);
        assert_eq!(l.selected, 2);
        assert_eq!(l.selected_item(), Some(&2));
    }

    #[test]
    fn test_shrinking_clamps_cursor() {
        let mut l = list(5);
        l.select_last();
        l.set_items(vec![0, 1]);
        assert_eq!(l.selected, 1);
        l.set_items(Vec::new());
        assert_eq!(l.selected_index(), None);
    }

    #[test]
    fn test_scrolls_to_keep_selection_visible() {
        let mut l = list(10);
        l.select_down(7);
        l.ensure_visible(3);
        assert_eq!(l.scroll_offset, 5);
        let visible: Vec<usize> = l.visible_items(3).into_iter().map(|(i, _)| i).collect();
        assert_eq!(visible, vec![5, 6, 7]);
    }

    #[test]
    fn test_click_past_end_is_ignored() {
        let mut l = list(2);
        assert!(l.handle_click(1));
        assert_eq!(l.selected, 1);
        assert!(!l.handle_click(5));
        assert_eq!(l.selected, 1);
    }
}
